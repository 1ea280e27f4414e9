//! Telemetry helpers for the explorer binary and embedding hosts.
//!
//! Tracing setup stays explicit and opt-in. Hosts can either call
//! `init_default_tracing` or wire their own `tracing` subscriber and filters.

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// `RUST_LOG` wins when set; otherwise the filter is `info`, or `debug` when
/// `debug` is requested.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or if a
/// global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing(debug: bool) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let fallback = default_filter_directive(debug);
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
            )
            .with_target(debug)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = debug;
        false
    }
}

/// Filter directive used when `RUST_LOG` is absent.
#[must_use]
pub fn default_filter_directive(debug: bool) -> &'static str {
    if debug { "debug" } else { "info" }
}
