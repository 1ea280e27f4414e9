use std::sync::Arc;

use clap::{ArgAction, Parser};
use penguin_explorer::config::{AppConfig, ServerConfig};
use penguin_explorer::platform_web::{AppState, serve};
use penguin_explorer::source::{DEFAULT_DATASET_URL, DatasetSource, load_dataset};
use penguin_explorer::{ChartComposer, ExplorerError, ExplorerResult, telemetry};
use tracing::warn;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Serve a linked scatter/histogram explorer for the Palmer penguins dataset",
    long_about = None
)]
struct Cli {
    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 5555)]
    port: u16,

    /// Verbose logging
    #[arg(long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Dataset CSV location (http(s) URL or file path)
    #[arg(long, env = "PENGUIN_EXPLORER_DATA_URL", default_value = DEFAULT_DATASET_URL)]
    data_url: String,
}

impl Cli {
    fn into_config(self) -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: self.host,
                port: self.port,
            },
            debug: self.debug,
            dataset: DatasetSource::parse(&self.data_url),
            ..AppConfig::default()
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> ExplorerResult<()> {
    let config = Cli::parse().into_config();
    if !telemetry::init_default_tracing(config.debug) {
        warn!("tracing subscriber already installed, keeping it");
    }
    config.validate()?;

    // Blocking fetch, before the runtime exists.
    let dataset = Arc::new(load_dataset(&config.dataset)?);
    let composer = ChartComposer::new(dataset, config.composer.clone())?;
    let state = AppState::new(composer, config.layout.clone())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ExplorerError::Server(format!("failed to start runtime: {e}")))?;
    runtime.block_on(serve(&config.server, state))
}
