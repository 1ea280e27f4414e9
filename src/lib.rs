//! penguin-explorer: linked scatter/histogram explorer for the Palmer penguins dataset.
//!
//! The crate keeps composition pure (`api`), isolates mutable selection state
//! in the binder (`interaction`), and treats the web page as a thin surface
//! (`platform_web`).

pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod source;
pub mod telemetry;

#[cfg(feature = "server")]
pub mod platform_web;

pub use api::{ChartComposer, ChartDocument, ComposerConfig, compose};
pub use error::{ExplorerError, ExplorerResult};
