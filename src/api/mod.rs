//! Chart composition: typed Vega-Lite spec, snapshot and standalone document.

mod composer;
mod composer_config;
mod document;
mod snapshot;
pub mod vega_lite;

pub use composer::{ChartComposer, compose, compose_with};
pub use composer_config::{ComposerConfig, EmbedAssets};
pub use document::ChartDocument;
pub use snapshot::{CompositionSnapshot, HistogramBin, ScatterPoint};
pub use vega_lite::CompositionSpec;
