use serde::{Deserialize, Serialize};

use crate::core::MeasurementColumn;
use crate::error::{ExplorerError, ExplorerResult};

/// Script assets the standalone chart document loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedAssets {
    #[serde(default = "default_cdn_base")]
    pub cdn_base: String,
    #[serde(default = "default_vega_version")]
    pub vega: String,
    #[serde(default = "default_vega_lite_version")]
    pub vega_lite: String,
    #[serde(default = "default_vega_embed_version")]
    pub vega_embed: String,
}

impl Default for EmbedAssets {
    fn default() -> Self {
        Self {
            cdn_base: default_cdn_base(),
            vega: default_vega_version(),
            vega_lite: default_vega_lite_version(),
            vega_embed: default_vega_embed_version(),
        }
    }
}

impl EmbedAssets {
    /// Script URLs in load order.
    #[must_use]
    pub fn script_urls(&self) -> [String; 3] {
        let base = self.cdn_base.trim_end_matches('/');
        [
            format!("{base}/vega@{}", self.vega),
            format!("{base}/vega-lite@{}", self.vega_lite),
            format!("{base}/vega-embed@{}", self.vega_embed),
        ]
    }
}

/// Chart composition settings.
///
/// Serializable so hosts can persist/load them alongside the rest of the app
/// config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerConfig {
    #[serde(default = "default_panel_width")]
    pub panel_width: u32,
    #[serde(default = "default_panel_height")]
    pub panel_height: u32,
    /// Field of the brushed histogram, fixed regardless of the axis selection.
    #[serde(default = "default_histogram_column")]
    pub histogram_column: MeasurementColumn,
    #[serde(default = "default_max_bins")]
    pub max_bins: u32,
    #[serde(default = "default_brush_name")]
    pub brush_name: String,
    #[serde(default = "default_dataset_name")]
    pub dataset_name: String,
    #[serde(default)]
    pub embed: EmbedAssets,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            panel_width: default_panel_width(),
            panel_height: default_panel_height(),
            histogram_column: default_histogram_column(),
            max_bins: default_max_bins(),
            brush_name: default_brush_name(),
            dataset_name: default_dataset_name(),
            embed: EmbedAssets::default(),
        }
    }
}

impl ComposerConfig {
    #[must_use]
    pub fn with_panel_size(mut self, width: u32, height: u32) -> Self {
        self.panel_width = width;
        self.panel_height = height;
        self
    }

    #[must_use]
    pub fn with_histogram_column(mut self, column: MeasurementColumn) -> Self {
        self.histogram_column = column;
        self
    }

    #[must_use]
    pub fn with_max_bins(mut self, max_bins: u32) -> Self {
        self.max_bins = max_bins;
        self
    }

    pub fn validate(&self) -> ExplorerResult<()> {
        if self.panel_width == 0 || self.panel_height == 0 {
            return Err(ExplorerError::InvalidConfig(format!(
                "panel size must be > 0: width={}, height={}",
                self.panel_width, self.panel_height
            )));
        }
        if self.max_bins == 0 {
            return Err(ExplorerError::InvalidConfig(
                "max_bins must be >= 1".to_owned(),
            ));
        }
        if !is_identifier(&self.brush_name) {
            return Err(ExplorerError::InvalidConfig(format!(
                "brush name `{}` must be a non-empty identifier",
                self.brush_name
            )));
        }
        if self.dataset_name.trim().is_empty() {
            return Err(ExplorerError::InvalidConfig(
                "dataset name must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ExplorerResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ExplorerError::Serialization(format!("failed to serialize composer config: {e}"))
        })
    }

    /// Deserializes config from JSON; missing fields take their defaults.
    pub fn from_json_str(input: &str) -> ExplorerResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ExplorerError::InvalidConfig(format!("failed to parse composer config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn default_panel_width() -> u32 {
    300
}

fn default_panel_height() -> u32 {
    400
}

fn default_histogram_column() -> MeasurementColumn {
    MeasurementColumn::BodyMass
}

fn default_max_bins() -> u32 {
    10
}

fn default_brush_name() -> String {
    "brush".to_owned()
}

fn default_dataset_name() -> String {
    "penguins".to_owned()
}

fn default_cdn_base() -> String {
    "https://cdn.jsdelivr.net/npm".to_owned()
}

fn default_vega_version() -> String {
    "5".to_owned()
}

fn default_vega_lite_version() -> String {
    "5.20.1".to_owned()
}

fn default_vega_embed_version() -> String {
    "6".to_owned()
}
