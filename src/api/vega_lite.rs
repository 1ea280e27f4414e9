//! Typed subset of the Vega-Lite v5 grammar used by the explorer.
//!
//! Only the constructs the two-panel composition needs are modeled; field
//! names follow the Vega-Lite JSON schema so `serde_json` output can be handed
//! to `vega-embed` unchanged.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::Record;

pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Top-level horizontal concatenation sharing one named dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionSpec {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub config: ViewConfig,
    pub data: NamedData,
    pub datasets: IndexMap<String, Vec<Record>>,
    pub hconcat: Vec<PanelSpec>,
}

impl CompositionSpec {
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.hconcat.len()
    }

    /// Rows of the shared dataset both panels read from.
    #[must_use]
    pub fn shared_rows(&self) -> &[Record] {
        self.datasets
            .get(&self.data.name)
            .map_or(&[], Vec::as_slice)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub view: ViewSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSize {
    pub continuous_width: u32,
    pub continuous_height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedData {
    pub name: String,
}

/// One unit view of the concatenation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSpec {
    pub mark: Mark,
    pub encoding: Encoding,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<SelectionParam>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<FilterTransform>,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: MarkType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    Point,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encoding {
    pub x: PositionChannel,
    pub y: PositionChannel,
    pub color: ColorChannel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionChannel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(rename = "type")]
    pub kind: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<Aggregate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin: Option<BinParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<ScaleParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl PositionChannel {
    /// Continuous axis over a field.
    #[must_use]
    pub fn quantitative(field: &str) -> Self {
        Self {
            field: Some(field.to_owned()),
            kind: FieldType::Quantitative,
            aggregate: None,
            bin: None,
            scale: None,
            title: None,
        }
    }

    /// Record count, the `count()` shorthand.
    #[must_use]
    pub fn count() -> Self {
        Self {
            field: None,
            kind: FieldType::Quantitative,
            aggregate: Some(Aggregate::Count),
            bin: None,
            scale: None,
            title: Some("Count of Records".to_owned()),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_owned());
        self
    }

    /// Keeps the data's natural range instead of forcing a zero baseline.
    #[must_use]
    pub fn without_zero_baseline(mut self) -> Self {
        self.scale = Some(ScaleParams { zero: false });
        self
    }

    #[must_use]
    pub fn binned(mut self, maxbins: u32) -> Self {
        self.bin = Some(BinParams { maxbins });
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Quantitative,
    Nominal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinParams {
    pub maxbins: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleParams {
    pub zero: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorChannel {
    pub field: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
}

/// Interactive selection attached to a unit view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionParam {
    pub name: String,
    pub select: IntervalSelect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalSelect {
    #[serde(rename = "type")]
    pub kind: SelectionKind,
    pub encodings: Vec<EncodingChannel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionKind {
    Interval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingChannel {
    X,
    Y,
}

/// `{"filter": {"param": <name>}}`: keeps rows inside the named selection.
///
/// An empty selection keeps every row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterTransform {
    pub filter: ParamPredicate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamPredicate {
    pub param: String,
}
