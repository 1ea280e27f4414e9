use super::{CompositionSnapshot, CompositionSpec};
use crate::error::{ExplorerError, ExplorerResult};

/// Self-contained chart artifact: the spec, what it plots, and the markup
/// that renders it.
///
/// Produced fresh for every selection and consumed immediately by the chart
/// surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDocument {
    spec: CompositionSpec,
    snapshot: CompositionSnapshot,
    html: String,
}

impl ChartDocument {
    pub(crate) fn new(spec: CompositionSpec, snapshot: CompositionSnapshot, html: String) -> Self {
        Self {
            spec,
            snapshot,
            html,
        }
    }

    #[must_use]
    pub fn spec(&self) -> &CompositionSpec {
        &self.spec
    }

    #[must_use]
    pub fn snapshot(&self) -> &CompositionSnapshot {
        &self.snapshot
    }

    /// Standalone HTML document, suitable for an iframe `srcdoc`.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    #[must_use]
    pub fn into_html(self) -> String {
        self.html
    }

    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.spec.panel_count()
    }

    pub fn spec_json_pretty(&self) -> ExplorerResult<String> {
        serde_json::to_string_pretty(&self.spec).map_err(|e| {
            ExplorerError::Serialization(format!("failed to serialize chart spec: {e}"))
        })
    }
}
