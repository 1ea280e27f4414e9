//! Static page structure: two axis dropdowns and one chart surface.

use serde::{Deserialize, Serialize};

use crate::core::{MeasurementColumn, descriptors};
use crate::error::{ExplorerError, ExplorerResult};
use crate::interaction::{Axis, Selection};

pub const X_AXIS_SELECTOR_ID: &str = "x-axis-selector";
pub const Y_AXIS_SELECTOR_ID: &str = "y-axis-selector";
pub const CHART_SURFACE_ID: &str = "chart-surface";

pub const CHART_ENDPOINT: &str = "/chart";
pub const SELECTION_ENDPOINT: &str = "/api/selection";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_surface_width")]
    pub surface_width: u32,
    #[serde(default = "default_surface_height")]
    pub surface_height: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            surface_width: default_surface_width(),
            surface_height: default_surface_height(),
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> ExplorerResult<()> {
        if self.surface_width == 0 || self.surface_height == 0 {
            return Err(ExplorerError::InvalidConfig(format!(
                "chart surface size must be > 0: width={}, height={}",
                self.surface_width, self.surface_height
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dropdown {
    pub id: &'static str,
    pub axis: Axis,
    pub label: &'static str,
    pub options: Vec<DropdownOption>,
    /// Selected registry key; `None` when the current key is not in the registry.
    pub value: Option<String>,
}

/// Placeholder the chart documents are pushed into (an iframe).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSurfaceSlot {
    pub id: &'static str,
    pub width: u32,
    pub height: u32,
    pub sandbox: &'static str,
    pub initial_src: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLayout {
    pub title: String,
    pub x_axis: Dropdown,
    pub y_axis: Dropdown,
    pub surface: ChartSurfaceSlot,
    pub selection_endpoint: &'static str,
}

impl PageLayout {
    /// Builds the page with every registry column offered on both axes and
    /// `selection` preselected.
    #[must_use]
    pub fn build(config: &LayoutConfig, selection: &Selection) -> Self {
        Self {
            title: config.title.clone(),
            x_axis: axis_dropdown(Axis::X, &selection.x),
            y_axis: axis_dropdown(Axis::Y, &selection.y),
            surface: ChartSurfaceSlot {
                id: CHART_SURFACE_ID,
                width: config.surface_width,
                height: config.surface_height,
                sandbox: "allow-scripts",
                initial_src: CHART_ENDPOINT,
            },
            selection_endpoint: SELECTION_ENDPOINT,
        }
    }

    #[must_use]
    pub fn dropdowns(&self) -> [&Dropdown; 2] {
        [&self.x_axis, &self.y_axis]
    }
}

fn axis_dropdown(axis: Axis, value: &str) -> Dropdown {
    let (id, label) = match axis {
        Axis::X => (X_AXIS_SELECTOR_ID, "x-axis"),
        Axis::Y => (Y_AXIS_SELECTOR_ID, "y-axis"),
    };
    Dropdown {
        id,
        axis,
        label,
        options: descriptors()
            .into_iter()
            .map(|descriptor| DropdownOption {
                label: descriptor.label.to_owned(),
                value: descriptor.key.to_owned(),
            })
            .collect(),
        value: MeasurementColumn::from_key(value)
            .ok()
            .map(|column| column.key().to_owned()),
    }
}

fn default_title() -> String {
    "Penguin Explorer".to_owned()
}

fn default_surface_width() -> u32 {
    1000
}

fn default_surface_height() -> u32 {
    500
}
