//! Selection state and the render state machine behind the dropdowns.

mod reactive;

use std::borrow::Cow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::ChartDocument;
use crate::core::MeasurementColumn;
use crate::error::ExplorerResult;
use crate::render::error_document;

pub use reactive::ReactiveBinder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

/// Current `(x, y)` key pair.
///
/// Keys are kept as delivered by the UI; the composer rejects unknown ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub x: String,
    pub y: String,
}

impl Default for Selection {
    /// Two distinct measurements, so the first chart is never an identity scatter.
    fn default() -> Self {
        Self {
            x: MeasurementColumn::FlipperLength.key().to_owned(),
            y: MeasurementColumn::BillLength.key().to_owned(),
        }
    }
}

impl Selection {
    #[must_use]
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    #[must_use]
    pub fn key(&self, axis: Axis) -> &str {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    pub fn apply(&mut self, change: &SelectionChange) {
        match change.axis {
            Axis::X => self.x.clone_from(&change.key),
            Axis::Y => self.y.clone_from(&change.key),
        }
    }
}

/// One dropdown value change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionChange {
    pub axis: Axis,
    pub key: String,
}

impl SelectionChange {
    #[must_use]
    pub fn new(axis: Axis, key: impl Into<String>) -> Self {
        Self {
            axis,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn x(key: impl Into<String>) -> Self {
        Self::new(Axis::X, key)
    }

    #[must_use]
    pub fn y(key: impl Into<String>) -> Self {
        Self::new(Axis::Y, key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinderPhase {
    Idle,
    Rendering,
}

/// Permission to compose one selection; handed back through `complete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTicket {
    pub generation: u64,
    pub selection: Selection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeOutcome {
    /// Generation assigned to the change.
    pub generation: u64,
    /// `None` when a render is already running; it will pick the change up.
    pub ticket: Option<RenderTicket>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceContent {
    Chart(Arc<ChartDocument>),
    Error { message: String },
}

/// What the chart surface shows for one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceFrame {
    pub generation: u64,
    pub selection: Selection,
    pub content: SurfaceContent,
}

impl SurfaceFrame {
    /// Markup for the surface: the chart document or a visible error indicator.
    #[must_use]
    pub fn html(&self) -> Cow<'_, str> {
        match &self.content {
            SurfaceContent::Chart(document) => Cow::Borrowed(document.html()),
            SurfaceContent::Error { message } => Cow::Owned(error_document(message)),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.content, SurfaceContent::Error { .. })
    }

    #[must_use]
    pub fn document(&self) -> Option<&ChartDocument> {
        match &self.content {
            SurfaceContent::Chart(document) => Some(document),
            SurfaceContent::Error { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Frame to present; `None` when the result was superseded.
    pub frame: Option<SurfaceFrame>,
    /// Follow-up render for changes recorded while rendering.
    pub next: Option<RenderTicket>,
}

/// Two-phase render state machine.
///
/// Changes arriving while a render is running only update the selection; the
/// running render is then superseded and the latest selection rendered next,
/// so the surface is last-write-wins and never shows a stale result.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionBinder {
    phase: BinderPhase,
    selection: Selection,
    generation: u64,
}

impl Default for SelectionBinder {
    fn default() -> Self {
        Self::new(Selection::default())
    }
}

impl SelectionBinder {
    #[must_use]
    pub fn new(selection: Selection) -> Self {
        Self {
            phase: BinderPhase::Idle,
            selection,
            generation: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> BinderPhase {
        self.phase
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a render of the current selection if none is running.
    pub fn request_render(&mut self) -> Option<RenderTicket> {
        match self.phase {
            BinderPhase::Idle => {
                self.phase = BinderPhase::Rendering;
                Some(self.current_ticket())
            }
            BinderPhase::Rendering => None,
        }
    }

    pub fn on_change(&mut self, change: SelectionChange) -> ChangeOutcome {
        self.selection.apply(&change);
        self.generation += 1;
        debug!(
            axis = change.axis.as_str(),
            key = %change.key,
            generation = self.generation,
            phase = ?self.phase,
            "selection changed"
        );
        ChangeOutcome {
            generation: self.generation,
            ticket: self.request_render(),
        }
    }

    /// Finishes the render started by `ticket`.
    pub fn complete(
        &mut self,
        ticket: RenderTicket,
        result: ExplorerResult<ChartDocument>,
    ) -> Completion {
        if ticket.generation < self.generation {
            debug!(
                stale = ticket.generation,
                latest = self.generation,
                "dropping superseded render"
            );
            self.phase = BinderPhase::Rendering;
            return Completion {
                frame: None,
                next: Some(self.current_ticket()),
            };
        }

        self.phase = BinderPhase::Idle;
        let content = match result {
            Ok(document) => SurfaceContent::Chart(Arc::new(document)),
            Err(err) => {
                warn!(
                    error = %err,
                    x = %ticket.selection.x,
                    y = %ticket.selection.y,
                    "chart render failed"
                );
                SurfaceContent::Error {
                    message: err.to_string(),
                }
            }
        };
        Completion {
            frame: Some(SurfaceFrame {
                generation: ticket.generation,
                selection: ticket.selection,
                content,
            }),
            next: None,
        }
    }

    fn current_ticket(&self) -> RenderTicket {
        RenderTicket {
            generation: self.generation,
            selection: self.selection.clone(),
        }
    }
}
