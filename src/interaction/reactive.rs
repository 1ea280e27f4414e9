use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::trace;

use crate::api::ChartComposer;
use crate::error::ExplorerResult;
use crate::render::Surface;

use super::{BinderPhase, RenderTicket, Selection, SelectionBinder, SelectionChange};

struct BinderState<S> {
    machine: SelectionBinder,
    surface: S,
}

/// Connects selection changes to the composer and a surface.
///
/// Composition runs outside the lock; only the state machine and the surface
/// are guarded, so at most one render is in flight and frames reach the
/// surface in generation order.
pub struct ReactiveBinder<S: Surface> {
    composer: ChartComposer,
    state: Mutex<BinderState<S>>,
}

impl<S: Surface> ReactiveBinder<S> {
    /// Creates the binder and renders the default selection immediately.
    pub fn new(composer: ChartComposer, surface: S) -> ExplorerResult<Self> {
        Self::with_selection(composer, surface, Selection::default())
    }

    pub fn with_selection(
        composer: ChartComposer,
        surface: S,
        selection: Selection,
    ) -> ExplorerResult<Self> {
        let binder = Self {
            composer,
            state: Mutex::new(BinderState {
                machine: SelectionBinder::new(selection),
                surface,
            }),
        };

        let ticket = binder.lock().machine.request_render();
        if let Some(ticket) = ticket {
            binder.run(ticket)?;
        }
        Ok(binder)
    }

    /// Applies a change and renders unless a running render will pick it up.
    ///
    /// Returns the generation assigned to the change; once it returns, the
    /// surface shows that generation or a newer one, or a render for it is
    /// still in flight on another caller.
    pub fn dispatch(&self, change: SelectionChange) -> ExplorerResult<u64> {
        let outcome = self.lock().machine.on_change(change);
        if let Some(ticket) = outcome.ticket {
            self.run(ticket)?;
        }
        Ok(outcome.generation)
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.lock().machine.selection().clone()
    }

    #[must_use]
    pub fn phase(&self) -> BinderPhase {
        self.lock().machine.phase()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.lock().machine.generation()
    }

    #[must_use]
    pub fn composer(&self) -> &ChartComposer {
        &self.composer
    }

    /// Runs `f` against the surface under the binder lock.
    pub fn with_surface<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        f(&self.lock().surface)
    }

    fn run(&self, mut ticket: RenderTicket) -> ExplorerResult<()> {
        loop {
            trace!(generation = ticket.generation, "rendering selection");
            let result = self
                .composer
                .compose(&ticket.selection.x, &ticket.selection.y);

            let mut state = self.lock();
            let completion = state.machine.complete(ticket, result);
            if let Some(frame) = &completion.frame {
                state.surface.present(frame)?;
            }
            match completion.next {
                Some(next) => ticket = next,
                None => return Ok(()),
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, BinderState<S>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
