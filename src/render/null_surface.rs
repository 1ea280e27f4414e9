use crate::error::{ExplorerError, ExplorerResult};
use crate::interaction::SurfaceFrame;
use crate::render::Surface;

/// Headless surface used by tests and embedding without a web front end.
///
/// It still validates frames so tests catch empty documents or out-of-order
/// publication.
#[derive(Debug, Default)]
pub struct NullSurface {
    pub presented_generations: Vec<u64>,
    pub last_frame: Option<SurfaceFrame>,
}

impl Surface for NullSurface {
    fn present(&mut self, frame: &SurfaceFrame) -> ExplorerResult<()> {
        if frame.html().trim().is_empty() {
            return Err(ExplorerError::InvalidData(
                "surface frame html must not be empty".to_owned(),
            ));
        }
        if let Some(last) = self.presented_generations.last() {
            if frame.generation < *last {
                return Err(ExplorerError::InvalidData(format!(
                    "frame generation {} is older than presented generation {last}",
                    frame.generation
                )));
            }
        }
        self.presented_generations.push(frame.generation);
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
