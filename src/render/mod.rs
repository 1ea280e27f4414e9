mod chart_html;
mod null_surface;
mod page;

pub use chart_html::{EMBED_ELEMENT_ID, error_document, escape_html, render_chart_document};
pub use null_surface::NullSurface;
pub use page::render_page;

use crate::error::ExplorerResult;
use crate::interaction::SurfaceFrame;

/// Contract implemented by anything that displays chart frames.
///
/// The binder hands over fully materialized frames so display code stays
/// isolated from composition and selection logic.
pub trait Surface {
    fn present(&mut self, frame: &SurfaceFrame) -> ExplorerResult<()>;
}
