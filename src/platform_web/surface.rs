use tokio::sync::watch;

use crate::error::ExplorerResult;
use crate::interaction::SurfaceFrame;
use crate::render::Surface;

/// Surface backed by a `watch` channel; handlers read the latest frame.
#[derive(Debug)]
pub struct WatchSurface {
    sender: watch::Sender<Option<SurfaceFrame>>,
}

impl WatchSurface {
    #[must_use]
    pub fn channel() -> (Self, watch::Receiver<Option<SurfaceFrame>>) {
        let (sender, receiver) = watch::channel(None);
        (Self { sender }, receiver)
    }
}

impl Surface for WatchSurface {
    fn present(&mut self, frame: &SurfaceFrame) -> ExplorerResult<()> {
        self.sender.send_replace(Some(frame.clone()));
        Ok(())
    }
}
