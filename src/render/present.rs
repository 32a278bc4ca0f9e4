//! Per-frame presentation policy
//!
//! A frame whose GPU output is unavailable is skipped, never fatal: the
//! simulation keeps running and the frame subscription stays armed.

use super::batch::ShapeBatch;

/// Something that can put a batch on screen
pub trait Presenter {
    fn present(&mut self, batch: &ShapeBatch) -> Result<(), wgpu::SurfaceError>;
    /// Rebuild the swapchain after it was lost or went stale
    fn reconfigure(&mut self);
}

/// What happened to one frame's batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    /// No renderer (WebGPU never came up)
    Skipped,
    /// Surface lost or outdated; reconfigured for the next frame
    Reconfigured,
    /// Timeout, out of memory or any other surface failure
    Dropped,
}

impl FrameOutcome {
    pub fn was_drawn(self) -> bool {
        self == FrameOutcome::Presented
    }
}

/// Present `batch` if a renderer is available
pub fn present_frame<P: Presenter>(presenter: Option<&mut P>, batch: &ShapeBatch) -> FrameOutcome {
    let Some(presenter) = presenter else {
        return FrameOutcome::Skipped;
    };
    match presenter.present(batch) {
        Ok(()) => FrameOutcome::Presented,
        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
            presenter.reconfigure();
            FrameOutcome::Reconfigured
        }
        Err(wgpu::SurfaceError::OutOfMemory) => {
            log::error!("Out of memory!");
            FrameOutcome::Dropped
        }
        Err(e) => {
            log::warn!("Render error: {:?}", e);
            FrameOutcome::Dropped
        }
    }
}
