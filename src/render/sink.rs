//! Render sink abstraction.

use super::frame::RenderFrame;
use crate::error::RenderError;

/// Consumer of rendered frames.
///
/// A sink owns its render surface. The surface is acquired when the sink is
/// constructed and released when the sink is dropped, which the
/// [`RenderThread`](super::RenderThread) guarantees on every exit path.
pub trait RenderSink: Send {
    /// Draw one frame.
    fn render(&mut self, frame: &RenderFrame) -> Result<(), RenderError>;

    /// Flush anything buffered before the surface is released.
    fn close(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    /// Short name for logging.
    fn name(&self) -> &'static str;
}

/// Sink that only logs a summary of every frame.
#[derive(Debug, Default)]
pub struct LogRenderSink {
    frames: u64,
}

impl LogRenderSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderSink for LogRenderSink {
    fn render(&mut self, frame: &RenderFrame) -> Result<(), RenderError> {
        self.frames += 1;
        match &frame.framing {
            Some(framing) => log::info!(
                "Frame {}: {} points, pose=({:.3}, {:.3}), look_at=({:.3}, {:.3}), zoom={:.4}",
                frame.sequence,
                frame.point_count(),
                frame.translation.x,
                frame.translation.y,
                framing.look_at.x,
                framing.look_at.y,
                framing.zoom
            ),
            None => log::info!(
                "Frame {}: empty map, pose=({:.3}, {:.3})",
                frame.sequence,
                frame.translation.x,
                frame.translation.y
            ),
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
