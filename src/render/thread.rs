//! Render thread.
//!
//! Owns the [`RenderSink`] and drains the frame slot until the publisher is
//! dropped or the thread is asked to stop. Dropping the [`RenderThread`]
//! handle stops and joins the thread, so the sink (and its surface) is
//! released whether the caller returns normally, bails out with an error or
//! unwinds from a panic.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;

use super::frame::RenderFrame;
use super::sink::RenderSink;
use super::slot::FrameReceiver;
use crate::error::RenderError;

/// How long the render thread waits for a frame before re-checking the stop flag.
const RECV_TIMEOUT: Duration = Duration::from_millis(50);

/// Counters reported when the render thread exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames handed to the sink successfully.
    pub frames_rendered: u64,
    /// Frames the sink failed to draw.
    pub render_errors: u64,
    /// Frames replaced in the slot before they could be drawn.
    pub frames_evicted: u64,
}

/// Render thread handle.
pub struct RenderThread {
    handle: Option<JoinHandle<RenderStats>>,
    stop: Arc<AtomicBool>,
}

impl RenderThread {
    /// Spawn the render thread, moving the sink into it.
    pub fn spawn(sink: Box<dyn RenderSink>, receiver: FrameReceiver) -> Result<Self, RenderError> {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("render".into())
            .spawn(move || run_render_loop(sink, receiver, thread_stop))?;

        Ok(Self {
            handle: Some(handle),
            stop,
        })
    }

    /// Stop the thread after it draws any pending frame, and wait for it.
    ///
    /// Returns `None` if the render thread panicked.
    pub fn shutdown(mut self) -> Option<RenderStats> {
        self.stop_and_join()
    }

    fn stop_and_join(&mut self) -> Option<RenderStats> {
        let handle = self.handle.take()?;
        self.stop.store(true, Ordering::Relaxed);
        match handle.join() {
            Ok(stats) => Some(stats),
            Err(e) => {
                log::error!("Render thread panicked: {:?}", e);
                None
            }
        }
    }
}

impl Drop for RenderThread {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

fn run_render_loop(
    mut sink: Box<dyn RenderSink>,
    receiver: FrameReceiver,
    stop: Arc<AtomicBool>,
) -> RenderStats {
    log::info!("Render thread started ({} sink)", sink.name());
    let mut stats = RenderStats::default();

    while !stop.load(Ordering::Relaxed) {
        match receiver.recv_timeout(RECV_TIMEOUT) {
            Ok(frame) => draw(sink.as_mut(), &frame, &mut stats),
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    // Show the final map even if the stop request raced the last publish
    if let Some(frame) = receiver.try_recv() {
        draw(sink.as_mut(), &frame, &mut stats);
    }

    if let Err(e) = sink.close() {
        log::warn!("Render sink close failed: {}", e);
    }
    stats.frames_evicted = receiver.evicted();

    log::info!(
        "Render thread stopped ({} frames, {} errors, {} evicted)",
        stats.frames_rendered,
        stats.render_errors,
        stats.frames_evicted
    );
    stats
}

fn draw(sink: &mut dyn RenderSink, frame: &RenderFrame, stats: &mut RenderStats) {
    match sink.render(frame) {
        Ok(()) => stats.frames_rendered += 1,
        Err(e) => {
            stats.render_errors += 1;
            log::warn!("Failed to render frame {}: {}", frame.sequence, e);
        }
    }
}
