//! Single-slot, latest-wins frame channel.
//!
//! Built on a `bounded(1)` crossbeam channel. The publisher keeps its own
//! receiver handle so it can evict a frame the render thread has not picked
//! up yet; frames are never queued behind one another.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError, bounded};

use super::frame::RenderFrame;

/// Create a connected publisher/receiver pair.
pub fn frame_slot() -> (FramePublisher, FrameReceiver) {
    let (tx, rx) = bounded(1);
    let evicted = Arc::new(AtomicU64::new(0));
    (
        FramePublisher {
            tx,
            evict: rx.clone(),
            evicted: Arc::clone(&evicted),
        },
        FrameReceiver { rx, evicted },
    )
}

/// Producer side, owned by the ingestion loop.
pub struct FramePublisher {
    tx: Sender<RenderFrame>,
    evict: Receiver<RenderFrame>,
    evicted: Arc<AtomicU64>,
}

impl FramePublisher {
    /// Publish a frame, replacing any frame still waiting in the slot.
    ///
    /// Never blocks. Returns `true` if an unrendered frame was evicted.
    pub fn publish(&self, frame: RenderFrame) -> bool {
        let mut frame = frame;
        let mut evicted = false;
        loop {
            match self.tx.try_send(frame) {
                Ok(()) => return evicted,
                Err(TrySendError::Full(rejected)) => {
                    // The render thread may win the race for the old frame
                    if self.evict.try_recv().is_ok() {
                        self.evicted.fetch_add(1, Ordering::Relaxed);
                        evicted = true;
                    }
                    frame = rejected;
                }
                // Unreachable while `evict` is alive
                Err(TrySendError::Disconnected(_)) => return evicted,
            }
        }
    }

    /// Frames dropped before they were rendered.
    pub fn evicted(&self) -> u64 {
        self.evicted.load(Ordering::Relaxed)
    }
}

/// Consumer side, owned by the render thread.
pub struct FrameReceiver {
    rx: Receiver<RenderFrame>,
    evicted: Arc<AtomicU64>,
}

impl FrameReceiver {
    /// Wait up to `timeout` for the next frame.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<RenderFrame, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    /// Take the pending frame, if any.
    pub fn try_recv(&self) -> Option<RenderFrame> {
        self.rx.try_recv().ok()
    }

    /// Frames dropped before they were rendered.
    pub fn evicted(&self) -> u64 {
        self.evicted.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Point3D, Translation};
    use crate::mapping::{CameraConvention, MapAccumulator};

    fn frame(sequence: u64, points: usize) -> RenderFrame {
        let mut map = MapAccumulator::new();
        map.append((0..points).map(|i| Point3D::planar(i as f32, 0.0)));
        RenderFrame::new(
            sequence,
            map.snapshot(),
            Translation::origin(),
            CameraConvention::Forward,
        )
    }

    #[test]
    fn test_latest_frame_wins() {
        let (publisher, receiver) = frame_slot();
        assert!(!publisher.publish(frame(1, 1)));
        for seq in 2..=5 {
            assert!(publisher.publish(frame(seq, seq as usize)));
        }

        let received = receiver.try_recv().unwrap();
        assert_eq!(received.sequence, 5);
        assert_eq!(received.point_count(), 5);
        assert!(receiver.try_recv().is_none());
        assert_eq!(publisher.evicted(), 4);
        assert_eq!(receiver.evicted(), 4);
    }

    #[test]
    fn test_publish_never_blocks_without_receiver() {
        let (publisher, receiver) = frame_slot();
        drop(receiver);
        assert!(!publisher.publish(frame(1, 1)));
        assert!(publisher.publish(frame(2, 1)));
        assert_eq!(publisher.evicted(), 1);
    }

    #[test]
    fn test_receiver_disconnects_when_publisher_dropped() {
        let (publisher, receiver) = frame_slot();
        publisher.publish(frame(1, 2));
        drop(publisher);

        assert_eq!(receiver.recv_timeout(Duration::from_millis(10)).unwrap().sequence, 1);
        assert!(matches!(
            receiver.recv_timeout(Duration::from_millis(10)),
            Err(RecvTimeoutError::Disconnected)
        ));
    }
}
