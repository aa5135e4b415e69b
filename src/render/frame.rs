//! Frame handed from the ingestion loop to the render sink.

use crate::core::types::Translation;
use crate::mapping::{CameraConvention, CameraFraming, MapSnapshot};

/// Immutable snapshot of the map plus everything a viewer needs to show it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    /// Monotonic frame counter, starting at 1.
    pub sequence: u64,
    /// Map as of the accepted scan that produced this frame.
    pub snapshot: MapSnapshot,
    /// Camera framing, `None` while the map is empty.
    pub framing: Option<CameraFraming>,
    /// Translation after the scan was integrated.
    pub translation: Translation,
}

impl RenderFrame {
    /// Build a frame and its framing from a snapshot.
    pub fn new(
        sequence: u64,
        snapshot: MapSnapshot,
        translation: Translation,
        convention: CameraConvention,
    ) -> Self {
        let framing = CameraFraming::for_snapshot(&snapshot, convention);
        Self {
            sequence,
            snapshot,
            framing,
            translation,
        }
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.snapshot.len()
    }
}
