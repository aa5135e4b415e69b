//! Mapping session: the translation, the map and the first-scan flag.
//!
//! The session is owned by the caller and handed to the ingestion loop on
//! every step. Nothing here touches the feed or sleeps; `offer` is the whole
//! accept/transform/append/advance sequence for one decoded scan.

use serde::{Deserialize, Serialize};

use crate::core::types::{Scan, ScanOrder, Translation};
use crate::mapping::{MapAccumulator, MapSnapshot, TranslationTracker};
use crate::sensors::{CoordinateTransformer, HeadingProvider};

/// Rule deciding whether a decoded scan is integrated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptancePolicy {
    /// Accept the first scan of the session, then only scans reporting motion.
    ///
    /// A mailbox that has not been overwritten since the last poll still
    /// holds the previous scan; it reports zero motion and is skipped.
    #[default]
    MotionGated,
    /// Accept every scan. Used for replay, where each line is a new scan.
    EveryScan,
}

/// What one accepted scan did to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanUpdate {
    /// Points appended to the map.
    pub points_added: usize,
    /// Map size after the append.
    pub map_len: usize,
    /// Translation the scan was projected from.
    pub translation_before: Translation,
    /// Translation after integrating the scan's motion.
    pub translation_after: Translation,
}

/// Caller-owned mapping state.
#[derive(Debug)]
pub struct MappingSession {
    transformer: CoordinateTransformer,
    policy: AcceptancePolicy,
    translation: Translation,
    map: MapAccumulator,
    first_scan_pending: bool,
}

impl MappingSession {
    /// Start a session at the origin with an empty map.
    pub fn new(transformer: CoordinateTransformer, policy: AcceptancePolicy) -> Self {
        Self {
            transformer,
            policy,
            translation: Translation::origin(),
            map: MapAccumulator::new(),
            first_scan_pending: true,
        }
    }

    /// Whether `scan` would be accepted right now.
    pub fn should_accept(&self, scan: &Scan) -> bool {
        match self.policy {
            AcceptancePolicy::EveryScan => true,
            AcceptancePolicy::MotionGated => self.first_scan_pending || scan.has_motion(),
        }
    }

    /// Integrate `scan` if the acceptance policy allows it.
    ///
    /// The scan is projected from the translation held *before* its own
    /// motion is applied. Returns `None` (and leaves the session untouched)
    /// when the scan is rejected.
    pub fn offer(&mut self, scan: &Scan, heading: &mut dyn HeadingProvider) -> Option<ScanUpdate> {
        if !self.should_accept(scan) {
            return None;
        }

        let before = self.translation;
        let valid = self.transformer.valid_reading_count(scan);
        let points = self.transformer.transform(scan, &before);
        let points_added = self.map.append(points);

        let heading_deg = heading.heading_degrees(scan);
        self.translation = TranslationTracker::advance(&before, scan.distance_traveled, heading_deg);
        self.first_scan_pending = false;

        log::debug!(
            "Accepted scan #{}: {}/{} readings valid, {} points (map {}), heading={} moved {:.3} -> ({:.3}, {:.3})",
            self.accepted(),
            valid,
            scan.len(),
            points_added,
            self.map.len(),
            heading_deg,
            self.translation.distance(&before),
            self.translation.x,
            self.translation.y
        );

        Some(ScanUpdate {
            points_added,
            map_len: self.map.len(),
            translation_before: before,
            translation_after: self.translation,
        })
    }

    /// Current translation.
    #[inline]
    pub fn translation(&self) -> Translation {
        self.translation
    }

    /// Immutable view of the map.
    pub fn snapshot(&self) -> MapSnapshot {
        self.map.snapshot()
    }

    #[inline]
    pub fn map_len(&self) -> usize {
        self.map.len()
    }

    /// Scans accepted so far.
    #[inline]
    pub fn accepted(&self) -> u64 {
        self.map.total_appends()
    }

    /// True until the first scan has been accepted.
    #[inline]
    pub fn first_scan_pending(&self) -> bool {
        self.first_scan_pending
    }

    #[inline]
    pub fn policy(&self) -> AcceptancePolicy {
        self.policy
    }

    /// Degree order scans are converted in.
    #[inline]
    pub fn scan_order(&self) -> ScanOrder {
        self.transformer.order()
    }
}

impl Default for MappingSession {
    fn default() -> Self {
        Self::new(CoordinateTransformer::default(), AcceptancePolicy::default())
    }
}
