//! Ingestion state machine.
//!
//! ```text
//!            absent                    decode failed / rejected
//!   ┌──────────────────┐           ┌───────────────────────────┐
//!   ▼                  │           │                           ▼
//! Waiting ──present──► Ready ──────┘                         Stale
//!   ▲                    ▲                                     │
//!   │                    └──────────── accepted ───────────────┘
//!   └───────────────────── absent (from any state) ────────────┘
//! ```
//!
//! [`IngestionLoop::step`] performs exactly one poll and never sleeps, so the
//! machine can be driven directly in tests. [`IngestionLoop::run`] adds the
//! delays, publishes frames and watches the shutdown flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use super::retry::RetryPolicy;
use super::session::MappingSession;
use crate::error::FeedError;
use crate::io::feed::{FeedRead, ScanFeed};
use crate::mapping::CameraConvention;
use crate::render::{FramePublisher, RenderFrame};
use crate::sensors::HeadingProvider;

/// Longest single sleep before the shutdown flag is checked again.
const SLEEP_SLICE: Duration = Duration::from_millis(50);

/// Feed state as of the last poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionState {
    /// The feed source does not exist.
    Waiting,
    /// The feed exists and its latest contents were integrated.
    Ready,
    /// The feed exists but the last poll brought nothing new.
    Stale,
}

/// Result of a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Feed absent.
    Waiting,
    /// Scan integrated into the session.
    Accepted { points_added: usize, map_len: usize },
    /// Scan decoded but carried no new information.
    Rejected,
    /// Feed present but unreadable this time.
    DecodeFailed,
    /// Feed has ended.
    Exhausted,
}

/// Ingestion counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestionStats {
    pub polls: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub decode_failures: u64,
    pub longest_failure_streak: u32,
    pub waiting_notices: u64,
    pub points_added: u64,
}

/// Timing and framing for the ingestion loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngestionConfig {
    /// Delay between polls while the feed is absent.
    pub poll_interval: Duration,
    /// Delay after a rejected scan. Zero re-polls immediately.
    pub stale_poll_interval: Duration,
    /// Retry policy for decode failures.
    pub retry: RetryPolicy,
    /// Camera convention for published frames.
    pub camera: CameraConvention,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(50),
            stale_poll_interval: Duration::from_millis(10),
            retry: RetryPolicy::default(),
            camera: CameraConvention::default(),
        }
    }
}

/// Polls a [`ScanFeed`] and feeds accepted scans into a [`MappingSession`].
pub struct IngestionLoop {
    feed: Box<dyn ScanFeed>,
    heading: Box<dyn HeadingProvider>,
    config: IngestionConfig,
    state: IngestionState,
    stats: IngestionStats,
    failure_streak: u32,
    frames: u64,
}

impl IngestionLoop {
    pub fn new(
        feed: Box<dyn ScanFeed>,
        heading: Box<dyn HeadingProvider>,
        config: IngestionConfig,
    ) -> Self {
        Self {
            feed,
            heading,
            config,
            state: IngestionState::Ready,
            stats: IngestionStats::default(),
            failure_streak: 0,
            frames: 0,
        }
    }

    /// Poll the feed once and apply the result to `session`.
    pub fn step(&mut self, session: &mut MappingSession) -> PollOutcome {
        self.stats.polls += 1;

        let read = match self.feed.read() {
            Ok(read) => read,
            Err(e) => return self.on_failure(e),
        };

        let scan = match read {
            FeedRead::Absent => return self.on_absent(),
            FeedRead::Exhausted => return PollOutcome::Exhausted,
            FeedRead::Scan(scan) => scan,
        };

        self.failure_streak = 0;
        match session.offer(&scan, self.heading.as_mut()) {
            Some(update) => {
                self.state = IngestionState::Ready;
                self.stats.accepted += 1;
                self.stats.points_added += update.points_added as u64;
                PollOutcome::Accepted {
                    points_added: update.points_added,
                    map_len: update.map_len,
                }
            }
            None => {
                self.state = IngestionState::Stale;
                self.stats.rejected += 1;
                PollOutcome::Rejected
            }
        }
    }

    /// Poll until the feed is exhausted or `running` is cleared.
    ///
    /// Every accepted scan is published to `publisher` as a new frame; a
    /// frame the renderer has not picked up yet is replaced, never queued.
    pub fn run(
        &mut self,
        session: &mut MappingSession,
        publisher: &FramePublisher,
        running: &AtomicBool,
    ) -> IngestionStats {
        log::info!(
            "Ingestion started: {} ({:?} policy, {} order, {} heading, {} camera)",
            self.feed.describe(),
            session.policy(),
            session.scan_order(),
            self.heading.name(),
            self.config.camera
        );

        while running.load(Ordering::Relaxed) {
            let delay = match self.step(session) {
                PollOutcome::Waiting => Some(self.config.poll_interval),
                PollOutcome::Rejected => Some(self.config.stale_poll_interval),
                PollOutcome::DecodeFailed => self.config.retry.delay_for(self.failure_streak),
                PollOutcome::Accepted { .. } => {
                    if publisher.publish(self.frame(session)) {
                        log::trace!("Replaced unrendered frame");
                    }
                    self.feed.pacing()
                }
                PollOutcome::Exhausted => {
                    log::info!("Feed exhausted: {}", self.feed.describe());
                    break;
                }
            };

            if let Some(delay) = delay {
                sleep_while_running(delay, running);
            }
        }

        let stats = self.stats;
        log::info!(
            "Ingestion stopped: {} polls, {} accepted, {} rejected, {} decode failures (longest streak {}), {} points",
            stats.polls,
            stats.accepted,
            stats.rejected,
            stats.decode_failures,
            stats.longest_failure_streak,
            stats.points_added
        );
        stats
    }

    /// Build the next frame from the session's current map.
    pub fn frame(&mut self, session: &MappingSession) -> RenderFrame {
        self.frames += 1;
        RenderFrame::new(
            self.frames,
            session.snapshot(),
            session.translation(),
            self.config.camera,
        )
    }

    #[inline]
    pub fn state(&self) -> IngestionState {
        self.state
    }

    #[inline]
    pub fn stats(&self) -> IngestionStats {
        self.stats
    }

    /// Consecutive decode failures up to the last poll.
    #[inline]
    pub fn failure_streak(&self) -> u32 {
        self.failure_streak
    }

    fn on_absent(&mut self) -> PollOutcome {
        if self.state != IngestionState::Waiting {
            log::info!("Waiting for scan feed {} to populate...", self.feed.describe());
            self.stats.waiting_notices += 1;
            self.state = IngestionState::Waiting;
        }
        self.failure_streak = 0;
        PollOutcome::Waiting
    }

    fn on_failure(&mut self, error: FeedError) -> PollOutcome {
        self.state = IngestionState::Stale;
        self.stats.decode_failures += 1;
        self.failure_streak = self.failure_streak.saturating_add(1);
        self.stats.longest_failure_streak = self.stats.longest_failure_streak.max(self.failure_streak);

        match &error {
            FeedError::MalformedLine { .. } => log::warn!("Skipping {}", error),
            _ if self.config.retry.is_exhausted_at(self.failure_streak) => log::warn!(
                "{} consecutive read failures from {}, backing off {:?}: {}",
                self.failure_streak,
                self.feed.describe(),
                self.config.retry.backoff,
                error
            ),
            _ => log::debug!("Transient feed failure (streak {}): {}", self.failure_streak, error),
        }
        PollOutcome::DecodeFailed
    }
}

/// Sleep for `duration`, waking early once `running` is cleared.
fn sleep_while_running(duration: Duration, running: &AtomicBool) {
    if duration.is_zero() {
        return;
    }
    let deadline = Instant::now() + duration;
    while running.load(Ordering::Relaxed) {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        thread::sleep((deadline - now).min(SLEEP_SLICE));
    }
}
