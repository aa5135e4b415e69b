//! Configuration loading for Naksha
//!
//! Every section is optional. Settings left unset in `[transform]`,
//! `[motion]` and `[render]` follow the selected feed: the live mailbox maps
//! in descending degree order with a fixed forward heading and the forward
//! camera; replay maps in ascending order with recorded headings and the
//! overhead camera.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::types::ScanOrder;
use crate::engine::{AcceptancePolicy, IngestionConfig, RetryPolicy};
use crate::error::{ConfigError, FeedError};
use crate::io::feed::{JsonMailboxFeed, ReplayFeed, ScanFeed};
use crate::mapping::CameraConvention;
use crate::render::SvgSettings;
use crate::sensors::{FixedHeading, HeadingProvider, RecordedHeading};

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "naksha.toml";

/// Main configuration structure
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NakshaConfig {
    pub feed: FeedConfig,
    pub replay: ReplayConfig,
    pub motion: MotionConfig,
    pub transform: TransformConfig,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

/// Live mailbox feed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// JSON file overwritten by the producer (default: lidar_scans.json)
    pub path: PathBuf,

    /// Poll interval while the file is absent, in milliseconds (default: 50)
    pub poll_interval_ms: u64,

    /// Delay after a scan with no new motion, in milliseconds (default: 10)
    pub stale_poll_interval_ms: u64,

    pub retry: RetryConfig,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("lidar_scans.json"),
            poll_interval_ms: 50,
            stale_poll_interval_ms: 10,
            retry: RetryConfig::default(),
        }
    }
}

/// Decode-failure retry settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Consecutive failures retried without delay (default: 3)
    pub immediate_retries: u32,

    /// Delay between retries after that, in milliseconds (default: 10)
    pub backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            immediate_retries: policy.immediate_retries,
            backoff_ms: policy.backoff.as_millis() as u64,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            immediate_retries: self.immediate_retries,
            backoff: Duration::from_millis(self.backoff_ms),
        }
    }
}

/// Offline replay. Setting `path` selects replay instead of the live feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Recorded `{heading,distance} [ranges]` file
    pub path: Option<PathBuf>,

    /// Delay after each replayed scan, in milliseconds (default: 1000, 0 = no pacing)
    pub pacing_ms: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            path: None,
            pacing_ms: 1000,
        }
    }
}

/// Dead-reckoning heading
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Heading used when the scan carries none, in degrees (default: 90)
    pub heading_degrees: f32,

    /// Use per-scan headings when present (default: true for replay only)
    pub use_recorded_heading: Option<bool>,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            heading_degrees: crate::sensors::heading::FORWARD_HEADING_DEG,
            use_recorded_heading: None,
        }
    }
}

/// Polar-to-Cartesian conversion
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Degree iteration order: "descending" or "ascending"
    pub order: Option<ScanOrder>,
}

/// SVG output
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output image path (default: lidar_map.svg)
    pub output: PathBuf,

    /// Camera convention: "forward" or "overhead"
    pub camera: Option<CameraConvention>,

    pub width: u32,
    pub height: u32,
    pub point_color: String,
    pub title: String,
    pub point_radius: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let svg = SvgSettings::default();
        Self {
            output: PathBuf::from("lidar_map.svg"),
            camera: None,
            width: svg.width,
            height: svg.height,
            point_color: svg.point_color,
            title: svg.title,
            point_radius: svg.point_radius,
        }
    }
}

/// Logging
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `env_logger` filter used when RUST_LOG is unset (default: info)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl NakshaConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Resolve the configuration to use.
    ///
    /// An explicit path must be readable. Without one, [`DEFAULT_CONFIG_FILE`]
    /// in the working directory is used if it exists, otherwise defaults.
    /// Returns the file that was loaded, if any.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            return Ok((Self::load(fallback)?, Some(fallback.to_path_buf())));
        }
        Ok((Self::default(), None))
    }

    /// True when scans come from a replay file rather than the live mailbox.
    pub fn is_replay(&self) -> bool {
        self.replay.path.is_some()
    }

    pub fn scan_order(&self) -> ScanOrder {
        self.transform.order.unwrap_or(if self.is_replay() {
            ScanOrder::Ascending
        } else {
            ScanOrder::Descending
        })
    }

    pub fn camera(&self) -> CameraConvention {
        self.render.camera.unwrap_or(if self.is_replay() {
            CameraConvention::Overhead
        } else {
            CameraConvention::Forward
        })
    }

    /// Every replayed line is a new scan; the mailbox is gated on motion.
    pub fn acceptance_policy(&self) -> AcceptancePolicy {
        if self.is_replay() {
            AcceptancePolicy::EveryScan
        } else {
            AcceptancePolicy::MotionGated
        }
    }

    pub fn ingestion_config(&self) -> IngestionConfig {
        IngestionConfig {
            poll_interval: Duration::from_millis(self.feed.poll_interval_ms),
            stale_poll_interval: Duration::from_millis(self.feed.stale_poll_interval_ms),
            retry: self.feed.retry.to_policy(),
            camera: self.camera(),
        }
    }

    pub fn heading_provider(&self) -> Box<dyn HeadingProvider> {
        let recorded = self.motion.use_recorded_heading.unwrap_or(self.is_replay());
        if recorded {
            Box::new(RecordedHeading::new(self.motion.heading_degrees))
        } else {
            Box::new(FixedHeading::new(self.motion.heading_degrees))
        }
    }

    /// Open the configured scan feed.
    pub fn open_feed(&self) -> Result<Box<dyn ScanFeed>, FeedError> {
        match &self.replay.path {
            Some(path) => {
                let pacing = Some(Duration::from_millis(self.replay.pacing_ms))
                    .filter(|p| !p.is_zero());
                Ok(Box::new(ReplayFeed::open(path)?.with_pacing(pacing)))
            }
            None => Ok(Box::new(JsonMailboxFeed::new(&self.feed.path))),
        }
    }

    pub fn svg_settings(&self) -> SvgSettings {
        SvgSettings {
            width: self.render.width,
            height: self.render.height,
            point_color: self.render.point_color.clone(),
            point_radius: self.render.point_radius,
            title: self.render.title.clone(),
            ..SvgSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = NakshaConfig::from_toml_str("").unwrap();
        assert_eq!(config, NakshaConfig::default());
        assert_eq!(config.feed.path, PathBuf::from("lidar_scans.json"));
        assert_eq!(config.feed.poll_interval_ms, 50);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_live_defaults() {
        let config = NakshaConfig::default();
        assert!(!config.is_replay());
        assert_eq!(config.scan_order(), ScanOrder::Descending);
        assert_eq!(config.camera(), CameraConvention::Forward);
        assert_eq!(config.acceptance_policy(), AcceptancePolicy::MotionGated);
        assert_eq!(config.heading_provider().name(), "fixed");

        let ingestion = config.ingestion_config();
        assert_eq!(ingestion.poll_interval, Duration::from_millis(50));
        assert_eq!(ingestion.retry, RetryPolicy::default());
    }

    #[test]
    fn test_replay_defaults() {
        let config = NakshaConfig::from_toml_str(
            r#"
            [replay]
            path = "scans.txt"
            "#,
        )
        .unwrap();
        assert!(config.is_replay());
        assert_eq!(config.scan_order(), ScanOrder::Ascending);
        assert_eq!(config.camera(), CameraConvention::Overhead);
        assert_eq!(config.acceptance_policy(), AcceptancePolicy::EveryScan);
        assert_eq!(config.heading_provider().name(), "recorded");
    }

    #[test]
    fn test_explicit_settings_override_feed_defaults() {
        let config = NakshaConfig::from_toml_str(
            r##"
            [feed]
            path = "/tmp/scan.json"
            stale_poll_interval_ms = 0

            [feed.retry]
            immediate_retries = 5
            backoff_ms = 20

            [motion]
            heading_degrees = 0.0
            use_recorded_heading = true

            [transform]
            order = "ascending"

            [render]
            output = "out/map.svg"
            camera = "overhead"
            point_color = "#00FF00"
            width = 1024
            "##,
        )
        .unwrap();

        assert!(!config.is_replay());
        assert_eq!(config.scan_order(), ScanOrder::Ascending);
        assert_eq!(config.camera(), CameraConvention::Overhead);
        assert_eq!(config.heading_provider().name(), "recorded");

        let ingestion = config.ingestion_config();
        assert_eq!(ingestion.stale_poll_interval, Duration::ZERO);
        assert_eq!(ingestion.retry.immediate_retries, 5);
        assert_eq!(ingestion.retry.backoff, Duration::from_millis(20));

        let svg = config.svg_settings();
        assert_eq!(svg.width, 1024);
        assert_eq!(svg.height, 600);
        assert_eq!(svg.point_color, "#00FF00");
    }

    #[test]
    fn test_unknown_order_is_parse_error() {
        let err = NakshaConfig::from_toml_str("[transform]\norder = \"sideways\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = NakshaConfig::discover(Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_discover_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

        let (config, source) = NakshaConfig::discover(Some(path.as_path())).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_open_feed_selects_source() {
        let dir = TempDir::new().unwrap();
        let mut config = NakshaConfig::default();
        config.feed.path = dir.path().join("lidar_scans.json");
        assert!(config.open_feed().unwrap().describe().starts_with("mailbox"));

        let replay = dir.path().join("scans.txt");
        fs::write(&replay, "{90,0} [1,2,3]\n").unwrap();
        config.replay.path = Some(replay);
        config.replay.pacing_ms = 0;
        let feed = config.open_feed().unwrap();
        assert!(feed.describe().starts_with("replay"));
        assert_eq!(feed.pacing(), None);
    }

    #[test]
    fn test_missing_replay_file_is_error() {
        let dir = TempDir::new().unwrap();
        let mut config = NakshaConfig::default();
        config.replay.path = Some(dir.path().join("missing.txt"));
        assert!(matches!(config.open_feed(), Err(FeedError::Io(_))));
    }
}
