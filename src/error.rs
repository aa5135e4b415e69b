//! Error types for Naksha.
//!
//! Only render-surface acquisition at startup is fatal. Feed errors are
//! transient by nature: the ingestion loop counts them and retries.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to read or decode one poll of a feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// I/O error while reading the feed
    #[error("I/O error reading feed: {0}")]
    Io(#[from] std::io::Error),

    /// Record was unreadable, usually because the producer is mid-write
    #[error("Failed to decode scan record: {0}")]
    Decode(#[from] serde_json::Error),

    /// Replay line did not match `{heading,distance} [r0,...]`
    #[error("Malformed replay line {line}: {reason}")]
    MalformedLine {
        /// 1-based line number
        line: usize,
        /// What was wrong with it
        reason: String,
    },
}

/// Render surface errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Could not acquire the render surface at startup
    #[error("Cannot open render surface {path}: {source}")]
    Surface {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a frame failed
    #[error("I/O error writing frame: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Naksha error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
