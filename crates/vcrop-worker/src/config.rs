//! Worker configuration.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Number of videos a batch must contain.
pub const DEFAULT_BATCH_SIZE: usize = 3;
/// FFmpeg wall-clock limit per video.
pub const DEFAULT_FFMPEG_TIMEOUT_SECS: u64 = 3600;

/// Worker configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Root for per-video scratch directories
    pub work_dir: PathBuf,
    /// Where finished outputs are published
    pub output_dir: PathBuf,
    /// Exact number of inputs a batch must have
    pub batch_size: usize,
    /// FFmpeg timeout per video
    pub ffmpeg_timeout: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            work_dir: std::env::temp_dir().join("vcrop"),
            output_dir: PathBuf::from("."),
            batch_size: DEFAULT_BATCH_SIZE,
            ffmpeg_timeout: Duration::from_secs(DEFAULT_FFMPEG_TIMEOUT_SECS),
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let batch_size = match parse_var::<usize, _>(&lookup, "VCROP_BATCH_SIZE") {
            Some(0) => {
                warn!("VCROP_BATCH_SIZE must be positive, using {}", DEFAULT_BATCH_SIZE);
                DEFAULT_BATCH_SIZE
            }
            Some(n) => n,
            None => defaults.batch_size,
        };

        Self {
            work_dir: lookup("VCROP_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_dir),
            output_dir: lookup("VCROP_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            batch_size,
            ffmpeg_timeout: Duration::from_secs(
                parse_var(&lookup, "VCROP_FFMPEG_TIMEOUT_SECS")
                    .unwrap_or(DEFAULT_FFMPEG_TIMEOUT_SECS),
            ),
        }
    }

    /// Override the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Override the scratch root.
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }
}

/// Read `key` and parse it, warning when the value is present but malformed.
fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}
