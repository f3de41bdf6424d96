//! Accepted input container formats.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Containers accepted as batch input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContainerFormat {
    Mp4,
    Avi,
    Mov,
    Mkv,
}

impl ContainerFormat {
    pub const ALL: &'static [ContainerFormat] = &[
        ContainerFormat::Mp4,
        ContainerFormat::Avi,
        ContainerFormat::Mov,
        ContainerFormat::Mkv,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            ContainerFormat::Mp4 => "mp4",
            ContainerFormat::Avi => "avi",
            ContainerFormat::Mov => "mov",
            ContainerFormat::Mkv => "mkv",
        }
    }

    /// Detect the container from a file extension (case-insensitive).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, UnsupportedContainer> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        Self::ALL
            .iter()
            .copied()
            .find(|f| f.extension() == ext)
            .ok_or_else(|| UnsupportedContainer(path.display().to_string()))
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported container for {0}: expected one of mp4, avi, mov, mkv")]
pub struct UnsupportedContainer(pub String);
