//! Target aspect ratio and its `W:H` parser.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Aspect ratio specification.
///
/// Both components are positive; a value of this type always yields a
/// finite ratio greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "RawAspectRatio")]
pub struct AspectRatio {
    width: u32,
    height: u32,
}

#[derive(Deserialize, JsonSchema)]
struct RawAspectRatio {
    width: u32,
    height: u32,
}

impl TryFrom<RawAspectRatio> for AspectRatio {
    type Error = AspectRatioParseError;

    fn try_from(raw: RawAspectRatio) -> Result<Self, Self::Error> {
        AspectRatio::new(raw.width, raw.height)
    }
}

impl AspectRatio {
    /// Widescreen (16:9)
    pub const WIDESCREEN: AspectRatio = AspectRatio {
        width: 16,
        height: 9,
    };

    /// Classic television (4:3)
    pub const STANDARD: AspectRatio = AspectRatio {
        width: 4,
        height: 3,
    };

    /// Square (1:1)
    pub const SQUARE: AspectRatio = AspectRatio {
        width: 1,
        height: 1,
    };

    /// Portrait (9:16)
    pub const PORTRAIT: AspectRatio = AspectRatio {
        width: 9,
        height: 16,
    };

    /// Create a new aspect ratio, rejecting zero components.
    pub fn new(width: u32, height: u32) -> Result<Self, AspectRatioParseError> {
        if width == 0 || height == 0 {
            return Err(AspectRatioParseError::NonPositive(format!(
                "{}:{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the aspect ratio as a decimal.
    pub fn as_f64(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

impl FromStr for AspectRatio {
    type Err = AspectRatioParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 2 {
            return Err(AspectRatioParseError::InvalidFormat(s.to_string()));
        }

        let width = parse_component(parts[0])?;
        let height = parse_component(parts[1])?;

        if width <= 0 || height <= 0 {
            return Err(AspectRatioParseError::NonPositive(s.to_string()));
        }

        let width = u32::try_from(width)
            .map_err(|_| AspectRatioParseError::InvalidNumber(parts[0].trim().to_string()))?;
        let height = u32::try_from(height)
            .map_err(|_| AspectRatioParseError::InvalidNumber(parts[1].trim().to_string()))?;

        Ok(AspectRatio { width, height })
    }
}

/// Parse one side of a `W:H` pair. Surrounding whitespace and a leading
/// sign are accepted; the sign is checked by the caller.
fn parse_component(part: &str) -> Result<i64, AspectRatioParseError> {
    let part = part.trim();
    part.parse::<i64>()
        .map_err(|_| AspectRatioParseError::InvalidNumber(part.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AspectRatioParseError {
    #[error("Invalid aspect ratio format: {0:?}, expected 'width:height' (e.g. 16:9)")]
    InvalidFormat(String),
    #[error("Invalid number in aspect ratio: {0:?}")]
    InvalidNumber(String),
    #[error("Non-positive or degenerate aspect ratio: {0:?}")]
    NonPositive(String),
}
