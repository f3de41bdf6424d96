//! Shared data models for vcrop.
//!
//! This crate provides Serde-serializable types for:
//! - Target aspect ratios and their `W:H` parser
//! - Probed frame dimensions
//! - Crop plans and the pixel regions derived from them
//! - Accepted container formats
//! - The fixed encoding profile

pub mod crop;
pub mod dimensions;
pub mod encoding;
pub mod format;
pub mod ratio;

// Re-export common types
pub use crop::{CropPlan, CropRegion};
pub use dimensions::{Dimensions, DimensionsError};
pub use encoding::EncodingConfig;
pub use format::{ContainerFormat, UnsupportedContainer};
pub use ratio::{AspectRatio, AspectRatioParseError};
