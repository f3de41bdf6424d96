//! Crop plans and pixel regions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Dimensions;

/// How a frame is cut down to the target aspect ratio.
///
/// Boundaries are exact and may be fractional when the trimmed amount is
/// odd. `x1 == width - x2` (or `y1 == height - y2`) always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CropPlan {
    /// Source already matches the target ratio
    NoOp,
    /// Keep the centered horizontal band `x1..x2`
    CropWidth { x1: f64, x2: f64 },
    /// Keep the centered vertical band `y1..y2`
    CropHeight { y1: f64, y2: f64 },
}

impl CropPlan {
    pub fn is_noop(&self) -> bool {
        matches!(self, CropPlan::NoOp)
    }

    /// Integer pixel rectangle for this plan on a frame of `dims`.
    ///
    /// Each fractional boundary is truncated toward zero on its own, the same
    /// way a frame slice `[int(x1)..int(x2)]` is taken. A 1-pixel minimum is
    /// kept on the cropped axis.
    pub fn region(&self, dims: Dimensions) -> CropRegion {
        match *self {
            CropPlan::NoOp => CropRegion::full(dims),
            CropPlan::CropWidth { x1, x2 } => {
                let (start, len) = truncate_span(x1, x2, dims.width());
                CropRegion {
                    x: start,
                    y: 0,
                    width: len,
                    height: dims.height(),
                }
            }
            CropPlan::CropHeight { y1, y2 } => {
                let (start, len) = truncate_span(y1, y2, dims.height());
                CropRegion {
                    x: 0,
                    y: start,
                    width: dims.width(),
                    height: len,
                }
            }
        }
    }
}

fn truncate_span(lo: f64, hi: f64, extent: u32) -> (u32, u32) {
    let start = (lo.max(0.0) as u32).min(extent.saturating_sub(1));
    let end = (hi.max(0.0) as u32).min(extent);
    (start, end.saturating_sub(start).max(1))
}

impl fmt::Display for CropPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CropPlan::NoOp => write!(f, "no-op"),
            CropPlan::CropWidth { x1, x2 } => write!(f, "crop width x1={} x2={}", x1, x2),
            CropPlan::CropHeight { y1, y2 } => write!(f, "crop height y1={} y2={}", y1, y2),
        }
    }
}

/// Integer crop rectangle in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    /// The whole frame.
    pub fn full(dims: Dimensions) -> Self {
        Self {
            x: 0,
            y: 0,
            width: dims.width(),
            height: dims.height(),
        }
    }

    pub fn is_full_frame(&self, dims: Dimensions) -> bool {
        *self == Self::full(dims)
    }
}
