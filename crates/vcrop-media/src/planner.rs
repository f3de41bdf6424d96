//! Center-crop planning for a target aspect ratio.
//!
//! The planner only ever removes pixels from one axis. The kept band is
//! centered, and its size on the cropped axis is derived from the untouched
//! axis with truncation (`floor`), never rounding. The trimmed amount is
//! split evenly between both sides without truncation, so boundaries can
//! land on half pixels.

use vcrop_models::{AspectRatio, CropPlan, Dimensions};

/// Absolute ratio difference under which a source is treated as already
/// matching the target.
pub const RATIO_TOLERANCE: f64 = 0.01;

/// Compute the crop plan for a frame of `dimensions` and a target ratio.
///
/// # Panics
/// If `target_ratio` is not finite and positive. Parsed [`AspectRatio`]
/// values always satisfy this; use [`plan_for`] to pass one directly.
pub fn plan_crop(dimensions: Dimensions, target_ratio: f64) -> CropPlan {
    assert!(
        target_ratio.is_finite() && target_ratio > 0.0,
        "target ratio must be finite and positive, got {}",
        target_ratio
    );

    let width = dimensions.width() as f64;
    let height = dimensions.height() as f64;
    let source_ratio = dimensions.ratio();

    if (source_ratio - target_ratio).abs() <= RATIO_TOLERANCE {
        return CropPlan::NoOp;
    }

    if source_ratio > target_ratio {
        // Wider than the target: keep full height, trim the sides.
        let new_width = (height * target_ratio).floor();
        let crop = (width - new_width) / 2.0;
        CropPlan::CropWidth {
            x1: crop,
            x2: width - crop,
        }
    } else {
        // Taller than the target: keep full width, trim top and bottom.
        let new_height = (width / target_ratio).floor();
        let crop = (height - new_height) / 2.0;
        CropPlan::CropHeight {
            y1: crop,
            y2: height - crop,
        }
    }
}

/// [`plan_crop`] with a parsed target ratio.
pub fn plan_for(dimensions: Dimensions, target: &AspectRatio) -> CropPlan {
    plan_crop(dimensions, target.as_f64())
}
