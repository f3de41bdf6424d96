//! FFmpeg video filter construction.

use vcrop_models::{CropPlan, CropRegion, Dimensions};

/// `crop=w:h:x:y` for an integer region.
pub fn crop_filter(region: &CropRegion) -> String {
    format!(
        "crop={}:{}:{}:{}",
        region.width, region.height, region.x, region.y
    )
}

/// Video filter for a plan, or `None` when the frame is kept whole.
pub fn build_video_filter(plan: &CropPlan, dims: Dimensions) -> Option<String> {
    let region = plan.region(dims);
    if region.is_full_frame(dims) {
        return None;
    }
    Some(crop_filter(&region))
}
