//! Batch metrics.
//!
//! Recorded through the `metrics` facade; nothing is exported unless the
//! embedding process installs a recorder.

use metrics::{counter, histogram};

/// Metric names as constants for consistency.
pub mod names {
    pub const BATCHES_TOTAL: &str = "vcrop_batches_total";
    pub const BATCHES_REJECTED_TOTAL: &str = "vcrop_batches_rejected_total";
    pub const VIDEOS_PROCESSED_TOTAL: &str = "vcrop_videos_processed_total";
    pub const VIDEOS_FAILED_TOTAL: &str = "vcrop_videos_failed_total";
    pub const RENDER_DURATION_SECONDS: &str = "vcrop_render_duration_seconds";
}

/// Record a batch that ran or was turned away (`reason` is `"count"` or
/// `"ratio"` for rejections).
pub fn record_batch(rejected: Option<&'static str>) {
    match rejected {
        None => counter!(names::BATCHES_TOTAL).increment(1),
        Some(reason) => counter!(names::BATCHES_REJECTED_TOTAL, "reason" => reason).increment(1),
    }
}

/// Record a video that finished, labelled by plan kind.
pub fn record_video_processed(plan_kind: &'static str) {
    counter!(names::VIDEOS_PROCESSED_TOTAL, "plan" => plan_kind).increment(1);
}

/// Record a video that failed at `stage`.
pub fn record_video_failed(stage: &'static str) {
    counter!(names::VIDEOS_FAILED_TOTAL, "stage" => stage).increment(1);
}

/// Record wall time spent in FFmpeg for one video.
pub fn record_render_duration(duration_secs: f64) {
    histogram!(names::RENDER_DURATION_SECONDS).record(duration_secs);
}
