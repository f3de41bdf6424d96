//! Applying a crop plan with FFmpeg.

use std::path::Path;
use tracing::info;

use vcrop_models::{CropPlan, Dimensions, EncodingConfig};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;
use crate::filters::build_video_filter;
use crate::progress::FfmpegProgress;

/// Re-encode `input` into `output`, cropping according to `plan`.
///
/// A [`CropPlan::NoOp`] still re-encodes with `encoding` so every output
/// shares one profile.
pub async fn render_crop<F>(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    plan: &CropPlan,
    dims: Dimensions,
    encoding: &EncodingConfig,
    runner: &FfmpegRunner,
    progress_callback: F,
) -> MediaResult<()>
where
    F: Fn(FfmpegProgress) + Send + 'static,
{
    let input = input.as_ref();
    let output = output.as_ref();

    let mut cmd = FfmpegCommand::new(input, output);
    if let Some(filter) = build_video_filter(plan, dims) {
        cmd = cmd.video_filter(filter);
    }
    let cmd = cmd.encoding(encoding);

    info!(
        "Rendering {} -> {} ({})",
        input.display(),
        cmd.output_path().display(),
        plan
    );

    runner.run_with_progress(&cmd, progress_callback).await
}
