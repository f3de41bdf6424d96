//! Media backend seam between the batch loop and FFmpeg.

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use vcrop_media::{probe_video, render_crop, FfmpegProgress, FfmpegRunner, MediaResult, VideoInfo};
use vcrop_models::{CropPlan, EncodingConfig};

use crate::logging::ItemLogger;

/// Everything needed to materialize one planned video.
#[derive(Debug, Clone, Copy)]
pub struct RenderJob<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub plan: &'a CropPlan,
    pub info: &'a VideoInfo,
}

/// Probing and rendering, the two blocking steps of a batch item.
#[async_trait]
pub trait MediaBackend: Send + Sync {
    /// Read the frame size (and duration) of `input`.
    async fn probe(&self, input: &Path) -> MediaResult<VideoInfo>;

    /// Write the cropped, re-encoded video.
    async fn render(&self, job: RenderJob<'_>, logger: &ItemLogger) -> MediaResult<()>;
}

/// Backend driving the `ffprobe` and `ffmpeg` binaries.
#[derive(Debug, Clone)]
pub struct FfmpegBackend {
    encoding: EncodingConfig,
    runner: FfmpegRunner,
}

impl FfmpegBackend {
    pub fn new(ffmpeg_timeout: Duration) -> Self {
        Self {
            encoding: EncodingConfig::default(),
            runner: FfmpegRunner::new().with_timeout(ffmpeg_timeout),
        }
    }
}

#[async_trait]
impl MediaBackend for FfmpegBackend {
    async fn probe(&self, input: &Path) -> MediaResult<VideoInfo> {
        probe_video(input).await
    }

    async fn render(&self, job: RenderJob<'_>, logger: &ItemLogger) -> MediaResult<()> {
        let total_ms = job.info.duration_ms();
        let reporter = ProgressReporter::new(logger.clone(), total_ms);

        render_crop(
            job.input,
            job.output,
            job.plan,
            job.info.dimensions,
            &self.encoding,
            &self.runner,
            move |progress| reporter.report(&progress),
        )
        .await
    }
}

/// Logs encode progress in quarter steps.
struct ProgressReporter {
    logger: ItemLogger,
    total_ms: i64,
    last_quarter: AtomicU8,
}

impl ProgressReporter {
    fn new(logger: ItemLogger, total_ms: i64) -> Self {
        Self {
            logger,
            total_ms,
            last_quarter: AtomicU8::new(0),
        }
    }

    fn report(&self, progress: &FfmpegProgress) {
        let percent = progress.percentage(self.total_ms);
        let quarter = (percent / 25.0).floor() as u8;
        if quarter > self.last_quarter.fetch_max(quarter, Ordering::Relaxed) {
            self.logger
                .log_progress(&format!("encoding {:.0}% (speed {:.2}x)", percent, progress.speed));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_reporter_only_advances() {
        let reporter = ProgressReporter::new(ItemLogger::new(Uuid::new_v4(), 0), 10_000);
        let at = |ms| FfmpegProgress {
            out_time_ms: ms,
            ..Default::default()
        };

        reporter.report(&at(3_000));
        assert_eq!(reporter.last_quarter.load(Ordering::Relaxed), 1);
        reporter.report(&at(1_000));
        assert_eq!(reporter.last_quarter.load(Ordering::Relaxed), 1);
        reporter.report(&at(10_000));
        assert_eq!(reporter.last_quarter.load(Ordering::Relaxed), 4);
    }
}
