//! Sequential batch processing.
//!
//! A batch is a fixed number of videos and one target ratio. Videos are
//! handled strictly one after another, in input order. A failure on one
//! video is reported and the loop moves on to the next; only a bad ratio
//! stops the batch, and it does so before any video is touched.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use vcrop_media::fs_utils::move_file;
use vcrop_media::plan_for;
use vcrop_models::{AspectRatio, ContainerFormat, CropPlan, CropRegion, Dimensions};

use crate::backend::{MediaBackend, RenderJob};
use crate::config::WorkerConfig;
use crate::context::ItemContext;
use crate::error::{WorkerError, WorkerResult};
use crate::metrics;

/// Result of asking for a batch to run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BatchOutcome {
    /// The input count did not match; nothing was planned.
    WrongCount { expected: usize, received: usize },
    /// Every video was attempted.
    Completed(BatchReport),
}

/// Per-video results of a batch, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub target: AspectRatio,
    pub items: Vec<ItemReport>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.status.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemReport {
    pub index: usize,
    pub item_id: Uuid,
    pub input: PathBuf,
    #[serde(flatten)]
    pub status: ItemStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemStatus {
    Succeeded {
        dimensions: Dimensions,
        plan: CropPlan,
        region: CropRegion,
        output: PathBuf,
    },
    Failed {
        stage: &'static str,
        error: String,
    },
}

impl ItemStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ItemStatus::Succeeded { .. })
    }
}

/// Runs batches against a [`MediaBackend`].
pub struct BatchProcessor<B> {
    config: WorkerConfig,
    backend: B,
}

impl<B: MediaBackend> BatchProcessor<B> {
    pub fn new(config: WorkerConfig, backend: B) -> Self {
        Self { config, backend }
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Process `inputs` toward the ratio given as `ratio_text`.
    ///
    /// # Errors
    /// [`WorkerError::InvalidRatio`] when the ratio text does not parse, and
    /// I/O errors when the work or output directory cannot be created. Per-video
    /// failures are reported in the returned [`BatchReport`].
    pub async fn run(&self, ratio_text: &str, inputs: &[PathBuf]) -> WorkerResult<BatchOutcome> {
        if inputs.len() != self.config.batch_size {
            info!(
                "Expected exactly {} videos, got {}; nothing to do",
                self.config.batch_size,
                inputs.len()
            );
            metrics::record_batch(Some("count"));
            return Ok(BatchOutcome::WrongCount {
                expected: self.config.batch_size,
                received: inputs.len(),
            });
        }

        let target = ratio_text.parse::<AspectRatio>().inspect_err(|_| {
            metrics::record_batch(Some("ratio"));
        })?;

        tokio::fs::create_dir_all(&self.config.work_dir).await?;
        tokio::fs::create_dir_all(&self.config.output_dir).await?;
        metrics::record_batch(None);
        info!("Cropping {} videos to {}", inputs.len(), target);

        let mut items = Vec::with_capacity(inputs.len());
        for (index, input) in inputs.iter().enumerate() {
            items.push(self.run_item(index, input, &target).await);
        }

        let report = BatchReport { target, items };
        info!(
            "Batch finished: {} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        );
        Ok(BatchOutcome::Completed(report))
    }

    async fn run_item(&self, index: usize, input: &Path, target: &AspectRatio) -> ItemReport {
        let ctx = match ItemContext::new(index, input, &self.config.work_dir) {
            Ok(ctx) => ctx,
            Err(e) => {
                let err = WorkerError::from(e);
                warn!("Could not allocate scratch space for video {}: {}", index + 1, err);
                metrics::record_video_failed(err.stage());
                return ItemReport {
                    index,
                    item_id: Uuid::nil(),
                    input: input.to_path_buf(),
                    status: ItemStatus::Failed {
                        stage: err.stage(),
                        error: err.to_string(),
                    },
                };
            }
        };

        let logger = ctx.logger();
        let span = logger.create_span();

        let status = match self.process_item(&ctx, target).instrument(span).await {
            Ok(status) => status,
            Err(err) => {
                logger.log_error(&err.to_string());
                metrics::record_video_failed(err.stage());
                ItemStatus::Failed {
                    stage: err.stage(),
                    error: err.to_string(),
                }
            }
        };

        ItemReport {
            index,
            item_id: ctx.item_id,
            input: ctx.input.clone(),
            status,
        }
    }

    async fn process_item(&self, ctx: &ItemContext, target: &AspectRatio) -> WorkerResult<ItemStatus> {
        let logger = ctx.logger();
        logger.log_start(&ctx.input.display().to_string());

        ContainerFormat::from_path(&ctx.input).map_err(|source| WorkerError::UnsupportedFormat {
            index: ctx.index,
            source,
        })?;

        let info = self
            .backend
            .probe(&ctx.input)
            .await
            .map_err(|e| WorkerError::probe(ctx.index, e))?;
        let dimensions = info.dimensions;
        logger.log_progress(&format!("original dimensions {}", dimensions));

        let plan = plan_for(dimensions, target);
        let region = plan.region(dimensions);
        if plan.is_noop() {
            logger.log_warning("already has the desired aspect ratio, re-encoding only");
        } else {
            logger.log_progress(&format!(
                "{} -> {}x{} at ({}, {})",
                plan, region.width, region.height, region.x, region.y
            ));
        }

        let scratch_output = ctx.scratch_output();
        let started = Instant::now();
        self.backend
            .render(
                RenderJob {
                    input: &ctx.input,
                    output: &scratch_output,
                    plan: &plan,
                    info: &info,
                },
                &logger,
            )
            .await
            .map_err(|e| WorkerError::render(ctx.index, e))?;
        metrics::record_render_duration(started.elapsed().as_secs_f64());

        let output = self.config.output_dir.join(ctx.output_file_name());
        move_file(&scratch_output, &output)
            .await
            .map_err(|e| WorkerError::render(ctx.index, e))?;

        logger.log_completion(&output.display().to_string());
        metrics::record_video_processed(plan_kind(&plan));

        Ok(ItemStatus::Succeeded {
            dimensions,
            plan,
            region,
            output,
        })
    }
}

fn plan_kind(plan: &CropPlan) -> &'static str {
    match plan {
        CropPlan::NoOp => "no_op",
        CropPlan::CropWidth { .. } => "crop_width",
        CropPlan::CropHeight { .. } => "crop_height",
    }
}
