//! Batch loop tests against an in-memory media backend.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

use vcrop_media::{MediaError, MediaResult, VideoInfo};
use vcrop_models::{CropPlan, Dimensions};
use vcrop_worker::{
    BatchOutcome, BatchProcessor, BatchReport, ItemLogger, ItemStatus, MediaBackend, RenderJob,
    WorkerConfig, WorkerError,
};

#[derive(Default)]
struct FakeBackend {
    sizes: HashMap<PathBuf, (u32, u32)>,
    failing_renders: Vec<PathBuf>,
    calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    fn with_video(mut self, path: &str, width: u32, height: u32) -> Self {
        self.sizes.insert(PathBuf::from(path), (width, height));
        self
    }

    fn failing_render(mut self, path: &str) -> Self {
        self.failing_renders.push(PathBuf::from(path));
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaBackend for FakeBackend {
    async fn probe(&self, input: &Path) -> MediaResult<VideoInfo> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("probe {}", input.display()));

        let (width, height) = self
            .sizes
            .get(input)
            .copied()
            .ok_or_else(|| MediaError::FfprobeFailed {
                message: format!("cannot open {}", input.display()),
                stderr: None,
            })?;

        Ok(VideoInfo {
            dimensions: Dimensions::new(width, height).unwrap(),
            duration: 10.0,
            fps: 30.0,
            codec: "h264".to_string(),
        })
    }

    async fn render(&self, job: RenderJob<'_>, _logger: &ItemLogger) -> MediaResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("render {}", job.input.display()));

        if self.failing_renders.iter().any(|p| p == job.input) {
            return Err(MediaError::ffmpeg_failed("encoder exploded", None, Some(1)));
        }

        let body = serde_json::to_vec(job.plan).unwrap();
        tokio::fs::write(job.output, body).await?;
        Ok(())
    }
}

struct Harness {
    _root: TempDir,
    config: WorkerConfig,
}

impl Harness {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        let config = WorkerConfig::default()
            .with_work_dir(root.path().join("work"))
            .with_output_dir(root.path().join("out"));
        Self {
            _root: root,
            config,
        }
    }

    fn processor(&self, backend: FakeBackend) -> BatchProcessor<FakeBackend> {
        BatchProcessor::new(self.config.clone(), backend)
    }
}

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

fn completed(outcome: BatchOutcome) -> BatchReport {
    match outcome {
        BatchOutcome::Completed(report) => report,
        other => panic!("expected a completed batch, got {:?}", other),
    }
}

fn three_videos() -> FakeBackend {
    FakeBackend::default()
        .with_video("wide.mp4", 1920, 1080)
        .with_video("tall.mov", 1080, 1920)
        .with_video("square.mkv", 1000, 1000)
}

#[tokio::test]
async fn test_crops_three_videos_in_order() {
    let harness = Harness::new();
    let processor = harness.processor(three_videos());

    let inputs = paths(&["wide.mp4", "tall.mov", "square.mkv"]);
    let report = completed(processor.run("1:1", &inputs).await.unwrap());

    assert_eq!(report.items.len(), 3);
    assert_eq!(report.succeeded(), 3);
    assert_eq!(report.target.to_string(), "1:1");

    let expected_plans = [
        CropPlan::CropWidth {
            x1: 420.0,
            x2: 1500.0,
        },
        CropPlan::CropHeight {
            y1: 420.0,
            y2: 1500.0,
        },
        CropPlan::NoOp,
    ];

    for (i, item) in report.items.iter().enumerate() {
        assert_eq!(item.index, i);
        assert_eq!(item.input, inputs[i]);
        match &item.status {
            ItemStatus::Succeeded { plan, output, .. } => {
                assert_eq!(*plan, expected_plans[i]);
                assert_eq!(
                    *output,
                    harness.config.output_dir.join(format!("output_video_{}.mp4", i))
                );
                let written: CropPlan =
                    serde_json::from_slice(&std::fs::read(output).unwrap()).unwrap();
                assert_eq!(written, expected_plans[i]);
            }
            other => panic!("video {} failed: {:?}", i, other),
        }
    }

    let calls = processor_calls(&processor);
    assert_eq!(
        calls,
        vec![
            "probe wide.mp4",
            "render wide.mp4",
            "probe tall.mov",
            "render tall.mov",
            "probe square.mkv",
            "render square.mkv",
        ]
    );
}

fn processor_calls(processor: &BatchProcessor<FakeBackend>) -> Vec<String> {
    processor.backend().calls()
}

#[tokio::test]
async fn test_wrong_count_is_informational() {
    for count in [0usize, 1, 2, 4] {
        let harness = Harness::new();
        let processor = harness.processor(three_videos());
        let inputs: Vec<PathBuf> = (0..count).map(|i| PathBuf::from(format!("v{}.mp4", i))).collect();

        let outcome = processor.run("16:9", &inputs).await.unwrap();
        match outcome {
            BatchOutcome::WrongCount { expected, received } => {
                assert_eq!(expected, 3);
                assert_eq!(received, count);
            }
            other => panic!("expected WrongCount for {} inputs, got {:?}", count, other),
        }
        assert!(processor_calls(&processor).is_empty());
        assert!(!harness.config.output_dir.exists());
    }
}

#[tokio::test]
async fn test_wrong_count_wins_over_bad_ratio() {
    let harness = Harness::new();
    let processor = harness.processor(three_videos());
    let outcome = processor.run("abc", &paths(&["wide.mp4"])).await.unwrap();
    assert!(matches!(outcome, BatchOutcome::WrongCount { .. }));
}

#[tokio::test]
async fn test_bad_ratio_stops_before_any_video() {
    for ratio in ["abc", "16", "16:9:1", "0:9", "16:0", "-4:3"] {
        let harness = Harness::new();
        let processor = harness.processor(three_videos());
        let inputs = paths(&["wide.mp4", "tall.mov", "square.mkv"]);

        let result = processor.run(ratio, &inputs).await;
        assert!(
            matches!(result, Err(WorkerError::InvalidRatio(_))),
            "{} should be rejected",
            ratio
        );
        assert!(processor_calls(&processor).is_empty());
    }
}

#[tokio::test]
async fn test_probe_failure_is_isolated() {
    let harness = Harness::new();
    let backend = FakeBackend::default()
        .with_video("a.mp4", 1920, 1080)
        .with_video("c.mp4", 1280, 720);
    let processor = harness.processor(backend);

    let report = completed(
        processor
            .run("16:9", &paths(&["a.mp4", "unreadable.mp4", "c.mp4"]))
            .await
            .unwrap(),
    );

    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);
    match &report.items[1].status {
        ItemStatus::Failed { stage, error } => {
            assert_eq!(*stage, "probe");
            assert!(error.contains("video 2"), "{}", error);
        }
        other => panic!("expected probe failure, got {:?}", other),
    }
    assert!(!harness.config.output_dir.join("output_video_1.mp4").exists());
    assert!(harness.config.output_dir.join("output_video_2.mp4").exists());
}

#[tokio::test]
async fn test_unsupported_container_is_never_probed() {
    let harness = Harness::new();
    let backend = three_videos().with_video("clip.webm", 640, 480);
    let processor = harness.processor(backend);

    let report = completed(
        processor
            .run("4:3", &paths(&["wide.mp4", "clip.webm", "tall.mov"]))
            .await
            .unwrap(),
    );

    assert!(matches!(
        report.items[1].status,
        ItemStatus::Failed { stage: "intake", .. }
    ));
    assert!(!processor_calls(&processor).contains(&"probe clip.webm".to_string()));
    assert_eq!(report.succeeded(), 2);
}

#[tokio::test]
async fn test_render_failure_publishes_nothing() {
    let harness = Harness::new();
    let processor = harness.processor(three_videos().failing_render("tall.mov"));

    let report = completed(
        processor
            .run("9:16", &paths(&["wide.mp4", "tall.mov", "square.mkv"]))
            .await
            .unwrap(),
    );

    assert!(matches!(
        report.items[1].status,
        ItemStatus::Failed { stage: "render", .. }
    ));
    assert!(!harness.config.output_dir.join("output_video_1.mp4").exists());
    assert_eq!(report.succeeded(), 2);
}

#[tokio::test]
async fn test_scratch_space_is_cleaned_up() {
    let harness = Harness::new();
    let processor = harness.processor(three_videos());

    processor
        .run("1:1", &paths(&["wide.mp4", "tall.mov", "square.mkv"]))
        .await
        .unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(&harness.config.work_dir)
        .unwrap()
        .collect();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn test_directories_created_only_for_accepted_batches() {
    let harness = Harness::new();
    let processor = harness.processor(three_videos());
    assert!(!harness.config.work_dir.exists());

    processor.run("1:1", &paths(&["wide.mp4"])).await.unwrap();
    assert!(!harness.config.work_dir.exists());
    assert!(!harness.config.output_dir.exists());

    processor
        .run("1:1", &paths(&["wide.mp4", "tall.mov", "square.mkv"]))
        .await
        .unwrap();
    assert!(harness.config.work_dir.is_dir());
    assert!(harness.config.output_dir.is_dir());
}

#[tokio::test]
async fn test_report_serializes() {
    let harness = Harness::new();
    let processor = harness.processor(three_videos());

    let outcome = processor
        .run("1:1", &paths(&["wide.mp4", "tall.mov", "square.mkv"]))
        .await
        .unwrap();
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["outcome"], "completed");
    assert_eq!(json["target"]["width"], 1);
    assert_eq!(json["items"][0]["status"], "succeeded");
    assert_eq!(json["items"][0]["plan"]["kind"], "crop_width");
    assert_eq!(json["items"][0]["region"]["width"], 1080);
    assert_eq!(json["items"][2]["plan"]["kind"], "no_op");

    let wrong = processor.run("1:1", &paths(&["wide.mp4"])).await.unwrap();
    let json = serde_json::to_value(&wrong).unwrap();
    assert_eq!(json["outcome"], "wrong_count");
    assert_eq!(json["expected"], 3);
    assert_eq!(json["received"], 1);
}
