//! vcrop command-line entry point.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vcrop_media::{check_ffmpeg, check_ffprobe, plan_for};
use vcrop_models::{AspectRatio, Dimensions};
use vcrop_worker::cli::{Cli, Commands};
use vcrop_worker::{BatchOutcome, BatchProcessor, BatchReport, FfmpegBackend, ItemStatus, WorkerConfig, WorkerError};

/// Exit code for a rejected aspect ratio.
const EXIT_INVALID_RATIO: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match cli.command {
        Commands::Run {
            ratio,
            output_dir,
            json,
            inputs,
        } => run_batch(&ratio, output_dir, json, &inputs).await,
        Commands::Plan {
            ratio,
            width,
            height,
            json,
        } => match show_plan(&ratio, width, height, json) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{:#}", e);
                ExitCode::from(EXIT_INVALID_RATIO)
            }
        },
        Commands::CheckTools => check_tools(),
    }
}

/// Colored output for terminals, JSON when `LOG_FORMAT=json`.
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let level = if verbose { "vcrop=debug" } else { "vcrop=info" };
    let env_filter = EnvFilter::from_default_env().add_directive(level.parse()?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .with(env_filter)
            .try_init()?;
    }

    Ok(())
}

async fn run_batch(ratio: &str, output_dir: Option<PathBuf>, json: bool, inputs: &[PathBuf]) -> ExitCode {
    let mut config = WorkerConfig::from_env();
    if let Some(dir) = output_dir {
        config = config.with_output_dir(dir);
    }
    info!("Config: {:?}", config);

    let backend = FfmpegBackend::new(config.ffmpeg_timeout);
    let processor = BatchProcessor::new(config, backend);

    let outcome = match processor.run(ratio, inputs).await {
        Ok(outcome) => outcome,
        Err(e @ WorkerError::InvalidRatio(_)) => {
            error!("{}. Please use the format 'width:height' (e.g. 16:9).", e);
            return ExitCode::from(EXIT_INVALID_RATIO);
        }
        Err(e) => {
            error!("Batch could not start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                error!("Failed to serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    match outcome {
        BatchOutcome::WrongCount { expected, received } => {
            if !json {
                println!(
                    "Please provide exactly {} video files (got {}).",
                    expected, received
                );
            }
            ExitCode::SUCCESS
        }
        BatchOutcome::Completed(report) => {
            if !json {
                print_report(&report);
            }
            if report.failed() == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn print_report(report: &BatchReport) {
    for item in &report.items {
        let n = item.index + 1;
        match &item.status {
            ItemStatus::Succeeded {
                dimensions,
                plan,
                output,
                ..
            } => {
                println!("Original video {} dimensions: {}", n, dimensions);
                if plan.is_noop() {
                    println!("Video {} already has the desired aspect ratio.", n);
                }
                println!(
                    "Video {} has been successfully modified: {}",
                    n,
                    output.display()
                );
            }
            ItemStatus::Failed { error, .. } => {
                println!("Video {} aspect ratio modification failed: {}", n, error);
            }
        }
    }
}

fn show_plan(ratio: &str, width: u32, height: u32, json: bool) -> anyhow::Result<()> {
    let target: AspectRatio = ratio.parse()?;
    let dims = Dimensions::new(width, height)?;
    let plan = plan_for(dims, &target);
    let region = plan.region(dims);

    if json {
        let value = serde_json::json!({
            "target": target,
            "dimensions": dims,
            "plan": plan,
            "region": region,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{} -> {}: {}", dims, target, plan);
        println!(
            "crop region: {}x{} at ({}, {})",
            region.width, region.height, region.x, region.y
        );
    }

    Ok(())
}

fn check_tools() -> ExitCode {
    let mut ok = true;
    for (name, result) in [("ffmpeg", check_ffmpeg()), ("ffprobe", check_ffprobe())] {
        match result {
            Ok(path) => println!("{}: {}", name, path.display()),
            Err(e) => {
                println!("{}: {}", name, e);
                ok = false;
            }
        }
    }
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
