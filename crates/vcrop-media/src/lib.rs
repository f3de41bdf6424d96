#![deny(unreachable_patterns)]
//! Crop planning and FFmpeg CLI wrapper for vcrop.
//!
//! This crate provides:
//! - The center-crop planner (pure, no I/O)
//! - FFprobe dimension probing
//! - Type-safe FFmpeg command building
//! - Progress parsing from `-progress pipe:2`
//! - Rendering a crop plan to a re-encoded output

pub mod command;
pub mod error;
pub mod filters;
pub mod fs_utils;
pub mod planner;
pub mod probe;
pub mod progress;
pub mod render;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use planner::{plan_crop, plan_for, RATIO_TOLERANCE};
pub use probe::{probe_video, probe_video_with_timeout, VideoInfo, PROBE_TIMEOUT};
pub use progress::{FfmpegProgress, ProgressCallback};
pub use render::render_crop;
