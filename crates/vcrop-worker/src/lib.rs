//! Aspect-ratio crop batches.
//!
//! This crate provides:
//! - The sequential batch loop with per-video isolation
//! - Per-video scratch contexts
//! - The FFmpeg-backed media backend
//! - Environment configuration, structured logging and metrics

pub mod backend;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod processor;

pub use backend::{FfmpegBackend, MediaBackend, RenderJob};
pub use config::WorkerConfig;
pub use context::ItemContext;
pub use error::{WorkerError, WorkerResult};
pub use logging::ItemLogger;
pub use processor::{BatchOutcome, BatchProcessor, BatchReport, ItemReport, ItemStatus};
