//! Structured per-video logging.
//!
//! Every event carries the item id and its position in the batch so the
//! three renders of one run can be told apart in interleaved output.

use tracing::{error, info, warn, Span};
use uuid::Uuid;

/// Logger bound to one video of a batch.
#[derive(Debug, Clone)]
pub struct ItemLogger {
    item_id: Uuid,
    index: usize,
}

impl ItemLogger {
    pub fn new(item_id: Uuid, index: usize) -> Self {
        Self { item_id, index }
    }

    /// One-based position shown to users.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn log_start(&self, message: &str) {
        info!(item_id = %self.item_id, index = self.index, "Video {} started: {}", self.number(), message);
    }

    pub fn log_progress(&self, message: &str) {
        info!(item_id = %self.item_id, index = self.index, "Video {}: {}", self.number(), message);
    }

    pub fn log_warning(&self, message: &str) {
        warn!(item_id = %self.item_id, index = self.index, "Video {}: {}", self.number(), message);
    }

    pub fn log_error(&self, message: &str) {
        error!(item_id = %self.item_id, index = self.index, "Video {} failed: {}", self.number(), message);
    }

    pub fn log_completion(&self, message: &str) {
        info!(item_id = %self.item_id, index = self.index, "Video {} done: {}", self.number(), message);
    }

    /// Span wrapping all work on this video.
    pub fn create_span(&self) -> Span {
        tracing::info_span!("video", item_id = %self.item_id, index = self.index)
    }
}
