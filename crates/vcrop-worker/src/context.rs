//! Per-video processing context.
//!
//! Each video carries its own id and scratch directory instead of deriving
//! temp names from shared state, so items never collide on disk.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use uuid::Uuid;

use vcrop_models::encoding::OUTPUT_EXTENSION;

use crate::logging::ItemLogger;

/// Scratch space and identity for one video of a batch.
///
/// The scratch directory is removed when the context is dropped.
#[derive(Debug)]
pub struct ItemContext {
    pub index: usize,
    pub item_id: Uuid,
    pub input: PathBuf,
    scratch: TempDir,
}

impl ItemContext {
    /// Create the context, allocating a scratch directory under `work_dir`.
    ///
    /// `work_dir` must already exist.
    pub fn new(index: usize, input: impl Into<PathBuf>, work_dir: &Path) -> std::io::Result<Self> {
        let item_id = Uuid::new_v4();
        let scratch = tempfile::Builder::new()
            .prefix(&format!("vcrop-{}-", item_id))
            .tempdir_in(work_dir)?;

        Ok(Self {
            index,
            item_id,
            input: input.into(),
            scratch,
        })
    }

    /// File name of the published output, ordered like the inputs.
    pub fn output_file_name(&self) -> String {
        format!("output_video_{}.{}", self.index, OUTPUT_EXTENSION)
    }

    /// Where FFmpeg writes before the result is published.
    pub fn scratch_output(&self) -> PathBuf {
        self.scratch.path().join(self.output_file_name())
    }

    pub fn scratch_dir(&self) -> &Path {
        self.scratch.path()
    }

    pub fn logger(&self) -> ItemLogger {
        ItemLogger::new(self.item_id, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contexts_get_distinct_scratch_dirs() {
        let root = TempDir::new().unwrap();
        let a = ItemContext::new(0, "a.mp4", root.path()).unwrap();
        let b = ItemContext::new(1, "b.mp4", root.path()).unwrap();

        assert_ne!(a.item_id, b.item_id);
        assert_ne!(a.scratch_dir(), b.scratch_dir());
        assert!(a.scratch_dir().starts_with(root.path()));
        assert_eq!(a.output_file_name(), "output_video_0.mp4");
        assert_eq!(
            b.scratch_output(),
            b.scratch_dir().join("output_video_1.mp4")
        );
    }

    #[test]
    fn test_missing_work_dir_is_an_error() {
        let root = TempDir::new().unwrap();
        assert!(ItemContext::new(0, "a.mp4", &root.path().join("absent")).is_err());
    }

    #[test]
    fn test_scratch_removed_on_drop() {
        let root = TempDir::new().unwrap();
        let ctx = ItemContext::new(0, "a.mp4", root.path()).unwrap();
        let dir = ctx.scratch_dir().to_path_buf();
        assert!(dir.exists());
        drop(ctx);
        assert!(!dir.exists());
    }
}
