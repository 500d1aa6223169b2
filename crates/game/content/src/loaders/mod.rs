//! Content loaders for reading agent data from RON.
//!
//! Each loader has an `embedded()` constructor backed by the files under
//! `data/` and a `from_path()` constructor for alternative content.

pub mod fewshot;
pub mod tasks;

pub use fewshot::{FewShotExample, FewShotLibrary, PromptExample};
pub use tasks::{TaskCatalog, TaskSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
