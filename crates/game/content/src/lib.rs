//! Static agent content and its loaders.
//!
//! This crate houses the data the agent needs that is neither engine state nor
//! code:
//! - the task catalog (task id -> natural-language goal)
//! - the few-shot library of worked decisions used by prompted policies
//!
//! Both ship embedded as RON and can be replaced by files on disk.

pub mod loaders;

pub use loaders::{FewShotExample, FewShotLibrary, LoadResult, PromptExample, TaskCatalog, TaskSpec};
