//! Task catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One evaluation task and its goal description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub id: String,
    pub description: String,
}

/// Ordered task id -> description mapping.
#[derive(Debug, Clone, Default)]
pub struct TaskCatalog {
    tasks: Vec<TaskSpec>,
}

impl TaskCatalog {
    /// Loads the catalog shipped in `data/tasks.ron`.
    pub fn embedded() -> LoadResult<Self> {
        Self::parse(include_str!("../../data/tasks.ron"))
    }

    /// Load a catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a RON list of `(id: .., description: ..)` entries
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> LoadResult<Self> {
        let tasks: Vec<TaskSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse task catalog RON: {}", e))?;

        for (i, task) in tasks.iter().enumerate() {
            if tasks[..i].iter().any(|other| other.id == task.id) {
                anyhow::bail!("Duplicate task id in catalog: {}", task.id);
            }
        }

        Ok(Self { tasks })
    }

    /// Goal description of a task, if the task is known.
    pub fn describe(&self, id: &str) -> Option<&str> {
        self.tasks
            .iter()
            .find(|task| task.id == id)
            .map(|task| task.description.as_str())
    }

    /// Task ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(|task| task.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskSpec> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
