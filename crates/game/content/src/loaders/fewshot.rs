//! Few-shot library loader.
//!
//! Examples reference their task by id; [`FewShotLibrary::resolve`] joins them
//! with a [`TaskCatalog`] so prompt builders receive the goal text directly.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, TaskCatalog, read_file};

/// One worked decision as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FewShotExample {
    pub task_id: String,
    /// Language observation lines at the decision point.
    pub state: Vec<String>,
    /// Action menu offered at the decision point.
    pub admissible: Vec<String>,
    /// Chosen entry of `admissible`.
    pub action: String,
    /// Free-text justification for the choice.
    pub explanation: String,
}

/// Worked decision with its task resolved to a goal description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptExample {
    pub task: String,
    pub state: Vec<String>,
    pub admissible: Vec<String>,
    pub action: String,
    pub explanation: String,
    /// Index of `action` within `admissible`.
    pub chosen: usize,
}

/// Ordered collection of worked decisions.
#[derive(Debug, Clone, Default)]
pub struct FewShotLibrary {
    examples: Vec<FewShotExample>,
}

impl FewShotLibrary {
    /// Loads the library shipped in `data/fewshot.ron`.
    pub fn embedded() -> LoadResult<Self> {
        Self::parse(include_str!("../../data/fewshot.ron"))
    }

    /// Load a library from a RON file.
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> LoadResult<Self> {
        let examples: Vec<FewShotExample> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse few-shot RON: {}", e))?;
        Ok(Self { examples })
    }

    /// Resolves the first `count` examples against the task catalog.
    ///
    /// Fails if an example names an unknown task or chooses an action that is
    /// not on its own menu.
    pub fn resolve(&self, catalog: &TaskCatalog, count: usize) -> LoadResult<Vec<PromptExample>> {
        self.examples
            .iter()
            .take(count)
            .map(|example| {
                let task = catalog.describe(&example.task_id).ok_or_else(|| {
                    anyhow::anyhow!("Few-shot example references unknown task {}", example.task_id)
                })?;
                let chosen = example
                    .admissible
                    .iter()
                    .position(|a| *a == example.action)
                    .ok_or_else(|| {
                        anyhow::anyhow!(
                            "Few-shot action {:?} is not in its admissible list",
                            example.action
                        )
                    })?;

                Ok(PromptExample {
                    task: task.to_string(),
                    state: example.state.clone(),
                    admissible: example.admissible.clone(),
                    action: example.action.clone(),
                    explanation: example.explanation.clone(),
                    chosen,
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}
