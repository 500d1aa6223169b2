//! Per-task rollout statistics and their JSON file.
use std::fs;
use std::path::Path;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::api::{Result, RuntimeError};

/// Running averages over the rollouts of one task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskStats {
    pub reward: f64,
    pub success: f64,
    pub death: f64,
}

/// How one episode ended.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeOutcome {
    /// Sum of every step reward.
    pub total_reward: f64,
    /// Reward of the last step taken.
    pub final_reward: f64,
    pub died: bool,
    pub steps: usize,
}

impl EpisodeOutcome {
    pub fn succeeded(&self) -> bool {
        self.final_reward > 0.0
    }
}

/// Statistics keyed by task id, in task order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RolloutResults {
    tasks: Vec<(String, TaskStats)>,
}

impl RolloutResults {
    /// Zeroed statistics for every task.
    pub fn new<'a, I>(tasks: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            tasks: tasks
                .into_iter()
                .map(|task| (task.to_string(), TaskStats::default()))
                .collect(),
        }
    }

    pub fn get(&self, task: &str) -> Option<&TaskStats> {
        self.tasks
            .iter()
            .find(|(id, _)| id == task)
            .map(|(_, stats)| stats)
    }

    /// Folds one episode into the task's running averages.
    ///
    /// Success and death are exclusive; a successful episode never counts as
    /// a death.
    pub fn record(&mut self, task: &str, outcome: &EpisodeOutcome, num_rollouts: usize) {
        let share = 1.0 / num_rollouts.max(1) as f64;
        let index = match self.tasks.iter().position(|(id, _)| id == task) {
            Some(index) => index,
            None => {
                self.tasks.push((task.to_string(), TaskStats::default()));
                self.tasks.len() - 1
            }
        };
        let stats = &mut self.tasks[index].1;

        stats.reward += outcome.total_reward * share;
        if outcome.succeeded() {
            stats.success += share;
        } else if outcome.died {
            stats.death += share;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TaskStats)> {
        self.tasks.iter().map(|(id, stats)| (id.as_str(), stats))
    }

    /// Pretty JSON with four-space indentation.
    pub fn to_json(&self) -> Result<String> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer).map_err(RuntimeError::Encode)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Overwrites `path` with the current statistics, creating missing
    /// parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| RuntimeError::Persist {
                path: parent.display().to_string(),
                source,
            })?;
        }
        fs::write(path, json).map_err(|source| RuntimeError::Persist {
            path: path.display().to_string(),
            source,
        })
    }
}

impl Serialize for RolloutResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tasks.len()))?;
        for (task, stats) in &self.tasks {
            map.serialize_entry(task, stats)?;
        }
        map.end()
    }
}
