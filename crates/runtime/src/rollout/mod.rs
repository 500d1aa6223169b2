//! Rollout driver.
//!
//! For every task: open an engine session, run the configured number of
//! episodes with one actor, fold each episode into the running statistics,
//! and rewrite the results file once the task is done.
mod results;

pub use results::{EpisodeOutcome, RolloutResults, TaskStats};

use std::fs;
use std::path::PathBuf;

use nle_content::TaskCatalog;
use tracing::{debug, info};

use crate::api::{ActorPolicy, EngineFactory, Result, RuntimeError};
use crate::env::LanguageEnv;

/// Rollout configuration shared across tasks.
#[derive(Debug, Clone)]
pub struct RolloutConfig {
    /// Results are written to `<output_dir>/<exp_name>.json`.
    pub exp_name: String,
    pub output_dir: PathBuf,
    pub num_rollouts: usize,
    /// Episode cut-off in engine steps; checked after each full action.
    pub max_episode_steps: Option<usize>,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            exp_name: "test".to_string(),
            output_dir: PathBuf::from("."),
            num_rollouts: 10,
            max_episode_steps: None,
        }
    }
}

impl RolloutConfig {
    pub fn results_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.json", self.exp_name))
    }
}

pub struct RolloutDriver {
    config: RolloutConfig,
    catalog: TaskCatalog,
}

impl RolloutDriver {
    pub fn new(config: RolloutConfig, catalog: TaskCatalog) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &RolloutConfig {
        &self.config
    }

    /// Task ids to evaluate: the given one, or the whole catalog.
    pub fn tasks(&self, task: Option<&str>) -> Result<Vec<String>> {
        match task {
            Some(id) => {
                if self.catalog.describe(id).is_none() {
                    return Err(RuntimeError::UnknownTask(id.to_string()));
                }
                Ok(vec![id.to_string()])
            }
            None => Ok(self.catalog.ids().map(str::to_string).collect()),
        }
    }

    /// Runs every task and returns the final statistics.
    pub async fn run(
        &self,
        tasks: &[String],
        factory: &dyn EngineFactory,
        actor: &mut dyn ActorPolicy,
    ) -> Result<RolloutResults> {
        let mut results = RolloutResults::new(tasks.iter().map(String::as_str));
        let path = self.config.results_path();
        fs::create_dir_all(&self.config.output_dir).map_err(|source| RuntimeError::Persist {
            path: self.config.output_dir.display().to_string(),
            source,
        })?;

        for task in tasks {
            let description = self
                .catalog
                .describe(task)
                .ok_or_else(|| RuntimeError::UnknownTask(task.clone()))?;

            info!("Starting Task: {}", task);
            let session = factory.open(task).await?;
            let mut env = LanguageEnv::new(session, task.as_str(), description);

            let mut successes = 0;
            for rollout in 0..self.config.num_rollouts {
                let outcome = run_episode(&mut env, actor, self.config.max_episode_steps).await?;
                if outcome.succeeded() {
                    successes += 1;
                }
                results.record(task, &outcome, self.config.num_rollouts);
                info!(
                    "{} Successes {}/{} (reward={}, steps={})",
                    task,
                    successes,
                    rollout + 1,
                    outcome.total_reward,
                    outcome.steps
                );
            }

            results.save(&path)?;
            info!("Wrote results to {}", path.display());
        }

        Ok(results)
    }
}

/// Plays one episode to completion or to the step cap.
///
/// Each chosen action is stepped one token at a time; the remaining tokens
/// are skipped once the engine reports done.
pub async fn run_episode(
    env: &mut LanguageEnv,
    actor: &mut dyn ActorPolicy,
    max_steps: Option<usize>,
) -> Result<EpisodeOutcome> {
    let mut observation = env.reset().await?;
    actor.reset(env.task_description());

    let mut outcome = EpisodeOutcome {
        total_reward: 0.0,
        final_reward: 0.0,
        died: false,
        steps: 0,
    };

    let mut done = false;
    while !done {
        let actions = env.admissible()?;
        let choice = actor.choose_action(&observation, &actions).await?;
        debug!("Chose {:?} -> {:?}", choice.phrase, choice.sequence);

        for token in &choice.sequence {
            let step = env.step(token).await?;
            observation = step.observation;
            outcome.total_reward += step.reward;
            outcome.final_reward = step.reward;
            outcome.died = step.info.is_death();
            outcome.steps += 1;
            if step.done {
                done = true;
                break;
            }
        }

        if max_steps.is_some_and(|max| outcome.steps >= max) {
            done = true;
        }
    }

    Ok(outcome)
}
