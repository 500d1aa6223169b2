//! Log-likelihood policy.
//!
//! Each phrase is scored by how much more likely the model finds it given the
//! current observation than given no observation at all. The no-observation
//! baseline depends only on the task and the phrase, so it is cached until the
//! task changes.
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::Domain;
use super::sampling::{collapse_to_max, sample_categorical, softmax};
use crate::api::{ActionChoice, ActorPolicy, Result, RuntimeError};
use crate::inference::LikelihoodModel;
use crate::translate::{AdmissibleActions, LanguageObservation};

/// Prompt the likelihood model continues with an action phrase.
pub fn actor_prompt(domain: Domain, task: &str, summary: &str) -> String {
    let mut prompt = domain.prompt().to_string();
    if !task.is_empty() {
        prompt.push_str(" Your task is to ");
        prompt.push_str(task);
        prompt.push(' ');
    }
    let summary = format!("{summary}.");
    prompt.push_str(&[domain.affordances(), summary.as_str(), "\nYou choose to:"].join(" "));
    prompt
}

/// Phrase -> baseline score for one task description.
#[derive(Debug, Default, Clone)]
pub struct BaselineCache {
    task: String,
    scores: HashMap<String, f64>,
}

impl BaselineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches to `task`, dropping every entry if it differs from the
    /// current one.
    pub fn sync_task(&mut self, task: &str) {
        if self.task != task {
            self.scores.clear();
            self.task = task.to_string();
        }
    }

    pub fn get(&self, phrase: &str) -> Option<f64> {
        self.scores.get(phrase).copied()
    }

    pub fn insert(&mut self, phrase: String, score: f64) {
        self.scores.insert(phrase, score);
    }

    /// Phrases without a cached baseline, in order, without duplicates.
    pub fn missing<'a, I>(&self, phrases: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut missing: Vec<String> = Vec::new();
        for phrase in phrases {
            if !self.scores.contains_key(phrase) && !missing.iter().any(|m| m == phrase) {
                missing.push(phrase.to_string());
            }
        }
        missing
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

pub struct LogitActor {
    model: Arc<dyn LikelihoodModel>,
    temperature: f64,
    domain: Domain,
    baselines: BaselineCache,
    rng: StdRng,
}

impl LogitActor {
    /// # Arguments
    /// * `model` - Likelihood model scoring action phrases
    /// * `temperature` - Softmax temperature; 0 picks uniformly among the best
    pub fn new(model: Arc<dyn LikelihoodModel>, temperature: f64) -> Self {
        Self {
            model,
            temperature,
            domain: Domain::default(),
            baselines: BaselineCache::new(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn baselines(&self) -> &BaselineCache {
        &self.baselines
    }

    async fn score(&self, prompt: &str, candidates: &[String]) -> Result<Vec<f64>> {
        let scores = self.model.score(prompt, candidates).await?;
        if scores.len() != candidates.len() {
            return Err(RuntimeError::ScoreCount {
                expected: candidates.len(),
                got: scores.len(),
            });
        }
        Ok(scores)
    }

    async fn fill_baselines(&mut self, actions: &AdmissibleActions) -> Result<()> {
        let missing = self.baselines.missing(actions.phrases());
        if missing.is_empty() {
            return Ok(());
        }

        let prompt = actor_prompt(self.domain, &self.baselines.task, "");
        let scores = self.score(&prompt, &missing).await?;
        debug!("Computed {} new baselines", missing.len());
        for (phrase, score) in missing.into_iter().zip(scores) {
            self.baselines.insert(phrase, score);
        }
        Ok(())
    }
}

/// Score minus baseline, treating an unscorable phrase as `-inf` and an
/// unscorable baseline as zero.
fn relative_score(score: f64, baseline: f64) -> f64 {
    if !score.is_finite() {
        f64::NEG_INFINITY
    } else if !baseline.is_finite() {
        score
    } else {
        score - baseline
    }
}

#[async_trait]
impl ActorPolicy for LogitActor {
    fn reset(&mut self, task: &str) {
        self.baselines.sync_task(task);
    }

    async fn choose_action(
        &mut self,
        observation: &LanguageObservation,
        actions: &AdmissibleActions,
    ) -> Result<ActionChoice> {
        self.fill_baselines(actions).await?;

        let phrases: Vec<String> = actions.phrases().map(str::to_string).collect();
        let prompt = actor_prompt(self.domain, &self.baselines.task, &observation.flatten());
        let raw = self.score(&prompt, &phrases).await?;

        let scores: Vec<f64> = phrases
            .iter()
            .zip(raw)
            .map(|(phrase, score)| {
                relative_score(score, self.baselines.get(phrase).unwrap_or(0.0))
            })
            .collect();
        debug!("LogitActor scores={:?}", scores);

        let index = if scores.iter().all(|s| *s == f64::NEG_INFINITY) {
            self.rng.gen_range(0..scores.len())
        } else {
            let scaled = if self.temperature == 0.0 {
                collapse_to_max(&scores)
            } else {
                scores.iter().map(|s| s / self.temperature).collect()
            };
            sample_categorical(&mut self.rng, &softmax(&scaled))
        };

        actions.choose(index, String::new(), 0)
    }
}
