//! Uniform-ish baseline policy.
use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use super::sampling::sample_categorical;
use crate::api::{ActionChoice, ActorPolicy, Result};
use crate::translate::{AdmissibleActions, LanguageObservation};

/// Sampling weight of a phrase.
///
/// Directed item uses ("zap ..", "blow ..") expand into eight phrases each,
/// so they are down-weighted to 1/8 to keep the item as likely as a move.
pub fn action_weight(phrase: &str) -> f64 {
    if phrase.starts_with("zap") || phrase.starts_with("blow") {
        1.0 / 8.0
    } else {
        1.0
    }
}

/// Picks actions at random without looking at the observation.
pub struct RandomActor {
    rng: StdRng,
}

impl RandomActor {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomActor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActorPolicy for RandomActor {
    fn reset(&mut self, _task: &str) {}

    async fn choose_action(
        &mut self,
        _observation: &LanguageObservation,
        actions: &AdmissibleActions,
    ) -> Result<ActionChoice> {
        let weights: Vec<f64> = actions.phrases().map(action_weight).collect();
        let index = sample_categorical(&mut self.rng, &weights);
        debug!("RandomActor chose {} of {}", index, actions.len());
        actions.choose(index, String::new(), 0)
    }
}
