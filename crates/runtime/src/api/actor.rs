//! Asynchronous abstraction for choosing one admissible action.
//!
//! Rollouts plug in [`ActorPolicy`] implementations so the same loop can run
//! with a uniform baseline, a prompted chat model, or a likelihood scorer.
use async_trait::async_trait;

use super::errors::Result;
use crate::translate::{AdmissibleActions, LanguageObservation};

/// Outcome of one decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionChoice {
    /// Engine tokens to step, in order.
    pub sequence: Vec<String>,
    pub phrase: String,
    /// Raw model output; empty for non-generative policies.
    pub generation: String,
    /// Tokens billed by the completion service; 0 otherwise.
    pub tokens_used: u64,
}

/// Trait for choosing an action from the current admissible set.
///
/// Implementations own their state (task description, caches, RNG) and are
/// driven by a single rollout loop, hence `&mut self`.
#[async_trait]
pub trait ActorPolicy: Send {
    /// Starts a new episode for the given task description.
    fn reset(&mut self, task: &str);

    /// Chooses one entry of `actions` given the current observation.
    ///
    /// # Arguments
    /// * `observation` - Language observation for this step
    /// * `actions` - Non-empty admissible action list
    ///
    /// # Returns
    /// The chosen entry, or an error if a collaborator service failed
    async fn choose_action(
        &mut self,
        observation: &LanguageObservation,
        actions: &AdmissibleActions,
    ) -> Result<ActionChoice>;
}
