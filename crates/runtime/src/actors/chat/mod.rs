//! Prompted chat-model policy.
//!
//! Each decision is posed as the last user turn of a few-shot conversation.
//! The reply is matched back onto the menu by word overlap; the best-matching
//! phrases tie for selection.
mod parse;
mod prompt;

pub use parse::{decision_span, score_reply};

use std::sync::Arc;

use async_trait::async_trait;
use nle_content::PromptExample;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use super::Domain;
use super::sampling::{collapse_to_max, sample_categorical, softmax};
use crate::api::{ActionChoice, ActorPolicy, Result};
use crate::completion::{ChatCompletion, ChatRequest, RetryPolicy, complete_with_retry};
use crate::translate::{AdmissibleActions, LanguageObservation};

pub struct ChatActor {
    completion: Arc<dyn ChatCompletion>,
    retry: RetryPolicy,
    examples: Vec<PromptExample>,
    use_cot: bool,
    domain: Domain,
    task: String,
    rng: StdRng,
}

impl ChatActor {
    /// # Arguments
    /// * `completion` - Chat service queried once per decision
    /// * `examples` - Worked decisions prepended to every conversation
    /// * `use_cot` - Include each example's explanation before its answer
    pub fn new(
        completion: Arc<dyn ChatCompletion>,
        examples: Vec<PromptExample>,
        use_cot: bool,
    ) -> Self {
        Self {
            completion,
            retry: RetryPolicy::default(),
            examples,
            use_cot,
            domain: Domain::default(),
            task: String::new(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    fn request(
        &self,
        observation: &LanguageObservation,
        actions: &AdmissibleActions,
    ) -> ChatRequest {
        let turns = prompt::build_turns(
            &self.examples,
            self.use_cot,
            &self.task,
            observation.lines().iter().map(String::as_str),
            actions.phrases(),
        );
        ChatRequest::new(self.domain.system_message(), turns)
    }
}

#[async_trait]
impl ActorPolicy for ChatActor {
    fn reset(&mut self, task: &str) {
        self.task = task.to_string();
    }

    async fn choose_action(
        &mut self,
        observation: &LanguageObservation,
        actions: &AdmissibleActions,
    ) -> Result<ActionChoice> {
        let request = self.request(observation, actions);
        let reply = complete_with_retry(self.completion.as_ref(), &self.retry, request).await?;

        let span = decision_span(&reply.text);
        let scores = score_reply(span, actions.phrases());
        debug!("ChatActor span={:?} scores={:?}", span, scores);

        let scores = if scores.iter().all(|s| *s == f64::NEG_INFINITY) {
            vec![1.0; scores.len()]
        } else {
            collapse_to_max(&scores)
        };
        let index = sample_categorical(&mut self.rng, &softmax(&scores));

        actions.choose(index, reply.text, reply.total_tokens)
    }
}
