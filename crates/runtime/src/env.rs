//! Language view of one engine session.
//!
//! [`LanguageEnv`] owns the engine and its description service and keeps the
//! last raw observation and text blocks around, so the admissible actions
//! always describe the state the policy is looking at.
use std::sync::Arc;

use nle_core::{PrimitiveAction, RawObservation};
use tracing::debug;

use crate::api::{DescriptionService, Engine, EngineSession, Result, RuntimeError, StepInfo};
use crate::oracle::ActionOracle;
use crate::translate::{
    AdmissibleActions, LanguageObservation, TextFields, admissible_actions, compose, extract,
};

/// Observation and feedback after stepping one token.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageStep {
    pub observation: LanguageObservation,
    pub reward: f64,
    pub done: bool,
    pub info: StepInfo,
}

struct Snapshot {
    raw: RawObservation,
    fields: TextFields,
}

pub struct LanguageEnv {
    engine: Box<dyn Engine>,
    describer: Arc<dyn DescriptionService>,
    oracle: ActionOracle,
    task_id: String,
    task_description: String,
    last: Option<Snapshot>,
}

impl LanguageEnv {
    pub fn new(
        session: EngineSession,
        task_id: impl Into<String>,
        task_description: impl Into<String>,
    ) -> Self {
        let oracle = ActionOracle::from_engine(session.engine.as_ref());
        Self {
            engine: session.engine,
            describer: session.describer,
            oracle,
            task_id: task_id.into(),
            task_description: task_description.into(),
            last: None,
        }
    }

    pub async fn reset(&mut self) -> Result<LanguageObservation> {
        let raw = self.engine.reset().await?;
        self.observe(raw).await
    }

    /// Steps the engine with the primitive named by `token`.
    pub async fn step(&mut self, token: &str) -> Result<LanguageStep> {
        let action = PrimitiveAction::from_token(token)?;
        debug!("Stepping {} ({})", token, action.name());

        let outcome = self.engine.step(action).await?;
        let observation = self.observe(outcome.observation).await?;

        Ok(LanguageStep {
            observation,
            reward: outcome.reward,
            done: outcome.done,
            info: outcome.info,
        })
    }

    /// Admissible actions for the most recent observation.
    pub fn admissible(&self) -> Result<AdmissibleActions> {
        let last = self.last.as_ref().ok_or(RuntimeError::NotReset)?;
        admissible_actions(&last.raw, &last.fields, &self.oracle)
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn task_description(&self) -> &str {
        &self.task_description
    }

    async fn observe(&mut self, raw: RawObservation) -> Result<LanguageObservation> {
        let fields = extract(self.describer.as_ref(), &raw).await?;
        let observation = compose(&fields);
        self.last = Some(Snapshot { raw, fields });
        Ok(observation)
    }
}
