//! Language agent runtime.
//!
//! This crate turns raw engine observations into language, lets a pluggable
//! policy pick among the admissible actions, and drives rollouts. Consumers
//! embed [`RolloutDriver`] with an [`EngineFactory`] and an [`ActorPolicy`].
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the collaborator traits and the error type
//! - [`translate`] builds language observations and admissible actions
//! - [`actors`] hosts the random, chat and log-likelihood policies
//! - [`completion`] and [`inference`] talk to the model services
//! - [`env`] and [`bridge`] wrap an engine session
//! - [`rollout`] runs episodes and persists statistics
pub mod actors;
pub mod api;
pub mod bridge;
pub mod completion;
pub mod env;
pub mod inference;
pub mod oracle;
pub mod rollout;
pub mod translate;

pub use actors::{ChatActor, Domain, LogitActor, RandomActor};
pub use api::{
    ActionChoice, ActorPolicy, DescriptionService, Engine, EngineFactory, EngineSession, Result,
    RuntimeError, StepInfo, StepOutcome, TextField,
};
pub use bridge::{BridgeDescriber, BridgeFactory, EngineBridge};
pub use completion::{
    ChatCompletion, ChatConfig, ChatReply, ChatRequest, CompletionError, OpenAiChat, RetryPolicy,
};
pub use env::{LanguageEnv, LanguageStep};
pub use inference::{HttpLikelihood, InferenceError, LikelihoodModel};
pub use oracle::ActionOracle;
pub use rollout::{EpisodeOutcome, RolloutConfig, RolloutDriver, RolloutResults, TaskStats};
pub use translate::{ActionEntry, AdmissibleActions, LanguageObservation, TextFields};
