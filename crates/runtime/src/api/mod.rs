//! Public runtime API surface.
//!
//! This module gathers the contracts the rollout loop is written against: the
//! engine and description-service collaborators, the actor-policy trait, and
//! the unified error type.

pub mod actor;
pub mod engine;
pub mod errors;

pub use actor::{ActionChoice, ActorPolicy};
pub use engine::{
    DescriptionService, Engine, EngineFactory, EngineSession, StepInfo, StepOutcome, TextField,
};
pub use errors::{Result, RuntimeError};
