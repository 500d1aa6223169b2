//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the translator, the completion and likelihood services,
//! the engine bridge and results persistence so the rollout driver can bubble
//! them up with consistent context.
use thiserror::Error;

use crate::completion::CompletionError;
use crate::inference::InferenceError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Core(#[from] nle_core::CoreError),

    #[error("no admissible action survived filtering")]
    NoAdmissibleActions,

    #[error("action index {index} out of range for {len} admissible actions")]
    ActionIndex { index: usize, len: usize },

    #[error("environment stepped before reset")]
    NotReset,

    #[error("unknown task id {0}")]
    UnknownTask(String),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("likelihood model returned {got} scores for {expected} candidates")]
    ScoreCount { expected: usize, got: usize },

    #[error("engine bridge I/O failed")]
    BridgeIo(#[source] std::io::Error),

    #[error("engine bridge sent malformed message")]
    BridgeProtocol(#[source] serde_json::Error),

    #[error("engine bridge closed its output")]
    BridgeClosed,

    #[error("engine reported error: {0}")]
    Engine(String),

    #[error("engine bridge sent {got} reply, expected {expected}")]
    UnexpectedReply {
        expected: &'static str,
        got: &'static str,
    },

    #[error("failed to write results to {path}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode results")]
    Encode(#[source] serde_json::Error),
}
