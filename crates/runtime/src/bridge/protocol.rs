//! JSON-lines messages exchanged with an engine process.
//!
//! The agent writes one [`Request`] per line to the engine's stdin and reads
//! exactly one [`Reply`] line back. Key codes travel as integers; rendered
//! text travels as raw Latin-1 bytes.
use nle_core::RawObservation;
use serde::{Deserialize, Serialize};

use crate::api::{StepInfo, TextField};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Opens the task; answered with [`Reply::Ready`].
    Hello { task: String },
    Reset,
    Step { key: u8 },
    Describe {
        field: TextField,
        observation: RawObservation,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    Ready {
        /// Key codes of the allowed primitive actions.
        actions: Vec<u8>,
        /// Monster names indexed by monster id.
        monsters: Vec<String>,
    },
    Observation {
        observation: RawObservation,
    },
    Step {
        observation: RawObservation,
        reward: f64,
        done: bool,
        #[serde(default)]
        info: StepInfo,
    },
    Text {
        bytes: Vec<u8>,
    },
    Error {
        message: String,
    },
}

impl Reply {
    pub fn label(&self) -> &'static str {
        match self {
            Reply::Ready { .. } => "ready",
            Reply::Observation { .. } => "observation",
            Reply::Step { .. } => "step",
            Reply::Text { .. } => "text",
            Reply::Error { .. } => "error",
        }
    }
}
