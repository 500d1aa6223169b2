//! Collaborator contracts for the game engine and its description service.
//!
//! The engine itself lives outside this crate (usually behind the
//! [`crate::bridge`]); the runtime only relies on these traits so tests can
//! substitute deterministic fakes.
use std::sync::Arc;

use async_trait::async_trait;
use nle_core::{MonsterCatalog, PrimitiveAction, RawObservation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::Result;

/// Free-form info dictionary returned with every step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepInfo(Map<String, Value>);

impl StepInfo {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Episode end status; `Some(1)` means the character died.
    pub fn end_status(&self) -> Option<i64> {
        self.get("end_status").and_then(Value::as_i64)
    }

    pub fn is_death(&self) -> bool {
        self.end_status() == Some(1)
    }
}

/// Result of stepping the engine with one primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub observation: RawObservation,
    pub reward: f64,
    pub done: bool,
    pub info: StepInfo,
}

/// Game engine driven one primitive key press at a time.
#[async_trait]
pub trait Engine: Send {
    /// Starts a new episode and returns its first observation.
    async fn reset(&mut self) -> Result<RawObservation>;

    /// Applies one primitive action.
    async fn step(&mut self, action: PrimitiveAction) -> Result<StepOutcome>;

    /// Primitive actions this engine accepts.
    fn actions(&self) -> &[PrimitiveAction];

    /// Monster names indexed by monster id.
    fn monsters(&self) -> Arc<MonsterCatalog>;
}

/// Observation field rendered by the description service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextField {
    Glyphs,
    Message,
    Blstats,
    Inventory,
    Cursor,
}

impl TextField {
    pub const ALL: [TextField; 5] = [
        TextField::Glyphs,
        TextField::Message,
        TextField::Blstats,
        TextField::Inventory,
        TextField::Cursor,
    ];
}

/// Renders one field of a raw observation as Latin-1 text.
#[async_trait]
pub trait DescriptionService: Send + Sync {
    async fn describe(&self, field: TextField, observation: &RawObservation) -> Result<Vec<u8>>;
}

/// Engine plus the description service bound to it.
pub struct EngineSession {
    pub engine: Box<dyn Engine>,
    pub describer: Arc<dyn DescriptionService>,
}

/// Opens one engine session per task.
#[async_trait]
pub trait EngineFactory: Send + Sync {
    async fn open(&self, task_id: &str) -> Result<EngineSession>;
}
