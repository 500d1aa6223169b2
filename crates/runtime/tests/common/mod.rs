//! Deterministic collaborators shared by the integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use agent_runtime::completion::{ChatCompletion, ChatReply, ChatRequest, CompletionError};
use agent_runtime::inference::{InferenceError, LikelihoodModel};
use agent_runtime::{
    DescriptionService, Engine, EngineFactory, EngineSession, Result, StepInfo, StepOutcome,
    TextField,
};
use async_trait::async_trait;
use nle_core::{CompassDirection, MonsterCatalog, PrimitiveAction, RawObservation};

/// Every primitive the engine accepts in these tests: movement plus the
/// commands used by inventory actions.
pub fn default_actions() -> Vec<PrimitiveAction> {
    let mut actions: Vec<PrimitiveAction> =
        CompassDirection::ALL.iter().map(|d| d.primitive()).collect();
    actions.extend([
        PrimitiveAction::Apply,
        PrimitiveAction::Eat,
        PrimitiveAction::Pickup,
        PrimitiveAction::PutOn,
        PrimitiveAction::Quaff,
        PrimitiveAction::Wear,
        PrimitiveAction::Zap,
    ]);
    actions
}

pub fn monsters() -> Arc<MonsterCatalog> {
    Arc::new(MonsterCatalog::new(["giant rat", "jackal", "kobold", "newt"]))
}

/// Description service answering with fixed text for every observation.
#[derive(Default, Clone)]
pub struct StaticDescriber {
    texts: HashMap<TextField, String>,
}

impl StaticDescriber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: TextField, text: &str) -> Self {
        self.texts.insert(field, text.to_string());
        self
    }
}

#[async_trait]
impl DescriptionService for StaticDescriber {
    async fn describe(&self, field: TextField, _obs: &RawObservation) -> Result<Vec<u8>> {
        Ok(self
            .texts
            .get(&field)
            .map(|text| text.as_bytes().to_vec())
            .unwrap_or_default())
    }
}

/// One scripted engine response.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub reward: f64,
    pub done: bool,
    pub end_status: Option<i64>,
}

impl Frame {
    pub fn step(reward: f64) -> Self {
        Self {
            reward,
            done: false,
            end_status: None,
        }
    }

    pub fn end(reward: f64, end_status: Option<i64>) -> Self {
        Self {
            reward,
            done: true,
            end_status,
        }
    }
}

/// Engine replaying the same frames every episode.
///
/// Past the end of the script every step is a zero-reward terminal step.
pub struct ScriptedEngine {
    frames: Vec<Frame>,
    cursor: usize,
    observation: RawObservation,
    actions: Vec<PrimitiveAction>,
    monsters: Arc<MonsterCatalog>,
    pub stepped: Arc<Mutex<Vec<PrimitiveAction>>>,
    pub resets: Arc<Mutex<usize>>,
}

impl ScriptedEngine {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames,
            cursor: 0,
            observation: RawObservation::default(),
            actions: default_actions(),
            monsters: monsters(),
            stepped: Arc::new(Mutex::new(Vec::new())),
            resets: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_observation(mut self, observation: RawObservation) -> Self {
        self.observation = observation;
        self
    }
}

#[async_trait]
impl Engine for ScriptedEngine {
    async fn reset(&mut self) -> Result<RawObservation> {
        self.cursor = 0;
        *self.resets.lock().unwrap() += 1;
        Ok(self.observation.clone())
    }

    async fn step(&mut self, action: PrimitiveAction) -> Result<StepOutcome> {
        self.stepped.lock().unwrap().push(action);
        let frame = self
            .frames
            .get(self.cursor)
            .copied()
            .unwrap_or(Frame::end(0.0, None));
        self.cursor += 1;

        let mut info = serde_json::Map::new();
        if let Some(status) = frame.end_status {
            info.insert("end_status".to_string(), status.into());
        }

        Ok(StepOutcome {
            observation: self.observation.clone(),
            reward: frame.reward,
            done: frame.done,
            info: StepInfo::new(info),
        })
    }

    fn actions(&self) -> &[PrimitiveAction] {
        &self.actions
    }

    fn monsters(&self) -> Arc<MonsterCatalog> {
        Arc::clone(&self.monsters)
    }
}

/// Factory opening a fresh [`ScriptedEngine`] per task.
pub struct ScriptedFactory {
    pub frames: HashMap<String, Vec<Frame>>,
    pub describer: StaticDescriber,
    pub opened: Arc<Mutex<Vec<String>>>,
}

impl ScriptedFactory {
    pub fn new(describer: StaticDescriber) -> Self {
        Self {
            frames: HashMap::new(),
            describer,
            opened: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_task(mut self, task: &str, frames: Vec<Frame>) -> Self {
        self.frames.insert(task.to_string(), frames);
        self
    }
}

#[async_trait]
impl EngineFactory for ScriptedFactory {
    async fn open(&self, task_id: &str) -> Result<EngineSession> {
        self.opened.lock().unwrap().push(task_id.to_string());
        let frames = self.frames.get(task_id).cloned().unwrap_or_default();
        Ok(EngineSession {
            engine: Box::new(ScriptedEngine::new(frames)),
            describer: Arc::new(self.describer.clone()),
        })
    }
}

/// Chat service replaying queued results and recording every request.
#[derive(Default)]
pub struct StubChat {
    replies: Mutex<VecDeque<std::result::Result<ChatReply, CompletionError>>>,
    pub requests: Mutex<Vec<ChatRequest>>,
    /// Runtime clock reading at each call.
    pub called_at: Mutex<Vec<tokio::time::Instant>>,
}

impl StubChat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str, total_tokens: u64) -> Self {
        self.replies.lock().unwrap().push_back(Ok(ChatReply {
            text: text.to_string(),
            total_tokens,
        }));
        self
    }

    pub fn fail(self, error: CompletionError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Time waited before each retry.
    pub fn waits(&self) -> Vec<Duration> {
        self.called_at
            .lock()
            .unwrap()
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .collect()
    }
}

#[async_trait]
impl ChatCompletion for StubChat {
    async fn complete(
        &self,
        request: &ChatRequest,
    ) -> std::result::Result<ChatReply, CompletionError> {
        self.requests.lock().unwrap().push(request.clone());
        self.called_at.lock().unwrap().push(tokio::time::Instant::now());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CompletionError::Api("script exhausted".to_string())))
    }
}

/// Likelihood model with fixed per-phrase scores.
///
/// Prompts ending in ". \nYou choose to:" with nothing before the period
/// are baseline prompts and use the baseline table.
#[derive(Default)]
pub struct StubLikelihood {
    pub scores: HashMap<String, f64>,
    pub baselines: HashMap<String, f64>,
    pub prompts: Mutex<Vec<(String, Vec<String>)>>,
}

impl StubLikelihood {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(mut self, phrase: &str, score: f64) -> Self {
        self.scores.insert(phrase.to_string(), score);
        self
    }

    pub fn baseline(mut self, phrase: &str, score: f64) -> Self {
        self.baselines.insert(phrase.to_string(), score);
        self
    }

    pub fn baseline_calls(&self) -> usize {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .filter(|(prompt, _)| is_baseline_prompt(prompt))
            .count()
    }
}

pub fn is_baseline_prompt(prompt: &str) -> bool {
    prompt.ends_with(" . \nYou choose to:")
}

#[async_trait]
impl LikelihoodModel for StubLikelihood {
    async fn score(
        &self,
        prompt: &str,
        candidates: &[String],
    ) -> std::result::Result<Vec<f64>, InferenceError> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), candidates.to_vec()));
        let table = if is_baseline_prompt(prompt) {
            &self.baselines
        } else {
            &self.scores
        };
        Ok(candidates
            .iter()
            .map(|c| table.get(c).copied().unwrap_or(0.0))
            .collect())
    }
}
