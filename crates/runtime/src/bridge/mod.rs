//! Engine hosted in another process.
//!
//! The engine process speaks the JSON-lines [`protocol`] over its stdio. One
//! connection serves both as the [`Engine`] and as the
//! [`DescriptionService`], so the two share the connection behind a mutex.
pub mod protocol;

use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use nle_core::{MonsterCatalog, PrimitiveAction, RawObservation};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use self::protocol::{Reply, Request};
use crate::api::{
    DescriptionService, Engine, EngineFactory, EngineSession, Result, RuntimeError, StepOutcome,
    TextField,
};

type Reader = BufReader<Box<dyn AsyncRead + Send + Unpin>>;
type Writer = Box<dyn AsyncWrite + Send + Unpin>;

struct BridgeIo {
    reader: Reader,
    writer: Writer,
    // Held so the process is killed when the connection is dropped.
    _child: Option<Child>,
}

impl BridgeIo {
    async fn call(&mut self, request: &Request) -> Result<Reply> {
        let mut line = serde_json::to_string(request).map_err(RuntimeError::BridgeProtocol)?;
        line.push('\n');
        self.writer
            .write_all(line.as_bytes())
            .await
            .map_err(RuntimeError::BridgeIo)?;
        self.writer.flush().await.map_err(RuntimeError::BridgeIo)?;

        let mut response = String::new();
        let read = self
            .reader
            .read_line(&mut response)
            .await
            .map_err(RuntimeError::BridgeIo)?;
        if read == 0 {
            return Err(RuntimeError::BridgeClosed);
        }

        match serde_json::from_str(&response).map_err(RuntimeError::BridgeProtocol)? {
            Reply::Error { message } => Err(RuntimeError::Engine(message)),
            reply => Ok(reply),
        }
    }
}

/// Engine side of a bridge connection.
pub struct EngineBridge {
    io: Arc<Mutex<BridgeIo>>,
    actions: Vec<PrimitiveAction>,
    monsters: Arc<MonsterCatalog>,
}

impl EngineBridge {
    /// Performs the hello handshake over an already open byte stream.
    pub async fn connect<R, W>(reader: R, writer: W, task: &str) -> Result<Self>
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let reader: Box<dyn AsyncRead + Send + Unpin> = Box::new(reader);
        let io = BridgeIo {
            reader: BufReader::new(reader),
            writer: Box::new(writer),
            _child: None,
        };
        Self::handshake(io, task).await
    }

    /// Spawns `program` and performs the handshake over its stdio.
    pub async fn spawn(program: &str, args: &[String], task: &str) -> Result<Self> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(RuntimeError::BridgeIo)?;

        let stdin = child.stdin.take().ok_or(RuntimeError::BridgeClosed)?;
        let stdout = child.stdout.take().ok_or(RuntimeError::BridgeClosed)?;

        let reader: Box<dyn AsyncRead + Send + Unpin> = Box::new(stdout);
        let io = BridgeIo {
            reader: BufReader::new(reader),
            writer: Box::new(stdin),
            _child: Some(child),
        };
        Self::handshake(io, task).await
    }

    async fn handshake(mut io: BridgeIo, task: &str) -> Result<Self> {
        let reply = io
            .call(&Request::Hello {
                task: task.to_string(),
            })
            .await?;
        let (actions, monsters) = match reply {
            Reply::Ready { actions, monsters } => (actions, monsters),
            other => {
                return Err(RuntimeError::UnexpectedReply {
                    expected: "ready",
                    got: other.label(),
                });
            }
        };

        let mut allowed = Vec::with_capacity(actions.len());
        for key in actions {
            match PrimitiveAction::from_key(key) {
                Ok(action) => allowed.push(action),
                Err(e) => warn!("Ignoring engine action: {}", e),
            }
        }

        info!(
            "Engine bridge ready for {}: {} actions, {} monsters",
            task,
            allowed.len(),
            monsters.len()
        );

        Ok(Self {
            io: Arc::new(Mutex::new(io)),
            actions: allowed,
            monsters: Arc::new(MonsterCatalog::new(monsters)),
        })
    }

    /// Description service sharing this connection.
    pub fn describer(&self) -> BridgeDescriber {
        BridgeDescriber {
            io: Arc::clone(&self.io),
        }
    }

    pub fn into_session(self) -> EngineSession {
        let describer = Arc::new(self.describer());
        EngineSession {
            engine: Box::new(self),
            describer,
        }
    }
}

#[async_trait]
impl Engine for EngineBridge {
    async fn reset(&mut self) -> Result<RawObservation> {
        match self.io.lock().await.call(&Request::Reset).await? {
            Reply::Observation { observation } => Ok(observation),
            other => Err(RuntimeError::UnexpectedReply {
                expected: "observation",
                got: other.label(),
            }),
        }
    }

    async fn step(&mut self, action: PrimitiveAction) -> Result<StepOutcome> {
        let request = Request::Step { key: action.key() };
        match self.io.lock().await.call(&request).await? {
            Reply::Step {
                observation,
                reward,
                done,
                info,
            } => {
                debug!("Engine step {:?}: reward={} done={}", action, reward, done);
                Ok(StepOutcome {
                    observation,
                    reward,
                    done,
                    info,
                })
            }
            other => Err(RuntimeError::UnexpectedReply {
                expected: "step",
                got: other.label(),
            }),
        }
    }

    fn actions(&self) -> &[PrimitiveAction] {
        &self.actions
    }

    fn monsters(&self) -> Arc<MonsterCatalog> {
        Arc::clone(&self.monsters)
    }
}

/// Description-service side of a bridge connection.
#[derive(Clone)]
pub struct BridgeDescriber {
    io: Arc<Mutex<BridgeIo>>,
}

#[async_trait]
impl DescriptionService for BridgeDescriber {
    async fn describe(&self, field: TextField, observation: &RawObservation) -> Result<Vec<u8>> {
        let request = Request::Describe {
            field,
            observation: observation.clone(),
        };
        match self.io.lock().await.call(&request).await? {
            Reply::Text { bytes } => Ok(bytes),
            other => Err(RuntimeError::UnexpectedReply {
                expected: "text",
                got: other.label(),
            }),
        }
    }
}

/// Spawns one engine process per task.
#[derive(Debug, Clone)]
pub struct BridgeFactory {
    program: String,
    args: Vec<String>,
}

impl BridgeFactory {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl EngineFactory for BridgeFactory {
    async fn open(&self, task_id: &str) -> Result<EngineSession> {
        let bridge = EngineBridge::spawn(&self.program, &self.args, task_id).await?;
        Ok(bridge.into_session())
    }
}
