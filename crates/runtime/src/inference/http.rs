//! JSON-over-HTTP likelihood service client.
//!
//! The service accepts `{"prompt": .., "candidates": [..]}` and answers with
//! `{"scores": [..]}`, one mean log-probability per candidate. A candidate the
//! model cannot score is reported as `null` and read back as `-inf`.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{InferenceError, LikelihoodModel};

#[derive(Debug, Serialize)]
struct ScoreRequest<'a> {
    prompt: &'a str,
    candidates: &'a [String],
}

#[derive(Debug, Deserialize)]
struct ScoreResponse {
    scores: Vec<Option<f64>>,
}

pub struct HttpLikelihood {
    endpoint: String,
    http_client: reqwest::Client,
}

impl HttpLikelihood {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LikelihoodModel for HttpLikelihood {
    async fn score(&self, prompt: &str, candidates: &[String]) -> Result<Vec<f64>, InferenceError> {
        debug!(
            "Scoring {} candidates against {} byte prompt",
            candidates.len(),
            prompt.len()
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&ScoreRequest { prompt, candidates })
            .send()
            .await
            .map_err(InferenceError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ScoreResponse = response.json().await.map_err(InferenceError::Malformed)?;
        Ok(parsed
            .scores
            .into_iter()
            .map(|score| score.unwrap_or(f64::NEG_INFINITY))
            .collect())
    }
}
