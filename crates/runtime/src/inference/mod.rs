//! Likelihood model abstraction used by the log-likelihood policy.
mod http;

pub use http::HttpLikelihood;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("likelihood request failed")]
    Transport(#[source] reqwest::Error),

    #[error("likelihood service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("likelihood service sent malformed response")]
    Malformed(#[source] reqwest::Error),
}

/// Scores candidate continuations of a prompt.
#[async_trait]
pub trait LikelihoodModel: Send + Sync {
    /// Mean per-token log-probability of each candidate given `prompt`, in
    /// candidate order.
    async fn score(&self, prompt: &str, candidates: &[String]) -> Result<Vec<f64>, InferenceError>;
}
