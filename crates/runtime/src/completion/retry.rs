//! Retry policy for completion calls.
//!
//! Transient failures (service unavailable, generic API errors) back off
//! exponentially, rate limits wait a long fixed delay, and rejected requests
//! are retried at once with the oldest few-shot pair removed. Rejected
//! credentials are never retried.
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use super::{ChatCompletion, ChatReply, ChatRequest, CompletionError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts before giving up.
    pub max_tries: u32,
    /// First transient backoff; doubles per consecutive transient failure.
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub rate_limit_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_tries: 100,
            base_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(32),
            rate_limit_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Policy with every delay set to zero.
    pub fn immediate(max_tries: u32) -> Self {
        Self {
            max_tries,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            rate_limit_delay: Duration::ZERO,
        }
    }

    fn transient_delay(&self, consecutive: u32) -> Duration {
        self.base_delay
            .saturating_mul(1 << consecutive.min(16))
            .min(self.max_delay)
    }
}

/// Sends `request`, recovering from failures according to `policy`.
pub async fn complete_with_retry(
    service: &dyn ChatCompletion,
    policy: &RetryPolicy,
    mut request: ChatRequest,
) -> Result<ChatReply, CompletionError> {
    let mut transient = 0;

    for attempt in 1..=policy.max_tries {
        let error = match service.complete(&request).await {
            Ok(reply) => {
                if attempt > 1 {
                    info!("Completion succeeded after {} tries", attempt);
                }
                return Ok(reply);
            }
            Err(error) => error,
        };

        if attempt == policy.max_tries {
            return Err(CompletionError::Exhausted {
                tries: attempt,
                last: Box::new(error),
            });
        }

        let delay = match &error {
            CompletionError::ServiceUnavailable(_) | CompletionError::Api(_) => {
                let delay = policy.transient_delay(transient);
                transient += 1;
                delay
            }
            CompletionError::RateLimited(_) => {
                transient = 0;
                policy.rate_limit_delay
            }
            CompletionError::InvalidRequest(_) => {
                transient = 0;
                request.drop_oldest_example();
                Duration::ZERO
            }
            CompletionError::Unauthorized(_) | CompletionError::Exhausted { .. } => {
                return Err(error);
            }
        };

        warn!(
            kind = error.kind(),
            "Completion failed (attempt {}/{}): {}. Retrying in {:?}...",
            attempt,
            policy.max_tries,
            error,
            delay
        );

        if !delay.is_zero() {
            sleep(delay).await;
        }
    }

    Err(CompletionError::Exhausted {
        tries: policy.max_tries,
        last: Box::new(CompletionError::Api("no attempts were made".to_string())),
    })
}
