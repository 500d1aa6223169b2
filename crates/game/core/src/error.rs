//! Error types for the engine data model.

use thiserror::Error;

/// Errors raised while resolving engine-facing data.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("token {0:?} does not name any primitive action")]
    UnknownToken(String),

    #[error("key code {0} does not belong to any primitive action")]
    UnknownKey(u8),

    #[error("monster id {0} is outside the catalog")]
    UnknownMonster(usize),
}

pub type Result<T> = std::result::Result<T, CoreError>;
