//! Engine action vocabulary.
//!
//! The engine consumes single key presses. Every key press is a
//! [`PrimitiveAction`], and each primitive is known by one or more literal
//! tokens (its command word and its key character). Language actions are
//! expressed as token sequences, so the only thing the agent ever sends to the
//! engine is a token resolved back to its primitive.
mod direction;
mod primitive;

pub use direction::CompassDirection;
pub use primitive::{PrimitiveAction, allowed_tokens};
