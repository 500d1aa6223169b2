//! Engine-facing data model shared by the agent runtime and tools.
//!
//! `nle-core` describes what the game engine hands to the agent and what the
//! agent hands back:
//! - [`observation`] holds the raw per-step snapshot and inventory lookups
//! - [`action`] defines compass directions and the static primitive-action
//!   table that maps engine keys to their token aliases
//! - [`monsters`] wraps the engine's monster-name catalog
//!
//! Everything here is read-only data or pure functions. Stateful concerns
//! (engine I/O, policies, rollouts) live in the runtime crate.
pub mod action;
pub mod error;
pub mod monsters;
pub mod observation;

pub use action::{CompassDirection, PrimitiveAction, allowed_tokens};
pub use error::{CoreError, Result};
pub use monsters::MonsterCatalog;
pub use observation::{RawObservation, decode_latin1};
