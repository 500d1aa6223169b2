//! Observation and action translation.
//!
//! Turns a raw engine snapshot into the two views a policy consumes: an
//! ordered natural-language observation, and the admissible actions as
//! index-aligned (phrase, engine token sequence) pairs.
//!
//! - [`extractor`] asks the description service for the five text blocks
//! - [`compass`] splits concatenated compass words in vision text
//! - [`composer`] assembles the text blocks into a [`LanguageObservation`]
//! - [`admissible`] enumerates and filters [`AdmissibleActions`]
//! - [`inventory`] classifies inventory items into action categories
pub mod admissible;
pub mod compass;
pub mod composer;
pub mod extractor;
pub mod inventory;

pub use admissible::{ActionEntry, AdmissibleActions, admissible_actions};
pub use compass::normalize_compass;
pub use composer::{LanguageObservation, compose};
pub use extractor::{TextFields, extract};
pub use inventory::{ItemCategory, item_name};
