//! Admissible action enumeration.
//!
//! Entries are built as (phrase, token sequence) pairs in one list, so the
//! phrase and sequence views can never fall out of step.
use nle_core::{CompassDirection, RawObservation};
use tracing::debug;

use super::extractor::TextFields;
use super::inventory::{ItemCategory, item_name};
use crate::api::{ActionChoice, Result, RuntimeError};
use crate::oracle::ActionOracle;

const PICKUP_MARKER: &str = "You see here ";

/// One language action and the engine tokens that perform it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEntry {
    pub phrase: String,
    pub sequence: Vec<String>,
}

impl ActionEntry {
    pub fn new<P, I, S>(phrase: P, sequence: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            phrase: phrase.into(),
            sequence: sequence.into_iter().map(Into::into).collect(),
        }
    }

    /// First engine token, the one checked against the allowed set.
    pub fn first_token(&self) -> Option<&str> {
        self.sequence.first().map(String::as_str)
    }
}

/// Non-empty, ordered list of admissible actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissibleActions {
    entries: Vec<ActionEntry>,
}

impl AdmissibleActions {
    /// Fails with [`RuntimeError::NoAdmissibleActions`] on an empty list.
    pub fn new(entries: Vec<ActionEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(RuntimeError::NoAdmissibleActions);
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ActionEntry] {
        &self.entries
    }

    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.phrase.as_str())
    }

    pub fn sequences(&self) -> impl Iterator<Item = &[String]> {
        self.entries.iter().map(|entry| entry.sequence.as_slice())
    }

    pub fn get(&self, index: usize) -> Option<&ActionEntry> {
        self.entries.get(index)
    }

    pub fn position(&self, phrase: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.phrase == phrase)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds the [`ActionChoice`] for the entry at `index`.
    pub fn choose(&self, index: usize, generation: String, tokens_used: u64) -> Result<ActionChoice> {
        let entry = self.entries.get(index).ok_or(RuntimeError::ActionIndex {
            index,
            len: self.entries.len(),
        })?;
        Ok(ActionChoice {
            sequence: entry.sequence.clone(),
            phrase: entry.phrase.clone(),
            generation,
            tokens_used,
        })
    }
}

/// Enumerates the admissible actions for one observation.
///
/// Groups are appended in a fixed order (movement, attacks, key use, pickup,
/// inventory) and then filtered so that every surviving sequence starts with
/// an allowed token.
pub fn admissible_actions(
    observation: &RawObservation,
    fields: &TextFields,
    oracle: &ActionOracle,
) -> Result<AdmissibleActions> {
    let mut entries: Vec<ActionEntry> = CompassDirection::ALL
        .iter()
        .map(|dir| ActionEntry::new(format!("move {dir}"), [dir.as_str()]))
        .collect();

    for line in fields.vision_lines() {
        let Some(target) = line.split_whitespace().last() else {
            continue;
        };
        for monster in oracle.monsters().adjacent_in(line) {
            entries.push(ActionEntry::new(format!("attack the {monster}"), [target]));
        }
    }

    let inventory = observation.inventory_items();

    let door_adjacent = fields.vision_lines().any(|line| line.contains("door adjacent"));
    if door_adjacent && inventory.iter().any(|item| item.to_lowercase().contains("key")) {
        entries.push(ActionEntry::new("use key", ["a"]));
    }

    if let Some(at) = fields.message.find(PICKUP_MARKER) {
        let rest = &fields.message[at + PICKUP_MARKER.len()..];
        let item = rest.split('.').next().unwrap_or(rest);
        entries.push(ActionEntry::new(format!("pick up {item}"), [","]));
    }

    for item in &inventory {
        let Some(category) = ItemCategory::classify(item) else {
            continue;
        };
        let Some(key) = observation.item_key(item) else {
            continue;
        };
        let name = item_name(&fields.inventory, key);
        entries.extend(category.actions(key, &name));
    }

    let total = entries.len();
    entries.retain(|entry| entry.first_token().is_some_and(|token| oracle.allows(token)));

    debug!(
        total,
        kept = entries.len(),
        "Enumerated admissible actions"
    );

    AdmissibleActions::new(entries)
}
