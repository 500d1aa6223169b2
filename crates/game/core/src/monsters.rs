//! Monster-name catalog supplied by the engine.

use crate::error::{CoreError, Result};

/// Monster names indexed by monster id.
///
/// Loaded once per engine and never modified afterwards; share it behind an
/// `Arc` when several consumers need it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MonsterCatalog {
    names: Vec<String>,
}

impl MonsterCatalog {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self, id: usize) -> Result<&str> {
        self.names
            .get(id)
            .map(String::as_str)
            .ok_or(CoreError::UnknownMonster(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Monsters that a vision line reports as adjacent, in catalog order.
    ///
    /// A name matches when "<name> adjacent" occurs anywhere in the line, so
    /// a line may match more than one name.
    pub fn adjacent_in<'a>(&'a self, line: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.iter()
            .filter(move |name| line.contains(&format!("{name} adjacent")))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
