//! Text blocks to language observation.
use std::fmt;

use super::extractor::TextFields;

/// Ordered sentences describing one step.
///
/// Order is inventory, status, visible tiles, then the last message. Lines
/// never contain a newline, so [`LanguageObservation::to_text`] and
/// [`LanguageObservation::from_text`] are inverse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageObservation {
    lines: Vec<String>,
}

impl LanguageObservation {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    /// One-paragraph summary: lines joined by ". " with each line's own
    /// trailing period dropped.
    pub fn flatten(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.strip_suffix('.').unwrap_or(line))
            .collect::<Vec<_>>()
            .join(". ")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for LanguageObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Builds the language observation for one set of text blocks.
pub fn compose(fields: &TextFields) -> LanguageObservation {
    let inventory = non_empty_lines(&fields.inventory)
        .map(|line| format!("You have {}", strip_key_prefix(line)));
    let status = non_empty_lines(&fields.status).map(str::to_string);
    let vision = non_empty_lines(&fields.vision).map(|line| format!("You see a {line}"));
    let message = (!fields.message.is_empty()).then(|| fields.message.replace('\n', "; "));

    LanguageObservation {
        lines: inventory.chain(status).chain(vision).chain(message).collect(),
    }
}

fn non_empty_lines(block: &str) -> impl Iterator<Item = &str> {
    block.split('\n').filter(|line| !line.is_empty())
}

/// Drops the three-character "f: " key prefix of an inventory line.
fn strip_key_prefix(line: &str) -> &str {
    line.char_indices()
        .nth(3)
        .map(|(offset, _)| &line[offset..])
        .unwrap_or("")
}
