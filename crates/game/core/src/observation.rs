//! Raw per-step snapshot produced by the engine.
//!
//! The snapshot is treated as opaque by everything except the description
//! service, with one exception: inventory strings and key letters are read
//! directly to bind inventory-conditioned actions to their keys.

/// Structured engine observation for a single step.
///
/// Fixed-width byte rows are NUL padded, as the engine emits them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawObservation {
    /// Glyph id per map cell.
    pub glyphs: Vec<Vec<i16>>,
    /// Bottom-line status vector.
    pub blstats: Vec<i64>,
    /// Terminal character buffer (holds the top-line message).
    pub tty_chars: Vec<Vec<u8>>,
    /// One NUL-padded description per inventory slot.
    pub inv_strs: Vec<Vec<u8>>,
    /// Key letter per inventory slot, 0 for an empty slot.
    pub inv_letters: Vec<u8>,
    /// Terminal cursor as (row, column).
    pub tty_cursor: (u8, u8),
}

impl RawObservation {
    /// Replaces the inventory with the given (key, description) slots.
    pub fn with_inventory<'a, I>(mut self, slots: I) -> Self
    where
        I: IntoIterator<Item = (char, &'a str)>,
    {
        self.inv_strs.clear();
        self.inv_letters.clear();
        for (key, item) in slots {
            self.inv_strs.push(item.as_bytes().to_vec());
            self.inv_letters.push(key as u8);
        }
        self
    }

    /// Descriptions of every occupied inventory slot, in slot order.
    pub fn inventory_items(&self) -> Vec<String> {
        self.inv_strs
            .iter()
            .filter(|row| row.iter().any(|&b| b != 0))
            .map(|row| decode_row(row))
            .collect()
    }

    /// Key of the first inventory slot whose description contains `item`.
    ///
    /// Substring matching means two items sharing a description fragment
    /// resolve to whichever slot comes first.
    pub fn item_key(&self, item: &str) -> Option<char> {
        self.inv_strs
            .iter()
            .zip(&self.inv_letters)
            .find(|(row, _)| decode_row(row).contains(item))
            .and_then(|(_, &letter)| (letter != 0).then_some(letter as char))
    }
}

fn decode_row(row: &[u8]) -> String {
    let bytes: Vec<u8> = row.iter().copied().filter(|&b| b != 0).collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Decodes Latin-1 bytes, one char per byte.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
