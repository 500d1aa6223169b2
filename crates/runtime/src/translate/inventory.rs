//! Inventory item classification.
//!
//! Each inventory string belongs to at most one [`ItemCategory`]; the
//! categories are tried in table order and the first match wins, so a
//! "potion of ring" would be a potion.
use nle_core::CompassDirection;

use super::admissible::ActionEntry;

/// Item kinds that unlock inventory actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemCategory {
    Wand,
    Food,
    Wearable,
    Potion,
    Ring,
    Horn,
}

type Predicate = fn(&str) -> bool;

const CATEGORIES: &[(ItemCategory, Predicate)] = &[
    (ItemCategory::Wand, is_wand),
    (ItemCategory::Food, is_food),
    (ItemCategory::Wearable, is_unworn_wearable),
    (ItemCategory::Potion, is_potion),
    (ItemCategory::Ring, is_unworn_ring),
    (ItemCategory::Horn, is_horn),
];

fn is_wand(item: &str) -> bool {
    item.contains("wand")
}

fn is_food(item: &str) -> bool {
    ["apple", "pear", "banana"].iter().any(|food| item.contains(food))
}

fn is_unworn_wearable(item: &str) -> bool {
    ["robe", "shoes", "boots"].iter().any(|wear| item.contains(wear))
        && !item.contains("(being worn)")
}

fn is_potion(item: &str) -> bool {
    item.contains("potion")
}

fn is_unworn_ring(item: &str) -> bool {
    item.contains("ring") && !item.contains("(on right hand)") && !item.contains("(on left hand)")
}

fn is_horn(item: &str) -> bool {
    item.contains("horn")
}

impl ItemCategory {
    /// First category whose predicate accepts `item`.
    pub fn classify(item: &str) -> Option<Self> {
        CATEGORIES
            .iter()
            .find(|(_, accepts)| accepts(item))
            .map(|(category, _)| *category)
    }

    /// Actions this item offers, bound to inventory key `key`.
    pub fn actions(self, key: char, name: &str) -> Vec<ActionEntry> {
        let key = key.to_string();
        match self {
            ItemCategory::Wand => CompassDirection::ALL
                .iter()
                .map(|dir| {
                    ActionEntry::new(
                        format!("zap {name} {dir}"),
                        ["z", key.as_str(), dir.as_str()],
                    )
                })
                .collect(),
            ItemCategory::Food => vec![ActionEntry::new(format!("eat {name}"), ["e", key.as_str()])],
            ItemCategory::Wearable => vec![ActionEntry::new(format!("wear {name}"), ["W", key.as_str()])],
            ItemCategory::Potion => vec![ActionEntry::new(format!("drink {name}"), ["q", key.as_str()])],
            ItemCategory::Ring => {
                vec![ActionEntry::new(format!("put on {name}"), ["P", key.as_str(), "r"])]
            }
            ItemCategory::Horn => CompassDirection::ALL
                .iter()
                .map(|dir| {
                    ActionEntry::new(
                        format!("blow horn {dir}"),
                        ["a", key.as_str(), "y", dir.as_str()],
                    )
                })
                .collect(),
        }
    }
}

/// Display name of the item under `key` in the rendered inventory text.
///
/// Finds the line starting with "<key>: ", strips the prefix and any trailing
/// parenthetical annotation. Returns an empty string when no line matches.
pub fn item_name(inventory_text: &str, key: char) -> String {
    let prefix = format!("{key}: ");
    inventory_text
        .split('\n')
        .filter(|line| line.chars().count() > 3)
        .find_map(|line| line.strip_prefix(prefix.as_str()))
        .map(strip_annotation)
        .unwrap_or_default()
}

fn strip_annotation(item: &str) -> String {
    match item.find('(') {
        Some(paren) => item[..paren].trim_end().to_string(),
        None => item.to_string(),
    }
}
