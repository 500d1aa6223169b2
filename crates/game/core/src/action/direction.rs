//! Compass directions used by movement, attacks and directed item use.

use strum::{EnumIter, EnumString, IntoStaticStr};

use super::PrimitiveAction;

/// One of the eight compass directions.
///
/// Declaration order is the order in which movement actions are offered to
/// the policies, so it must not be rearranged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum CompassDirection {
    North,
    South,
    East,
    West,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl CompassDirection {
    /// All directions in offer order.
    pub const ALL: [CompassDirection; 8] = [
        CompassDirection::North,
        CompassDirection::South,
        CompassDirection::East,
        CompassDirection::West,
        CompassDirection::NorthWest,
        CompassDirection::NorthEast,
        CompassDirection::SouthWest,
        CompassDirection::SouthEast,
    ];

    /// Primary directions that can prefix a secondary one in vision text
    /// ("east" in "east northeast").
    pub const PRIMARY: [CompassDirection; 4] = [
        CompassDirection::East,
        CompassDirection::West,
        CompassDirection::North,
        CompassDirection::South,
    ];

    /// Diagonal directions that can follow a primary one in vision text.
    pub const SECONDARY: [CompassDirection; 4] = [
        CompassDirection::NorthWest,
        CompassDirection::NorthEast,
        CompassDirection::SouthWest,
        CompassDirection::SouthEast,
    ];

    /// Lowercase word used both in language phrases and as the move token.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Primitive action that moves one step in this direction.
    pub const fn primitive(self) -> PrimitiveAction {
        match self {
            CompassDirection::North => PrimitiveAction::North,
            CompassDirection::South => PrimitiveAction::South,
            CompassDirection::East => PrimitiveAction::East,
            CompassDirection::West => PrimitiveAction::West,
            CompassDirection::NorthWest => PrimitiveAction::NorthWest,
            CompassDirection::NorthEast => PrimitiveAction::NorthEast,
            CompassDirection::SouthWest => PrimitiveAction::SouthWest,
            CompassDirection::SouthEast => PrimitiveAction::SouthEast,
        }
    }
}

impl std::fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
