//! Static primitive-action table.
//!
//! Each primitive is one engine key press. Its token aliases are the words a
//! token sequence may use to name it: the command word ("zap", "north") and the
//! literal key character ("z", "k"). Inventory keys are plain letters, so they
//! resolve through the same table to whichever command shares the key code.

use std::collections::HashSet;

use crate::error::{CoreError, Result};

const fn meta(c: u8) -> u8 {
    0x80 | c
}

const fn ctrl(c: u8) -> u8 {
    0x1f & c
}

macro_rules! primitive_actions {
    ($( $variant:ident => $key:expr, [$($token:expr),+ $(,)?]; )+) => {
        /// Single key press understood by the engine.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum PrimitiveAction {
            $( $variant, )+
        }

        impl PrimitiveAction {
            /// Every primitive in table order.
            pub const ALL: &'static [PrimitiveAction] = &[ $( PrimitiveAction::$variant, )+ ];

            /// Key code sent to the engine.
            pub const fn key(self) -> u8 {
                match self {
                    $( PrimitiveAction::$variant => $key, )+
                }
            }

            /// Token aliases, command word first.
            pub const fn tokens(self) -> &'static [&'static str] {
                match self {
                    $( PrimitiveAction::$variant => &[$($token),+], )+
                }
            }
        }
    };
}

primitive_actions! {
    // Compass directions
    North => b'k', ["north", "k"];
    East => b'l', ["east", "l"];
    South => b'j', ["south", "j"];
    West => b'h', ["west", "h"];
    NorthEast => b'u', ["northeast", "u"];
    SouthEast => b'n', ["southeast", "n"];
    SouthWest => b'b', ["southwest", "b"];
    NorthWest => b'y', ["northwest", "y"];

    // Run until something interesting is seen
    FarNorth => b'K', ["far north", "K"];
    FarEast => b'L', ["far east", "L"];
    FarSouth => b'J', ["far south", "J"];
    FarWest => b'H', ["far west", "H"];
    FarNorthEast => b'U', ["far northeast", "U"];
    FarSouthEast => b'N', ["far southeast", "N"];
    FarSouthWest => b'B', ["far southwest", "B"];
    FarNorthWest => b'Y', ["far northwest", "Y"];

    // Stairs, waiting and message paging
    Up => b'<', ["up", "<"];
    Down => b'>', ["down", ">"];
    Wait => b'.', ["wait", "."];
    More => b'\r', ["more", "\r"];

    // Commands
    Apply => b'a', ["apply", "a"];
    Call => b'C', ["call", "C"];
    Cast => b'Z', ["cast", "Z"];
    Close => b'c', ["close", "c"];
    Drop => b'd', ["drop", "d"];
    DropType => b'D', ["droptype", "D"];
    Eat => b'e', ["eat", "e"];
    Engrave => b'E', ["engrave", "E"];
    Esc => ctrl(b'['), ["esc"];
    Fight => b'F', ["fight", "F"];
    Fire => b'f', ["fire", "f"];
    History => b'V', ["history", "V"];
    Inventory => b'i', ["inventory", "i"];
    InventType => b'I', ["inventtype", "I"];
    Kick => ctrl(b'd'), ["kick"];
    Look => b':', ["look", ":"];
    Move => b'm', ["move", "m"];
    MoveFar => b'M', ["movefar", "M"];
    Open => b'o', ["open", "o"];
    Options => b'O', ["options", "O"];
    Pay => b'p', ["pay", "p"];
    Pickup => b',', ["pickup", ","];
    Pray => meta(b'p'), ["pray"];
    PutOn => b'P', ["puton", "P"];
    Quaff => b'q', ["quaff", "q"];
    Quiver => b'Q', ["quiver", "Q"];
    Read => b'r', ["read", "r"];
    Remove => b'R', ["remove", "R"];
    Rush => b'g', ["rush", "g"];
    Rush2 => b'G', ["rush2", "G"];
    Save => b'S', ["save", "S"];
    Search => b's', ["search", "s"];
    Swap => b'x', ["swap", "x"];
    TakeOff => b'T', ["takeoff", "T"];
    TakeOffAll => b'A', ["takeoffall", "A"];
    Throw => b't', ["throw", "t"];
    TwoWeapon => b'X', ["twoweapon", "X"];
    VersionShort => b'v', ["versionshort", "v"];
    Wear => b'W', ["wear", "W"];
    Wield => b'w', ["wield", "w"];
    Zap => b'z', ["zap", "z"];

    // Text characters answering prompts
    Plus => b'+', ["plus", "+"];
    Minus => b'-', ["minus", "-"];
    Space => b' ', ["space", " "];
    Apos => b'\'', ["apos", "'"];
    Quote => b'"', ["quote", "\""];
    Dollar => b'$', ["dollar", "$"];
}

impl PrimitiveAction {
    /// Command word of this primitive.
    pub const fn name(self) -> &'static str {
        self.tokens()[0]
    }

    /// Resolves a token to the first primitive carrying it as an alias.
    pub fn from_token(token: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|action| action.tokens().contains(&token))
            .ok_or_else(|| CoreError::UnknownToken(token.to_string()))
    }

    /// Resolves an engine key code to its primitive.
    pub fn from_key(key: u8) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|action| action.key() == key)
            .ok_or(CoreError::UnknownKey(key))
    }
}

/// Expands a set of allowed primitives into every token that names one of them.
///
/// A language action survives filtering only when its first token is in this
/// set.
pub fn allowed_tokens<'a, I>(allowed: I) -> HashSet<&'static str>
where
    I: IntoIterator<Item = &'a PrimitiveAction>,
{
    allowed
        .into_iter()
        .flat_map(|action| action.tokens().iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique() {
        let keys: HashSet<u8> = PrimitiveAction::ALL.iter().map(|a| a.key()).collect();
        assert_eq!(keys.len(), PrimitiveAction::ALL.len());
    }

    #[test]
    fn every_letter_resolves_to_a_primitive() {
        for c in (b'a'..=b'z').chain(b'A'..=b'Z') {
            let token = (c as char).to_string();
            let action = PrimitiveAction::from_token(&token).unwrap();
            assert_eq!(action.key(), c);
        }
    }

    #[test]
    fn word_and_key_aliases_agree() {
        assert_eq!(PrimitiveAction::from_token("zap").unwrap(), PrimitiveAction::Zap);
        assert_eq!(PrimitiveAction::from_token("z").unwrap(), PrimitiveAction::Zap);
        assert_eq!(
            PrimitiveAction::from_token("northwest").unwrap(),
            PrimitiveAction::NorthWest
        );
        assert_eq!(PrimitiveAction::from_token(",").unwrap(), PrimitiveAction::Pickup);
    }

    #[test]
    fn unknown_token_is_an_error() {
        assert_eq!(
            PrimitiveAction::from_token("dance"),
            Err(CoreError::UnknownToken("dance".to_string()))
        );
    }

    #[test]
    fn allowed_tokens_expand_every_alias() {
        let tokens = allowed_tokens(&[PrimitiveAction::North, PrimitiveAction::Quaff]);
        assert_eq!(tokens.len(), 4);
        assert!(tokens.contains("north"));
        assert!(tokens.contains("k"));
        assert!(tokens.contains("q"));
        assert!(!tokens.contains("z"));
    }

    #[test]
    fn from_key_round_trips_meta_and_control_keys() {
        assert_eq!(PrimitiveAction::from_key(0xf0).unwrap(), PrimitiveAction::Pray);
        assert_eq!(PrimitiveAction::from_key(4).unwrap(), PrimitiveAction::Kick);
        assert_eq!(PrimitiveAction::from_key(27).unwrap(), PrimitiveAction::Esc);
    }
}
