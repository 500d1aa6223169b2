//! Actor policies.
//!
//! Every policy implements [`crate::api::ActorPolicy`] and picks one entry of
//! the admissible list:
//! - [`RandomActor`] samples by fixed weights
//! - [`ChatActor`] prompts a chat model and matches its reply to the menu
//! - [`LogitActor`] ranks phrases by likelihood relative to a baseline
mod chat;
mod logit;
mod random;
mod sampling;

pub use chat::{ChatActor, decision_span, score_reply};
pub use logit::{BaselineCache, LogitActor, actor_prompt};
pub use random::{RandomActor, action_weight};
pub use sampling::{collapse_to_max, sample_categorical, softmax};

/// Game domain a policy is prompted for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Domain {
    #[default]
    NetHack,
}

impl Domain {
    /// Opening sentence of every prompt.
    pub fn prompt(self) -> &'static str {
        match self {
            Domain::NetHack => "You are playing the rogue-like game NetHack.",
        }
    }

    /// Sentence listing what the agent can do.
    pub fn affordances(self) -> &'static str {
        match self {
            Domain::NetHack => {
                "You can move north, south, east, west, northeast, southeast, southwest, or \
                 northwest. You can attack monsters adjacent to you, pick up items under you, \
                 zap wands, eat food, wear armor, use keys, drink potions, and put on rings."
            }
        }
    }

    pub fn system_message(self) -> String {
        format!("{} {}", self.prompt(), self.affordances())
    }
}
