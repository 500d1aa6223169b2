//! Read-only engine facts consulted while enumerating actions.
//!
//! The oracle bundles the allowed-token set and the monster catalog so the
//! translator can be driven without holding a reference to the engine. Both
//! are fixed for the lifetime of an engine.
use std::collections::HashSet;
use std::sync::Arc;

use nle_core::{MonsterCatalog, PrimitiveAction, allowed_tokens};

use crate::api::Engine;

#[derive(Clone, Debug)]
pub struct ActionOracle {
    allowed: HashSet<&'static str>,
    monsters: Arc<MonsterCatalog>,
}

impl ActionOracle {
    pub fn new(actions: &[PrimitiveAction], monsters: Arc<MonsterCatalog>) -> Self {
        Self {
            allowed: allowed_tokens(actions),
            monsters,
        }
    }

    /// Captures the allowed actions and monster catalog of an engine.
    pub fn from_engine(engine: &dyn Engine) -> Self {
        Self::new(engine.actions(), engine.monsters())
    }

    /// Whether `token` names one of the allowed primitives.
    pub fn allows(&self, token: &str) -> bool {
        self.allowed.contains(token)
    }

    pub fn monsters(&self) -> &MonsterCatalog {
        &self.monsters
    }
}
