//! # Command Activation
//!
//! Site administrators can switch individual commands off. The persisted state has
//! two shapes with different defaults:
//!
//! - [`ActivationState::Unset`]: never configured. Every command is active.
//! - [`ActivationState::Configured`]: a command is active only if it has an entry
//!   set to `true`. A missing entry means inactive.
//!
//! The asymmetry is intentional: the first save locks down anything the saved state
//! does not explicitly allow.
//!
//! The dispatcher never caches the state. It asks its [`ActivationSource`] on every
//! call, so changes made between calls are always honoured.

use crate::catalog::{self, CommandKey};
use crate::error::Result;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActivationState {
    #[default]
    Unset,
    Configured(BTreeMap<String, bool>),
}

impl ActivationState {
    pub fn configured<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, bool)>,
        K: Into<String>,
    {
        ActivationState::Configured(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_active(&self, key: CommandKey) -> bool {
        match self {
            ActivationState::Unset => true,
            ActivationState::Configured(map) => map.get(key.as_str()).copied().unwrap_or(false),
        }
    }

    /// Every catalog key with its effective activation, in catalog order.
    pub fn effective(&self) -> Vec<(CommandKey, bool)> {
        catalog::keys().map(|k| (k, self.is_active(k))).collect()
    }

    /// The state after an administrator switches one command on or off.
    ///
    /// The result always carries an explicit entry for every catalog key: keys not
    /// touched keep their current effective value. Stale keys no longer in the
    /// catalog are dropped.
    pub fn with_command(&self, key: CommandKey, active: bool) -> ActivationState {
        let map = catalog::keys()
            .map(|k| {
                let value = if k == key { active } else { self.is_active(k) };
                (k.as_str().to_string(), value)
            })
            .collect();
        ActivationState::Configured(map)
    }

    pub fn into_option(self) -> Option<BTreeMap<String, bool>> {
        match self {
            ActivationState::Unset => None,
            ActivationState::Configured(map) => Some(map),
        }
    }
}

impl From<Option<BTreeMap<String, bool>>> for ActivationState {
    fn from(value: Option<BTreeMap<String, bool>>) -> Self {
        match value {
            None => ActivationState::Unset,
            Some(map) => ActivationState::Configured(map),
        }
    }
}

/// Where the dispatcher reads the activation state from.
pub trait ActivationSource {
    fn activation_state(&self) -> Result<ActivationState>;
}

impl ActivationSource for ActivationState {
    fn activation_state(&self) -> Result<ActivationState> {
        Ok(self.clone())
    }
}
