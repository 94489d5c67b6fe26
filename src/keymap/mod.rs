//! Key and modifier name tables
//!
//! [`Keymap`] bundles the two tables so they can be built and validated
//! together at startup, then shared read-only by the parser and dispatcher.

pub mod keys;
pub mod modifiers;

pub use keys::{literal_key_name, KeyEntry, KeyTable, Keystroke, KEY_DEFINITIONS, WINDOWS_KEY};
pub use modifiers::{mods, ModifierTable, MODIFIER_DEFINITIONS, MODIFIER_SYNONYMS};

use crate::error::KeymapError;

/// Validated key and modifier tables
#[derive(Debug, Clone)]
pub struct Keymap {
    keys: KeyTable,
    modifiers: ModifierTable,
}

impl Keymap {
    /// Build the built-in tables, validating alias chains and modifier bits.
    pub fn builtin() -> Result<Self, KeymapError> {
        Ok(Self {
            keys: KeyTable::builtin()?,
            modifiers: ModifierTable::builtin()?,
        })
    }

    pub fn new(keys: KeyTable, modifiers: ModifierTable) -> Self {
        Self { keys, modifiers }
    }

    pub fn keys(&self) -> &KeyTable {
        &self.keys
    }

    pub fn modifiers(&self) -> &ModifierTable {
        &self.modifiers
    }
}
