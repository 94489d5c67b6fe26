//! Error types for macro translation and table construction

use hidg_transport::TransportError;
use thiserror::Error;

/// Errors raised while translating or sending a macro
///
/// Every variant aborts the macro it occurs in. Nothing is retried.
#[derive(Error, Debug)]
pub enum MacroError {
    /// Key name not present in the key table
    #[error("Unknown key: \"{0}\"")]
    KeyLookup(String),

    /// Modifier name not present in the modifier table
    #[error("Unknown modifier: \"{0}\"")]
    ModifierLookup(String),

    /// Malformed instruction inside a `{...}` group
    #[error("Invalid instruction \"{instruction}\": {reason}")]
    Syntax { instruction: String, reason: String },

    /// Report could not be delivered to the sink
    #[error("Report write failed: {0}")]
    ReportWrite(#[from] TransportError),
}

impl MacroError {
    pub(crate) fn syntax(instruction: &str, reason: impl Into<String>) -> Self {
        MacroError::Syntax {
            instruction: instruction.to_string(),
            reason: reason.into(),
        }
    }
}

/// Inconsistent key or modifier definitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    #[error("Key \"{0}\" is defined more than once")]
    DuplicateKey(String),

    #[error("Alias \"{name}\" points at unknown key \"{target}\"")]
    UnknownAliasTarget { name: String, target: String },

    #[error("Alias \"{name}\" points at \"{target}\", which is itself an alias")]
    ChainedAlias { name: String, target: String },

    #[error("Modifier \"{0}\" is defined more than once")]
    DuplicateModifier(String),

    #[error("Modifier \"{name}\" has bit 0x{bit:02X}, which is not a single bit")]
    InvalidModifierBit { name: String, bit: u8 },

    #[error("Modifier \"{name}\" reuses bit 0x{bit:02X}")]
    ModifierCollision { name: String, bit: u8 },

    #[error("Modifier synonym \"{name}\" points at unknown modifier \"{target}\"")]
    UnknownSynonymTarget { name: String, target: String },
}
