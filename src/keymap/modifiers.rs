//! Modifier name table

use std::collections::HashMap;

use crate::error::{KeymapError, MacroError};

/// HID modifier bitmask constants (USB HID Report Descriptor modifier byte).
///
/// These match the bit positions in the first byte of a standard HID keyboard
/// report, where each bit corresponds to a modifier key (usage 0xE0-0xE7).
pub mod mods {
    pub const LCTRL: u8 = 0x01;
    pub const LSHIFT: u8 = 0x02;
    pub const LALT: u8 = 0x04;
    pub const LGUI: u8 = 0x08;
    pub const RCTRL: u8 = 0x10;
    pub const RSHIFT: u8 = 0x20;
    pub const RALT: u8 = 0x40;
    pub const RGUI: u8 = 0x80;
}

/// Canonical modifier names, lowest bit first.
pub static MODIFIER_DEFINITIONS: &[(&str, u8)] = &[
    ("leftctrl", mods::LCTRL),
    ("leftshift", mods::LSHIFT),
    ("leftalt", mods::LALT),
    ("leftmeta", mods::LGUI),
    ("rightctrl", mods::RCTRL),
    ("rightshift", mods::RSHIFT),
    ("rightalt", mods::RALT),
    ("rightmeta", mods::RGUI),
];

/// Convenience names and the canonical modifier each one stands for.
pub static MODIFIER_SYNONYMS: &[(&str, &str)] = &[
    ("shift", "leftshift"),
    ("alt", "leftalt"),
    ("ctrl", "leftctrl"),
    ("control", "leftctrl"),
];

/// Modifier name to bit lookup, synonyms already expanded.
#[derive(Debug, Clone)]
pub struct ModifierTable {
    bits: HashMap<&'static str, u8>,
    canonical: &'static [(&'static str, u8)],
    synonyms: &'static [(&'static str, &'static str)],
}

impl ModifierTable {
    pub fn builtin() -> Result<Self, KeymapError> {
        Self::from_definitions(MODIFIER_DEFINITIONS, MODIFIER_SYNONYMS)
    }

    /// Build and validate a table.
    ///
    /// Every canonical bit must be a single power of two not used by any
    /// other canonical name. Synonyms must name a canonical entry.
    pub fn from_definitions(
        canonical: &'static [(&'static str, u8)],
        synonyms: &'static [(&'static str, &'static str)],
    ) -> Result<Self, KeymapError> {
        let mut bits = HashMap::with_capacity(canonical.len() + synonyms.len());
        let mut seen = 0u8;

        for &(name, bit) in canonical {
            if !bit.is_power_of_two() {
                return Err(KeymapError::InvalidModifierBit {
                    name: name.to_string(),
                    bit,
                });
            }
            if seen & bit != 0 {
                return Err(KeymapError::ModifierCollision {
                    name: name.to_string(),
                    bit,
                });
            }
            seen |= bit;
            if bits.insert(name, bit).is_some() {
                return Err(KeymapError::DuplicateModifier(name.to_string()));
            }
        }

        for &(synonym, target) in synonyms {
            let bit = canonical
                .iter()
                .find(|&&(name, _)| name == target)
                .map(|&(_, bit)| bit)
                .ok_or_else(|| KeymapError::UnknownSynonymTarget {
                    name: synonym.to_string(),
                    target: target.to_string(),
                })?;
            if bits.insert(synonym, bit).is_some() {
                return Err(KeymapError::DuplicateModifier(synonym.to_string()));
            }
        }

        Ok(Self {
            bits,
            canonical,
            synonyms,
        })
    }

    /// Bit for a single modifier name.
    pub fn bit(&self, name: &str) -> Result<u8, MacroError> {
        self.bits
            .get(name)
            .copied()
            .ok_or_else(|| MacroError::ModifierLookup(name.to_string()))
    }

    /// Combined bitmask for a list of modifier names.
    ///
    /// Bits are OR'd, so naming the same modifier twice (`ctrl+control`)
    /// is harmless.
    pub fn resolve<'a, I>(&self, names: I) -> Result<u8, MacroError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .try_fold(0u8, |acc, name| Ok(acc | self.bit(name)?))
    }

    /// Format a bitmask as canonical names joined with `+`.
    pub fn describe(&self, mask: u8) -> String {
        self.canonical
            .iter()
            .filter(|&&(_, bit)| mask & bit != 0)
            .map(|&(name, _)| name)
            .collect::<Vec<_>>()
            .join("+")
    }

    /// All accepted names: canonical first, then synonyms.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        let canonical = self.canonical.iter().map(|&(name, _)| name);
        let synonyms = self.synonyms.iter().map(|&(name, _)| name);
        canonical.chain(synonyms)
    }
}
