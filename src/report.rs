//! Boot-protocol keyboard input report.
//!
//! ```text
//! byte 0   modifier bitmask (see `keymap::mods`)
//! byte 1   reserved, always 0
//! byte 2   key usage code
//! byte 3-7 further key slots, always 0 (one key at a time)
//! ```

use std::fmt;

use hidg_transport::REPORT_LEN;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// 8-byte keyboard input report.
///
/// Fields are private: only single-key press reports and the all-zero
/// release report can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct KeyboardReport {
    modifiers: u8,
    _reserved: u8,
    keys: [u8; 6],
}

const _: () = assert!(std::mem::size_of::<KeyboardReport>() == REPORT_LEN);

impl KeyboardReport {
    /// All keys and modifiers up.
    pub const RELEASED: Self = Self {
        modifiers: 0,
        _reserved: 0,
        keys: [0; 6],
    };

    /// One key (or none, for `code == 0`) held with the given modifiers.
    pub const fn pressed(modifiers: u8, code: u8) -> Self {
        Self {
            modifiers,
            _reserved: 0,
            keys: [code, 0, 0, 0, 0, 0],
        }
    }

    pub fn modifiers(&self) -> u8 {
        self.modifiers
    }

    /// Usage code in the first key slot.
    pub fn key(&self) -> u8 {
        self.keys[0]
    }

    pub fn is_released(&self) -> bool {
        *self == Self::RELEASED
    }

    /// Wire bytes, as handed to the report sink.
    pub fn to_bytes(&self) -> [u8; REPORT_LEN] {
        let mut out = [0u8; REPORT_LEN];
        out.copy_from_slice(self.as_bytes());
        out
    }
}

impl Default for KeyboardReport {
    fn default() -> Self {
        Self::RELEASED
    }
}

impl fmt::Display for KeyboardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.as_bytes().iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::mods;

    #[test]
    fn released_is_all_zero() {
        assert_eq!(KeyboardReport::RELEASED.to_bytes(), [0; REPORT_LEN]);
        assert!(KeyboardReport::default().is_released());
    }

    #[test]
    fn pressed_layout() {
        let report = KeyboardReport::pressed(mods::LCTRL, 0x16);
        assert_eq!(report.to_bytes(), [0x01, 0, 0x16, 0, 0, 0, 0, 0]);
        assert_eq!(report.modifiers(), mods::LCTRL);
        assert_eq!(report.key(), 0x16);
        assert!(!report.is_released());
    }

    #[test]
    fn modifier_only_report() {
        let report = KeyboardReport::pressed(mods::RGUI, 0);
        assert_eq!(report.to_bytes(), [0x80, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn decodes_from_wire_bytes() {
        let bytes = [0x02, 0, 0x04, 0, 0, 0, 0, 0];
        let report = KeyboardReport::read_from_bytes(&bytes).unwrap();
        assert_eq!(report, KeyboardReport::pressed(mods::LSHIFT, 0x04));
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(
            KeyboardReport::pressed(0x01, 0x16).to_string(),
            "01 00 16 00 00 00 00 00"
        );
    }
}
