//! Key name table
//!
//! Symbolic key names map either directly to a HID keyboard usage code or to
//! another key that must be pressed with Shift held. Aliases are flattened
//! into `(modifiers, code)` pairs when the table is built, so resolution is a
//! single lookup.

use std::collections::HashMap;
use std::fmt;

use super::mods;
use crate::error::{KeymapError, MacroError};

/// Name that resolves to a bare Right GUI modifier with no key code.
pub const WINDOWS_KEY: &str = "windows_key";

/// How a key name is produced on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEntry {
    /// HID usage code on the keyboard page (0x07).
    Direct(u8),
    /// Produced by holding Shift while pressing the named key.
    ///
    /// The target must be a [`KeyEntry::Direct`] entry.
    ShiftedAlias(&'static str),
}

impl fmt::Display for KeyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyEntry::Direct(code) => write!(f, "0x{code:02X}"),
            KeyEntry::ShiftedAlias(base) => write!(f, "shift+{base}"),
        }
    }
}

/// Modifier bits plus usage code for one resolved key name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Keystroke {
    /// Implicit modifiers (Shift for aliases, Right GUI for `windows_key`).
    pub modifiers: u8,
    /// HID usage code, 0 for a modifier-only keystroke.
    pub code: u8,
}

impl Keystroke {
    pub const fn new(modifiers: u8, code: u8) -> Self {
        Self { modifiers, code }
    }
}

use KeyEntry::{Direct as D, ShiftedAlias as S};

/// Built-in key definitions, in listing order.
///
/// Usage codes follow the USB HID Usage Tables, keyboard/keypad page. Shifted
/// aliases follow the US legends printed on each key.
#[rustfmt::skip]
pub static KEY_DEFINITIONS: &[(&str, KeyEntry)] = &[
    // Reserved
    ("none", D(0x00)), ("err_ovf", D(0x01)),
    // Letters
    ("a", D(0x04)), ("b", D(0x05)), ("c", D(0x06)), ("d", D(0x07)), ("e", D(0x08)), ("f", D(0x09)),
    ("g", D(0x0A)), ("h", D(0x0B)), ("i", D(0x0C)), ("j", D(0x0D)), ("k", D(0x0E)), ("l", D(0x0F)),
    ("m", D(0x10)), ("n", D(0x11)), ("o", D(0x12)), ("p", D(0x13)), ("q", D(0x14)), ("r", D(0x15)),
    ("s", D(0x16)), ("t", D(0x17)), ("u", D(0x18)), ("v", D(0x19)), ("w", D(0x1A)), ("x", D(0x1B)),
    ("y", D(0x1C)), ("z", D(0x1D)),
    // Digits row
    ("1", D(0x1E)), ("2", D(0x1F)), ("3", D(0x20)), ("4", D(0x21)), ("5", D(0x22)), ("6", D(0x23)),
    ("7", D(0x24)), ("8", D(0x25)), ("9", D(0x26)), ("0", D(0x27)),
    // Editing and punctuation
    ("enter", D(0x28)), ("esc", D(0x29)), ("backspace", D(0x2A)), ("tab", D(0x2B)),
    ("space", D(0x2C)), ("minus", D(0x2D)), ("equal", D(0x2E)), ("leftbrace", D(0x2F)),
    ("rightbrace", D(0x30)), ("backslash", D(0x31)), ("hashtilde", D(0x32)),
    ("semicolon", D(0x33)), ("apostrophe", D(0x34)), ("grave", D(0x35)), ("comma", D(0x36)),
    ("dot", D(0x37)), ("slash", D(0x38)), ("capslock", D(0x39)),
    // Function keys
    ("f1", D(0x3A)), ("f2", D(0x3B)), ("f3", D(0x3C)), ("f4", D(0x3D)), ("f5", D(0x3E)),
    ("f6", D(0x3F)), ("f7", D(0x40)), ("f8", D(0x41)), ("f9", D(0x42)), ("f10", D(0x43)),
    ("f11", D(0x44)), ("f12", D(0x45)),
    // Navigation
    ("sysrq", D(0x46)), ("scrolllock", D(0x47)), ("pause", D(0x48)), ("insert", D(0x49)),
    ("home", D(0x4A)), ("pageup", D(0x4B)), ("delete", D(0x4C)), ("end", D(0x4D)),
    ("pagedown", D(0x4E)), ("right", D(0x4F)), ("left", D(0x50)), ("down", D(0x51)),
    ("up", D(0x52)),
    // Keypad
    ("numlock", D(0x53)), ("kpslash", D(0x54)), ("kpasterisk", D(0x55)), ("kpminus", D(0x56)),
    ("kpplus", D(0x57)), ("kpenter", D(0x58)), ("kp1", D(0x59)), ("kp2", D(0x5A)),
    ("kp3", D(0x5B)), ("kp4", D(0x5C)), ("kp5", D(0x5D)), ("kp6", D(0x5E)), ("kp7", D(0x5F)),
    ("kp8", D(0x60)), ("kp9", D(0x61)), ("kp0", D(0x62)), ("kpdot", D(0x63)), ("kpequal", D(0x67)),
    ("kpcomma", D(0x85)), ("kpleftparen", D(0xB6)), ("kprightparen", D(0xB7)),
    // F13-F24
    ("f13", D(0x68)), ("f14", D(0x69)), ("f15", D(0x6A)), ("f16", D(0x6B)), ("f17", D(0x6C)),
    ("f18", D(0x6D)), ("f19", D(0x6E)), ("f20", D(0x6F)), ("f21", D(0x70)), ("f22", D(0x71)),
    ("f23", D(0x72)), ("f24", D(0x73)),
    // System and editing extras
    ("102nd", D(0x64)), ("compose", D(0x65)), ("power", D(0x66)), ("open", D(0x74)),
    ("help", D(0x75)), ("props", D(0x76)), ("front", D(0x77)), ("stop", D(0x78)),
    ("again", D(0x79)), ("undo", D(0x7A)), ("cut", D(0x7B)), ("copy", D(0x7C)), ("paste", D(0x7D)),
    ("find", D(0x7E)), ("mute", D(0x7F)), ("volumeup", D(0x80)), ("volumedown", D(0x81)),
    // International and language
    ("ro", D(0x87)), ("katakanahiragana", D(0x88)), ("yen", D(0x89)), ("henkan", D(0x8A)),
    ("muhenkan", D(0x8B)), ("kpjpcomma", D(0x8C)), ("hangeul", D(0x90)), ("hanja", D(0x91)),
    ("katakana", D(0x92)), ("hiragana", D(0x93)), ("zenkakuhankaku", D(0x94)),
    // Modifier keys as plain usages
    ("leftctrl", D(0xE0)), ("leftshift", D(0xE1)), ("leftalt", D(0xE2)), ("leftmeta", D(0xE3)),
    ("rightctrl", D(0xE4)), ("rightshift", D(0xE5)), ("rightalt", D(0xE6)), ("rightmeta", D(0xE7)),
    // Media
    ("media_playpause", D(0xE8)), ("media_stopcd", D(0xE9)), ("media_previoussong", D(0xEA)),
    ("media_nextsong", D(0xEB)), ("media_ejectcd", D(0xEC)), ("media_volumeup", D(0xED)),
    ("media_volumedown", D(0xEE)), ("media_mute", D(0xEF)), ("media_www", D(0xF0)),
    ("media_back", D(0xF1)), ("media_forward", D(0xF2)), ("media_stop", D(0xF3)),
    ("media_find", D(0xF4)), ("media_scrollup", D(0xF5)), ("media_scrolldown", D(0xF6)),
    ("media_edit", D(0xF7)), ("media_sleep", D(0xF8)), ("media_coffee", D(0xF9)),
    ("media_refresh", D(0xFA)), ("media_calc", D(0xFB)),
    // Single-character names for unshifted punctuation
    ("-", D(0x2D)), ("=", D(0x2E)), ("[", D(0x2F)), ("]", D(0x30)), ("\\", D(0x31)),
    (";", D(0x33)), ("'", D(0x34)), ("`", D(0x35)), (",", D(0x36)), (".", D(0x37)),
    ("/", D(0x38)),
    // Upper case letters
    ("A", S("a")), ("B", S("b")), ("C", S("c")), ("D", S("d")), ("E", S("e")), ("F", S("f")),
    ("G", S("g")), ("H", S("h")), ("I", S("i")), ("J", S("j")), ("K", S("k")), ("L", S("l")),
    ("M", S("m")), ("N", S("n")), ("O", S("o")), ("P", S("p")), ("Q", S("q")), ("R", S("r")),
    ("S", S("s")), ("T", S("t")), ("U", S("u")), ("V", S("v")), ("W", S("w")), ("X", S("x")),
    ("Y", S("y")), ("Z", S("z")),
    // Shifted digits row
    ("!", S("1")), ("@", S("2")), ("#", S("3")), ("$", S("4")), ("%", S("5")), ("^", S("6")),
    ("&", S("7")), ("*", S("8")), ("(", S("9")), (")", S("0")),
    // Shifted punctuation
    ("_", S("-")), ("+", S("=")), ("{", S("[")), ("}", S("]")), ("|", S("\\")),
    (":", S(";")), ("\"", S("'")), ("~", S("`")), ("<", S(",")), (">", S(".")),
    ("?", S("/")),
];

/// Resolved key table.
///
/// Built once at startup from a definition list; read-only afterwards.
#[derive(Debug, Clone)]
pub struct KeyTable {
    definitions: &'static [(&'static str, KeyEntry)],
    resolved: HashMap<&'static str, Keystroke>,
}

impl KeyTable {
    /// Build the table from [`KEY_DEFINITIONS`].
    pub fn builtin() -> Result<Self, KeymapError> {
        Self::from_definitions(KEY_DEFINITIONS)
    }

    /// Build and validate a table from arbitrary definitions.
    ///
    /// Rejects duplicate names, aliases to unknown names and aliases whose
    /// target is itself an alias.
    pub fn from_definitions(
        definitions: &'static [(&'static str, KeyEntry)],
    ) -> Result<Self, KeymapError> {
        let mut entries = HashMap::with_capacity(definitions.len());
        for &(name, entry) in definitions {
            if name == WINDOWS_KEY || entries.insert(name, entry).is_some() {
                return Err(KeymapError::DuplicateKey(name.to_string()));
            }
        }

        let mut resolved = HashMap::with_capacity(entries.len());
        for &(name, entry) in definitions {
            let stroke = match entry {
                KeyEntry::Direct(code) => Keystroke::new(0, code),
                KeyEntry::ShiftedAlias(target) => match entries.get(target) {
                    Some(KeyEntry::Direct(code)) => Keystroke::new(mods::LSHIFT, *code),
                    Some(KeyEntry::ShiftedAlias(_)) => {
                        return Err(KeymapError::ChainedAlias {
                            name: name.to_string(),
                            target: target.to_string(),
                        })
                    }
                    None => {
                        return Err(KeymapError::UnknownAliasTarget {
                            name: name.to_string(),
                            target: target.to_string(),
                        })
                    }
                },
            };
            resolved.insert(name, stroke);
        }

        Ok(Self {
            definitions,
            resolved,
        })
    }

    /// Resolve a key name to its implicit modifiers and usage code.
    pub fn resolve(&self, name: &str) -> Result<Keystroke, MacroError> {
        if name == WINDOWS_KEY {
            return Ok(Keystroke::new(mods::RGUI, 0));
        }
        self.resolved
            .get(name)
            .copied()
            .ok_or_else(|| MacroError::KeyLookup(name.to_string()))
    }

    /// Resolve a literal character typed in macro text.
    pub fn resolve_char(&self, ch: char) -> Result<Keystroke, MacroError> {
        let mut buf = [0u8; 4];
        self.resolve(literal_key_name(ch, &mut buf))
    }

    pub fn contains(&self, name: &str) -> bool {
        name == WINDOWS_KEY || self.resolved.contains_key(name)
    }

    /// Definitions in listing order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, KeyEntry)> + '_ {
        self.definitions.iter().copied()
    }

    /// Every key name in listing order, `windows_key` excluded.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.definitions.iter().map(|&(name, _)| name)
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

/// Key name used for a literal character.
///
/// Whitespace characters use their word names; everything else is looked up
/// as the character itself.
pub fn literal_key_name(ch: char, buf: &mut [u8; 4]) -> &str {
    match ch {
        ' ' => "space",
        '\n' => "enter",
        '\t' => "tab",
        _ => ch.encode_utf8(buf),
    }
}
