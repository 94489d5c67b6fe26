//! Instruction parsing.
//!
//! A literal token becomes one [`Instruction::Literal`]. A group is split on
//! `;` into instructions, each either `sleep <seconds>` or a chord: `+`
//! separated modifiers followed by exactly one key.
//!
//! ```text
//! {ctrl+s}              → Chord(leftctrl, s)
//! {ctrl+shift+esc}      → Chord(leftctrl+leftshift, esc)
//! {sleep 0.5}           → Sleep(500ms)
//! {tab; sleep 1; enter} → Chord(tab), Sleep(1s), Chord(enter)
//! ```
//!
//! Key and modifier names are resolved here, so a compiled macro can be
//! dispatched without further lookups.

use std::fmt;
use std::time::Duration;

use crate::error::MacroError;
use crate::keymap::{Keymap, Keystroke};
use crate::report::KeyboardReport;
use crate::tokenizer::{MacroText, MacroToken};

/// Reserved instruction keyword for pauses.
pub const SLEEP_KEYWORD: &str = "sleep";

/// One step of a compiled macro.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Character typed as-is.
    Literal { ch: char, stroke: Keystroke },
    /// Explicit modifiers plus one key.
    Chord {
        /// Modifiers named in the chord, not including the key's own.
        modifiers: u8,
        /// Key name as written.
        key: String,
        stroke: Keystroke,
    },
    /// Pause before the next instruction.
    Sleep(Duration),
}

impl Instruction {
    /// Press report for a keystroke instruction, `None` for a sleep.
    ///
    /// The key's implicit modifiers (Shift for aliases) are OR'd with the
    /// chord's explicit ones.
    pub fn press_report(&self) -> Option<KeyboardReport> {
        match self {
            Instruction::Literal { stroke, .. } => {
                Some(KeyboardReport::pressed(stroke.modifiers, stroke.code))
            }
            Instruction::Chord {
                modifiers, stroke, ..
            } => Some(KeyboardReport::pressed(
                modifiers | stroke.modifiers,
                stroke.code,
            )),
            Instruction::Sleep(_) => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Literal { ch, .. } => write!(f, "{}", ch.escape_debug()),
            Instruction::Chord { modifiers, key, .. } => {
                write!(f, "{{")?;
                for (name, bit) in crate::keymap::MODIFIER_DEFINITIONS {
                    if modifiers & bit != 0 {
                        write!(f, "{name}+")?;
                    }
                }
                write!(f, "{key}}}")
            }
            Instruction::Sleep(d) => write!(f, "{{{} {}}}", SLEEP_KEYWORD, d.as_secs_f64()),
        }
    }
}

/// Parse one token into its instructions.
pub fn parse_token(
    token: MacroToken<'_>,
    keymap: &Keymap,
) -> Result<Vec<Instruction>, MacroError> {
    match token {
        MacroToken::Literal(ch) => {
            let stroke = keymap.keys().resolve_char(ch)?;
            Ok(vec![Instruction::Literal { ch, stroke }])
        }
        MacroToken::Group(body) => parse_group(body, keymap),
    }
}

/// Parse the body of a `{...}` group.
pub fn parse_group(body: &str, keymap: &Keymap) -> Result<Vec<Instruction>, MacroError> {
    body.split(';')
        .map(|part| parse_instruction(part.trim(), keymap))
        .collect()
}

/// Parse a single `sleep` or chord instruction.
pub fn parse_instruction(text: &str, keymap: &Keymap) -> Result<Instruction, MacroError> {
    let text = text.trim();

    if let Some(arg) = text.strip_prefix(SLEEP_KEYWORD) {
        if arg.is_empty() || arg.starts_with(char::is_whitespace) {
            return parse_sleep(text, arg.trim()).map(Instruction::Sleep);
        }
    }

    let parts: Vec<&str> = text.split('+').map(str::trim).collect();
    let (key, modifier_names) = match parts.split_last() {
        Some((key, rest)) if !key.is_empty() => (*key, rest),
        _ => return Err(MacroError::syntax(text, "missing key")),
    };
    if modifier_names.iter().any(|name| name.is_empty()) {
        return Err(MacroError::syntax(text, "empty modifier"));
    }

    let modifiers = keymap.modifiers().resolve(modifier_names.iter().copied())?;
    let stroke = keymap.keys().resolve(key)?;

    Ok(Instruction::Chord {
        modifiers,
        key: key.to_string(),
        stroke,
    })
}

fn parse_sleep(text: &str, arg: &str) -> Result<Duration, MacroError> {
    if arg.is_empty() {
        return Err(MacroError::syntax(text, "sleep needs a duration in seconds"));
    }
    let secs: f64 = arg
        .parse()
        .map_err(|_| MacroError::syntax(text, format!("invalid duration \"{arg}\"")))?;
    Duration::try_from_secs_f64(secs)
        .map_err(|_| MacroError::syntax(text, format!("invalid duration \"{arg}\"")))
}

/// Parse a whole macro, resolving every name before anything is sent.
///
/// Fails on the first bad token, so an invalid macro emits no reports.
pub fn compile(input: &str, keymap: &Keymap) -> Result<Vec<Instruction>, MacroError> {
    let text = MacroText::new(input);
    let mut program = Vec::new();
    for token in text.tokens() {
        program.extend(parse_token(token, keymap)?);
    }
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::mods;

    fn keymap() -> Keymap {
        Keymap::builtin().unwrap()
    }

    fn chord(text: &str) -> (u8, Keystroke) {
        match parse_instruction(text, &keymap()).unwrap() {
            Instruction::Chord {
                modifiers, stroke, ..
            } => (modifiers, stroke),
            other => panic!("expected chord, got {other:?}"),
        }
    }

    #[test]
    fn bare_key() {
        assert_eq!(chord("enter"), (0, Keystroke::new(0, 0x28)));
    }

    #[test]
    fn chord_with_modifiers() {
        assert_eq!(chord("ctrl+s"), (mods::LCTRL, Keystroke::new(0, 0x16)));
        assert_eq!(
            chord("ctrl+shift+esc"),
            (mods::LCTRL | mods::LSHIFT, Keystroke::new(0, 0x29))
        );
    }

    #[test]
    fn whitespace_around_parts() {
        assert_eq!(chord(" ctrl + s "), (mods::LCTRL, Keystroke::new(0, 0x16)));
    }

    #[test]
    fn plus_key_via_shift() {
        assert_eq!(chord("shift+="), (mods::LSHIFT, Keystroke::new(0, 0x2E)));
    }

    #[test]
    fn alias_key_keeps_implicit_shift_separate() {
        let (modifiers, stroke) = chord("ctrl+S");
        assert_eq!(modifiers, mods::LCTRL);
        assert_eq!(stroke, Keystroke::new(mods::LSHIFT, 0x16));
    }

    #[test]
    fn windows_key_bare() {
        assert_eq!(chord("windows_key"), (0, Keystroke::new(mods::RGUI, 0)));
    }

    #[test]
    fn sleep_instruction() {
        let km = keymap();
        assert_eq!(
            parse_instruction("sleep 0.5", &km).unwrap(),
            Instruction::Sleep(Duration::from_millis(500))
        );
        assert_eq!(
            parse_instruction("sleep   2", &km).unwrap(),
            Instruction::Sleep(Duration::from_secs(2))
        );
    }

    #[test]
    fn bad_sleep_arguments() {
        let km = keymap();
        for text in ["sleep", "sleep abc", "sleep -1", "sleep inf", "sleep 1 2"] {
            assert!(
                matches!(parse_instruction(text, &km), Err(MacroError::Syntax { .. })),
                "{text} should be a syntax error"
            );
        }
    }

    #[test]
    fn sleep_prefix_without_space_is_a_key_name() {
        let err = parse_instruction("sleepy", &keymap()).unwrap_err();
        assert!(matches!(err, MacroError::KeyLookup(ref n) if n == "sleepy"));
    }

    #[test]
    fn missing_key_is_syntax_error() {
        let km = keymap();
        for text in ["", "ctrl+", "+", "ctrl+ "] {
            assert!(
                matches!(parse_instruction(text, &km), Err(MacroError::Syntax { .. })),
                "{text:?} should be a syntax error"
            );
        }
    }

    #[test]
    fn empty_modifier_is_syntax_error() {
        assert!(matches!(
            parse_instruction("ctrl++s", &keymap()),
            Err(MacroError::Syntax { .. })
        ));
    }

    #[test]
    fn unknown_names() {
        let km = keymap();
        assert!(matches!(
            parse_instruction("ctrl+nosuchkey", &km),
            Err(MacroError::KeyLookup(ref n)) if n == "nosuchkey"
        ));
        assert!(matches!(
            parse_instruction("hyper+s", &km),
            Err(MacroError::ModifierLookup(ref n)) if n == "hyper"
        ));
    }

    #[test]
    fn group_splits_on_semicolon() {
        let program = parse_group("tab ; sleep 0.1;enter", &keymap()).unwrap();
        assert_eq!(program.len(), 3);
        assert!(matches!(&program[0], Instruction::Chord { key, .. } if key == "tab"));
        assert_eq!(program[1], Instruction::Sleep(Duration::from_millis(100)));
        assert!(matches!(&program[2], Instruction::Chord { key, .. } if key == "enter"));
    }

    #[test]
    fn trailing_semicolon_is_syntax_error() {
        assert!(matches!(
            parse_group("tab;", &keymap()),
            Err(MacroError::Syntax { .. })
        ));
    }

    #[test]
    fn compile_mixed_text() {
        let program = compile("Hi {enter}", &keymap()).unwrap();
        assert_eq!(program.len(), 3);
        assert_eq!(
            program[0],
            Instruction::Literal {
                ch: 'H',
                stroke: Keystroke::new(mods::LSHIFT, 0x0B)
            }
        );
        assert_eq!(
            program[1],
            Instruction::Literal {
                ch: 'i',
                stroke: Keystroke::new(0, 0x0C)
            }
        );
        assert!(matches!(&program[2], Instruction::Chord { key, .. } if key == "enter"));
    }

    #[test]
    fn compile_fails_on_any_bad_token() {
        let km = keymap();
        assert!(compile("abc{ctrl+nosuchkey}", &km).is_err());
        assert!(compile("abc\u{1F600}", &km).is_err());
    }

    #[test]
    fn press_reports() {
        let km = keymap();
        let program = compile("A{ctrl+s}{sleep 0}", &km).unwrap();
        assert_eq!(
            program[0].press_report().unwrap().to_bytes(),
            [mods::LSHIFT, 0, 0x04, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            program[1].press_report().unwrap().to_bytes(),
            [mods::LCTRL, 0, 0x16, 0, 0, 0, 0, 0]
        );
        assert_eq!(program[2].press_report(), None);
    }

    #[test]
    fn display_in_macro_notation() {
        let km = keymap();
        let program = compile("{ctrl+alt+delete; sleep 1.5}a\tb", &km).unwrap();
        let shown: Vec<String> = program.iter().map(ToString::to_string).collect();
        assert_eq!(
            shown,
            vec!["{leftctrl+leftalt+delete}", "{sleep 1.5}", "a", "\\t", "b"]
        );
    }
}
