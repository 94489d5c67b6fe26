//! Macro text tokenizer.
//!
//! Macro text mixes literal characters with `{...}` instruction groups:
//!
//! ```text
//! Hello{enter}           : type "Hello", then Enter
//! {ctrl+s}               : chord
//! a {ctrl+c; sleep 0.5}  : several instructions in one group
//! ```
//!
//! Before splitting, [`normalize`] rewrites a few printable characters into
//! the chord that produces them and removes whitespace hugging the braces,
//! so `a {ctrl+s} b` and `a{ctrl+s}b` produce the same tokens.

/// Characters rewritten to an equivalent group before tokenizing.
///
/// `£` is Shift+3 on a UK host layout.
pub static SUBSTITUTIONS: &[(char, &str)] = &[('£', "{shift+3}")];

/// One unit of macro text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroToken<'a> {
    /// A single character typed as-is.
    Literal(char),
    /// Contents of a `{...}` group, braces excluded.
    Group(&'a str),
}

/// Apply [`SUBSTITUTIONS`] and strip whitespace next to group braces.
///
/// Whitespace directly before a `{` or directly after a `}` is dropped.
/// Whitespace between literal characters is kept.
pub fn normalize(input: &str) -> String {
    let mut substituted = String::with_capacity(input.len());
    for ch in input.chars() {
        match SUBSTITUTIONS.iter().find(|&&(from, _)| from == ch) {
            Some(&(_, to)) => substituted.push_str(to),
            None => substituted.push(ch),
        }
    }

    let mut out = String::with_capacity(substituted.len());
    let mut pending_ws = String::new();
    let mut after_close = false;
    for ch in substituted.chars() {
        if ch.is_whitespace() {
            if !after_close {
                pending_ws.push(ch);
            }
            continue;
        }
        if ch != '{' {
            out.push_str(&pending_ws);
        }
        pending_ws.clear();
        out.push(ch);
        after_close = ch == '}';
    }
    out.push_str(&pending_ws);
    out
}

/// Lazy left-to-right token iterator over normalized macro text.
///
/// A group needs at least one character between the braces and ends at the
/// first `}`. A `{` without a matching `}` and an empty `{}` are literals.
/// To restart, call [`tokenize`] again on the same text.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
}

/// Split normalized text into tokens.
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens { rest: text }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = MacroToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let ch = self.rest.chars().next()?;

        if ch == '{' {
            if let Some(close) = self.rest[1..].find('}') {
                if close > 0 {
                    let group = &self.rest[1..1 + close];
                    self.rest = &self.rest[close + 2..];
                    return Some(MacroToken::Group(group));
                }
            }
        }

        self.rest = &self.rest[ch.len_utf8()..];
        Some(MacroToken::Literal(ch))
    }
}

impl std::iter::FusedIterator for Tokens<'_> {}

/// Normalized macro text that can be tokenized any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroText {
    normalized: String,
}

impl MacroText {
    pub fn new(input: &str) -> Self {
        Self {
            normalized: normalize(input),
        }
    }

    pub fn tokens(&self) -> Tokens<'_> {
        tokenize(&self.normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.normalized
    }
}
