//! Commands that write reports to the gadget.

use std::io::Read;

use anyhow::Context;
use hidg::{HidgConfig, Keymap};
use tracing::info;

use super::{with_dispatcher, CommandResult};

/// Text from the command line, or standard input when none was given.
///
/// Words are joined with single spaces. Piped input loses one trailing
/// newline so `echo hi | hidg send` doesn't also press enter.
pub fn read_text(words: Vec<String>) -> anyhow::Result<String> {
    if !words.is_empty() {
        return Ok(words.join(" "));
    }
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read text from stdin")?;
    Ok(strip_trailing_newline(text))
}

fn strip_trailing_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

/// Type a macro string
pub fn send(config: &HidgConfig, keymap: Keymap, dry_run: bool, text: &str) -> CommandResult {
    with_dispatcher(config, keymap, dry_run, |d| d.sendkeys(text))?;
    info!(chars = text.chars().count(), "text sent");
    Ok(())
}

/// Press and release one named key
pub fn press(config: &HidgConfig, keymap: Keymap, dry_run: bool, key: &str) -> CommandResult {
    with_dispatcher(config, keymap, dry_run, |d| d.keypress(key))?;
    info!(key, "key pressed");
    Ok(())
}

/// Release everything the host may think is still held
pub fn release(config: &HidgConfig, keymap: Keymap, dry_run: bool) -> CommandResult {
    with_dispatcher(config, keymap, dry_run, |d| d.release_all())
}
