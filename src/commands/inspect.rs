//! Offline commands: nothing is written to the device.

use hidg::{compile, Keymap, WINDOWS_KEY};

use super::CommandResult;

/// Compile text and print one line per instruction with its press report
pub fn check(keymap: &Keymap, text: &str) -> CommandResult {
    let program = compile(text, keymap)?;
    println!("{} instruction(s):", program.len());
    for (i, instruction) in program.iter().enumerate() {
        let shown = instruction.to_string();
        match instruction.press_report() {
            Some(report) => {
                let mods = keymap.modifiers().describe(report.modifiers());
                if mods.is_empty() {
                    println!("  {i:3}  {shown:<28} {report}");
                } else {
                    println!("  {i:3}  {shown:<28} {report}  [{mods}]");
                }
            }
            None => println!("  {i:3}  {shown}"),
        }
    }
    Ok(())
}

/// List every key name with its code or alias target, then the modifiers
pub fn keys(keymap: &Keymap) -> CommandResult {
    let keys = keymap.keys();
    println!("Keys ({}):", keys.len() + 1);
    for (name, entry) in keys.entries() {
        println!("  {name:<20} {entry}");
    }
    println!("  {WINDOWS_KEY:<20} rightmeta (modifier only)");

    println!();
    println!("Modifiers:");
    let modifiers = keymap.modifiers();
    for name in modifiers.names() {
        let bit = modifiers.bit(name)?;
        println!("  {name:<12} 0x{bit:02X}");
    }
    Ok(())
}
