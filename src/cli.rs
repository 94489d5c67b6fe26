// CLI definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hidg")]
#[command(author, version, about = "Type on a host through a USB HID gadget keyboard")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Gadget device node (default: /dev/hidg0, or `device` from the config file)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub device: Option<PathBuf>,

    /// Config file path (default: ~/.config/hidg/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Hold each key briefly, like a person typing
    #[arg(long, global = true, conflicts_with = "fast")]
    pub human_speed: bool,

    /// Release each key immediately after pressing it
    #[arg(long, global = true)]
    pub fast: bool,

    /// Hold time in milliseconds (overrides --human-speed/--fast)
    #[arg(long, global = true, value_name = "MS")]
    pub dwell_ms: Option<u64>,

    /// Print reports as hex instead of writing to the device
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Log every report written (same as `debug = true` in the config file)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Type text, with {...} groups for chords and pauses
    ///
    /// Examples: `hidg send "Hello{enter}"`, `hidg send "{ctrl+alt+t; sleep 1}ls{enter}"`.
    /// With no TEXT, reads standard input (a single trailing newline is dropped).
    #[command(visible_aliases = ["sendkeys", "type"])]
    Send {
        /// Text to type; multiple words are joined with spaces
        text: Vec<String>,
    },

    /// Press and release a single named key
    #[command(visible_aliases = ["keypress", "key"])]
    Press {
        /// Key name (e.g. enter, f5, A, windows_key)
        key: String,
    },

    /// Parse text and show the instructions without touching the device
    #[command(visible_alias = "parse")]
    Check {
        /// Text to check
        text: Vec<String>,
    },

    /// Send an all-keys-up report
    Release,

    /// List key and modifier names
    #[command(visible_alias = "names")]
    Keys,
}
