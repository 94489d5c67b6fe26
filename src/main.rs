//! hidg command-line interface
//!
//! Types text on whatever host the gadget is plugged into.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

// CLI definitions
mod cli;
use cli::{Cli, Commands};

// Command handlers (split from main.rs)
mod commands;

use hidg::{HidgConfig, Keymap};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config, then let flags override it
    let config_path = cli.config.clone().unwrap_or_else(HidgConfig::default_path);
    let mut config = HidgConfig::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if let Some(device) = cli.device.clone() {
        config.device = device;
    }
    if cli.human_speed {
        config.human_speed = true;
    }
    if cli.fast {
        config.human_speed = false;
    }
    if cli.dwell_ms.is_some() {
        config.dwell_ms = cli.dwell_ms;
    }
    config.debug |= cli.debug;

    // Initialize logging (stderr, so dry-run output on stdout stays clean)
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| if config.debug { "debug" } else { "info" }.to_string());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("Config: {:?} (from {})", config, config_path.display());

    let keymap = Keymap::builtin().context("Built-in key tables are inconsistent")?;

    match cli.command {
        Commands::Send { text } => {
            let text = commands::typing::read_text(text)?;
            commands::typing::send(&config, keymap, cli.dry_run, &text)
        }
        Commands::Press { key } => commands::typing::press(&config, keymap, cli.dry_run, &key),
        Commands::Release => commands::typing::release(&config, keymap, cli.dry_run),
        Commands::Check { text } => commands::inspect::check(&keymap, &text.join(" ")),
        Commands::Keys => commands::inspect::keys(&keymap),
    }
}
