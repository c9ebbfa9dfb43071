//! Jotter - a terminal note-taking scratchpad.
//!
//! # Usage
//!
//! ```bash
//! jotter
//! jotter --no-sidebar
//! jotter --no-welcome --save
//! ```

use anyhow::{Context, Result};
use clap::Parser;

use jotter::app::App;
use jotter::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};

/// A terminal note-taking scratchpad with tags, colors and search
#[derive(Parser, Debug)]
#[command(name = "jotter", version, about, long_about = None)]
struct Cli {
    /// Start with the note list sidebar hidden
    #[arg(long)]
    no_sidebar: bool,

    /// Start with an empty scratchpad instead of the welcome note
    #[arg(long)]
    no_welcome: bool,

    /// Save current command-line flags as defaults in the config file
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let mut app = App::new()
        .with_sidebar_visible(!effective.no_sidebar)
        .with_welcome_note(!effective.no_welcome);

    app.run().context("Application error")
}
