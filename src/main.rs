//! # Stackpad - A Console Text Editor
//!
//! Appends and removes text through a line-oriented command loop,
//! with linear undo/redo.
//!
//! ## Quick Start
//!
//! ```bash
//! # Start with an empty buffer
//! cargo run
//!
//! # Start on a file (created if it does not exist)
//! cargo run -- notes.txt
//!
//! # Use a specific config file and log debug output to stderr
//! cargo run -- --config stackpad.toml -vv
//! ```

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stackpad_core::{Config, Editor, Repl};

/// Stackpad - a console text editor with undo/redo
#[derive(Parser, Debug)]
#[command(name = "stackpad")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to open (created if it does not exist)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging (to stderr)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging; stdout belongs to the command loop
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting stackpad v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load(),
    };

    let mut editor = Editor::with_config(config);

    let greeting = match &args.file {
        Some(path) => {
            let opened = if path.exists() {
                editor.load(path)
            } else {
                editor.create(path)
            };
            Some(opened.with_context(|| format!("Failed to open {}", path.display()))?)
        }
        None => None,
    };

    // Run the command loop
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut repl = Repl::new(editor, stdin.lock(), stdout.lock());
    if let Some(outcome) = greeting {
        repl = repl.with_greeting(outcome);
    }
    repl.run().context("Console I/O failed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["stackpad"]);
        assert!(args.file.is_none());
        assert!(args.config.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_args_with_file() {
        let args = Args::parse_from(["stackpad", "notes.txt", "-vv"]);
        assert_eq!(args.file, Some(PathBuf::from("notes.txt")));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_args_with_config() {
        let args = Args::parse_from(["stackpad", "--config", "stackpad.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("stackpad.toml")));
    }
}
