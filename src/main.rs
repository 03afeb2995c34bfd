//! # Laureate Dashboard Entry Point
//!
//! ```text
//! main()
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Resolve config (file, then CLI overrides)
//!   ├─> Initialize logging (console + rotating files, console-only fallback)
//!   └─> Load the dataset once and run the subcommand
//! ```
//!
//! Any dataset load failure is fatal: the process exits before a single view
//! is emitted.

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout, clippy::print_stderr)] // Payloads go to stdout, fatal errors to stderr

mod cli;

use anyhow::Result;
use clap::Parser as _;
use laureate_dashboard::config::LoadedConfig;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let LoadedConfig { config, fallback } = cli::resolve_config(&cli)?;

    let logging = if config.file_logging {
        laureate_dashboard::logging::init(config.log_dir.clone())
    } else {
        laureate_dashboard::logging::init_console()
    };
    if let Err(e) = logging {
        eprintln!("File logging unavailable ({e:#}), logging to console only");
        laureate_dashboard::logging::init_console()?;
    }

    if let Some(e) = fallback {
        tracing::warn!(error = %e, "Ignoring unreadable config, using defaults");
    }
    tracing::debug!(data = %config.data_path.display(), "Configuration resolved");
    cli::run_command(cli.command, &config)
}
