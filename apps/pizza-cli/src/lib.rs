//! # Pizza Compare CLI Library
//!
//! Wires config, the settings store and the comparison screen into a
//! command-line application.
//!
//! ## Module Organization
//! ```text
//! pizza_cli/
//! ├── lib.rs          ◄─── You are here (tracing, state setup, dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState
//! │   └── comparison.rs ◄─ Comparison screen and its subscribed cards
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── compare.rs  ◄─── `compare`
//! │   └── settings.rs ◄─── `settings show` / `settings set`
//! └── error.rs        ◄─── CliError with exit codes
//! ```
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Cli::parse()                                                           │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  SettingsConfig::load     pizza.toml + PIZZA_* env + POSIX locale       │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  --lang overrides         languages from the command line win           │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  SettingsStore            TomlFileStore, or in memory with --ephemeral  │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  commands::*::execute     returns the text to print                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use pizza_settings::{InMemoryKeyValueStore, SettingsChangeChannel, SettingsConfig, SettingsStore};

use crate::cli::{Cli, Commands};
use crate::error::{CliError, CliResult};
use crate::state::AppState;

/// Parses the command line, runs the command and maps the outcome to an
/// exit code.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let json = cli.json;
    match execute(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            report_error(&err, json);
            ExitCode::from(err.code.exit_code())
        }
    }
}

/// Runs one parsed command line and returns what should be printed.
pub fn execute(cli: Cli) -> CliResult<String> {
    execute_with(cli, &|key| std::env::var(key).ok())
}

/// [`execute`] with environment variables read through `env`.
pub fn execute_with(cli: Cli, env: &dyn Fn(&str) -> Option<String>) -> CliResult<String> {
    let mut app = build_state(&cli, env)?;

    match &cli.command {
        Commands::Compare(args) => commands::compare::execute(args, &mut app, cli.json),
        Commands::Settings(args) => commands::settings::execute(args, &mut app, cli.json),
    }
}

/// Loads config and opens the settings store for `cli`.
///
/// An explicit `--config` must load cleanly. Without one, a broken default
/// config only produces a warning.
pub fn build_state(cli: &Cli, env: &dyn Fn(&str) -> Option<String>) -> CliResult<AppState> {
    let mut config = match &cli.config {
        Some(path) => SettingsConfig::load_with(Some(path.clone()), env)?,
        None => SettingsConfig::load_or_default_with(None, env),
    };

    if !cli.languages.is_empty() {
        debug!(languages = ?cli.languages, "Overriding languages from command line");
        config.locale.languages = cli.languages.clone();
        config.validate()?;
    }

    let channel = SettingsChangeChannel::new();
    let store = if cli.ephemeral {
        SettingsStore::open(InMemoryKeyValueStore::new(), &config.locale, channel)?
    } else {
        SettingsStore::from_config(&config, channel)?
    };

    info!(settings = %store.effective(), "Settings ready");
    Ok(AppState::new(store, config.locale))
}

fn report_error(err: &CliError, json: bool) {
    if json {
        match serde_json::to_string_pretty(err) {
            Ok(body) => eprintln!("{}", body),
            Err(_) => eprintln!("error: {}", err),
        }
    } else {
        eprintln!("error: {}", err);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Log level can be controlled via `RUST_LOG` environment variable:
/// - `RUST_LOG=debug` - Show all debug logs
/// - `RUST_LOG=pizza_settings=debug` - Debug logs for the settings store only
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,pizza_settings=info"));

    // stdout carries command output
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
