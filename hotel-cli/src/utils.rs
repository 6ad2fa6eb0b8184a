//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including data directory resolution, configuration loading, database
//! management and reporting of operation results.

use crate::error::CliError;
use chrono::{DateTime, NaiveDate, Utc};
use hotel::database::DATABASE_FILE_NAME;
use hotel::{Config, ConfigBuilder, Database, DatabaseConfig, ExecutionResult, FrontDesk, Guest};
use std::path::PathBuf;
use std::time::Duration;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,

    /// Username of the acting identity.
    pub actor: Option<String>,

    /// Day to evaluate rules against.
    pub today: Option<NaiveDate>,
}

/// Resolve the data directory: `--data-dir`, then `HOTEL_DATA_DIR`, then
/// `~/.hotel`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    hotel::database::resolve_data_dir(global.data_dir.as_deref())
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. The nearest `hotel.yaml`
/// 3. `<data_dir>/config.yaml`
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;
    ConfigBuilder::new()
        .with_data_dir(data_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE_NAME);

    if !db_path.exists() && global.disable_autoinit {
        return Err(CliError::NoDataDirectory);
    }

    let seconds = global
        .busy_timeout
        .map_or_else(|| config.lock_wait_seconds(), u64::from);
    let db_config = DatabaseConfig::new(db_path).with_busy_timeout(Duration::from_secs(seconds));

    Database::open(db_config).map_err(CliError::from)
}

/// Open a front desk over the configured database, pinned to `--today`
/// when given.
pub fn open_desk(global: &GlobalOptions) -> Result<FrontDesk, CliError> {
    let config = load_configuration(global)?;
    let db = open_database(global, &config)?;
    let desk = FrontDesk::new(db, config);
    Ok(match global.today {
        Some(today) => desk.with_today(today),
        None => desk,
    })
}

/// The acting identity named by `--as` / `HOTEL_USER`.
pub fn require_actor(global: &GlobalOptions, desk: &FrontDesk) -> Result<Guest, CliError> {
    let username = global.actor.as_deref().ok_or_else(|| {
        CliError::InvalidArguments(
            "no acting identity (pass --as <USERNAME> or set HOTEL_USER)".to_string(),
        )
    })?;
    desk.guest(username).map_err(CliError::from)
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Print a dry-run plan or the warnings of an applied one to stderr.
pub fn report_result(global: &GlobalOptions, result: &ExecutionResult) {
    if global.quiet {
        return;
    }
    if result.dry_run {
        eprintln!("Dry run - would perform the following actions:");
        for (i, action) in result.actions_taken.iter().enumerate() {
            eprintln!("  {}. {action}", i + 1);
        }
    } else if global.verbose {
        for action in &result.actions_taken {
            eprintln!("{action}");
        }
    }
    for warning in &result.warnings {
        eprintln!("Warning: {warning}");
    }
}
