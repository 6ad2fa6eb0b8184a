//! Where the database lives and how long a writer waits for it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// File name of the database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "hotel.db";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "HOTEL_DATA_DIR";

/// Lock wait used when nothing else is configured; matches the
/// `maximum_lock_wait_seconds` default.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Parameters for opening a [`Database`](super::Database).
///
/// # Examples
///
/// ```
/// use hotel::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::in_data_dir("/srv/hotel")
///     .with_busy_timeout(Duration::from_secs(10));
/// assert!(config.path.ends_with("hotel.db"));
/// assert_eq!(config.lock_wait_seconds(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file; missing parent directories are created.
    pub path: PathBuf,
    /// How long a writer waits for the `SQLite` write lock.
    pub busy_timeout: Duration,
}

impl DatabaseConfig {
    /// A database file at `path` with the default lock wait.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// The standard database file inside `data_dir`.
    #[must_use]
    pub fn in_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(DATABASE_FILE_NAME))
    }

    /// Sets how long a writer waits for the lock before giving up.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Whole seconds reported by [`Error::LockTimeout`]; never zero.
    #[must_use]
    pub fn lock_wait_seconds(&self) -> u64 {
        self.busy_timeout.as_secs().max(1)
    }
}

/// `~/.hotel`, or `%USERPROFILE%\.hotel` on Windows.
///
/// # Errors
///
/// Returns a validation error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".hotel"))
        .ok_or_else(|| Error::Validation {
            field: "data_dir".into(),
            message: format!("cannot determine the home directory; set {DATA_DIR_ENV}"),
        })
}

/// Resolves the data directory: an explicit directory wins, then a
/// non-blank `HOTEL_DATA_DIR`, then [`default_data_dir`].
///
/// # Errors
///
/// Returns an error only when falling back to the home directory fails.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    match std::env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => Ok(PathBuf::from(dir)),
        _ => default_data_dir(),
    }
}
