//! Data directory initialization.
//!
//! Creates the data directory and an empty database, optionally writes a
//! commented configuration template and registers the first staff identity
//! so the catalog can be set up.

use std::fs;
use std::path::PathBuf;

use crate::config::USER_CONFIG_FILE;
use crate::database::{Database, DatabaseConfig, DATABASE_FILE_NAME};
use crate::error::{Error, Result};
use crate::guest::{Guest, NewGuest};

/// Options for initialization.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Replace an existing database.
    pub overwrite: bool,
    /// Write a configuration template.
    pub create_config: bool,
    /// First identity to register; it is always made a superuser.
    pub admin: Option<NewGuest>,
}

impl InitOptions {
    /// Creates options for `data_dir` with nothing optional enabled.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            overwrite: false,
            create_config: false,
            admin: None,
        }
    }

    /// Sets whether to replace an existing database.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether to write the configuration template.
    #[must_use]
    pub fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }

    /// Registers `admin` as a superuser once the database exists.
    #[must_use]
    pub fn with_admin(mut self, admin: Option<NewGuest>) -> Self {
        self.admin = admin.map(|guest| guest.staff(true).superuser(true));
        self
    }
}

/// What initialization did.
#[derive(Debug)]
pub struct InitResult {
    /// Path to the data directory.
    pub data_dir: PathBuf,
    /// Whether the data directory was created.
    pub data_dir_created: bool,
    /// Whether the database was created or recreated.
    pub database_created: bool,
    /// Whether the configuration template was written.
    pub config_created: bool,
    /// The registered superuser, if one was requested.
    pub admin: Option<Guest>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = r"# Hotel configuration file
# Values here are overridden by hotel.yaml in a project directory and by
# HOTEL_* environment variables.

# Seconds to wait for the database write lock (default: 5)
# maximum_lock_wait_seconds: 5

# Skip completing past stays before listings (default: false)
# disable_autosweep: false

# Upcoming reservations shown per room (default: 3)
# upcoming_limit: 3

# Reject status changes outside the lifecycle table (default: false)
# strict_status_transitions: false

# Confirmation notices
# notifications:
#   enabled: true
#   outbox: /var/spool/hotel/outbox.jsonl

# Default listing format: table, json or csv
# output_format: table
";

/// Initializes the data directory and database.
///
/// # Errors
///
/// Returns an error if:
/// - The data directory cannot be created
/// - The database already exists and `overwrite` is not set
/// - The database cannot be created
/// - The configuration template cannot be written
/// - The admin identity cannot be registered
///
/// # Examples
///
/// ```no_run
/// use hotel::operations::init::{init_database, InitOptions};
/// use hotel::NewGuest;
/// use std::path::PathBuf;
///
/// let options = InitOptions::new(PathBuf::from("/tmp/hotel-data"))
///     .with_create_config(true)
///     .with_admin(Some(NewGuest::new("desk", "desk@example.com").unwrap()));
///
/// let result = init_database(&options).unwrap();
/// println!("Database created: {}", result.database_created);
/// ```
pub fn init_database(options: &InitOptions) -> Result<InitResult> {
    let mut result = InitResult {
        data_dir: options.data_dir.clone(),
        data_dir_created: false,
        database_created: false,
        config_created: false,
        admin: None,
    };

    if !options.data_dir.exists() {
        fs::create_dir_all(&options.data_dir)?;
        result.data_dir_created = true;
    }

    let db_path = options.data_dir.join(DATABASE_FILE_NAME);
    if db_path.exists() {
        if !options.overwrite {
            return Err(Error::Validation {
                field: "database".into(),
                message: format!(
                    "Database already exists at {}. Use --overwrite to replace it.",
                    db_path.display()
                ),
            });
        }
        fs::remove_file(&db_path)?;
        for suffix in ["-wal", "-shm"] {
            let sidecar = options.data_dir.join(format!("{DATABASE_FILE_NAME}{suffix}"));
            if sidecar.exists() {
                fs::remove_file(sidecar)?;
            }
        }
    }

    let db = Database::open(DatabaseConfig::new(&db_path))?;
    result.database_created = true;
    log::info!("created database {}", db_path.display());

    if let Some(ref admin) = options.admin {
        result.admin = Some(Database::insert_guest(db.connection(), admin)?);
    }

    if options.create_config {
        let config_path = options.data_dir.join(USER_CONFIG_FILE);
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
            result.config_created = true;
        }
    }

    Ok(result)
}
