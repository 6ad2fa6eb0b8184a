//! Init command implementation.
//!
//! This module implements the `init` command for explicitly initializing
//! the data directory and database, optionally registering the first
//! staff identity.

use crate::error::CliError;
use crate::utils::{resolve_data_dir, GlobalOptions};
use clap::Parser;
use hotel::config::USER_CONFIG_FILE;
use hotel::database::DATABASE_FILE_NAME;
use hotel::operations::{init_database, InitOptions};
use hotel::NewGuest;

/// Initialize the data directory and database.
#[derive(Parser)]
pub struct InitCommand {
    /// Overwrite existing database
    #[arg(long)]
    overwrite: bool,

    /// Create default configuration file
    #[arg(long)]
    with_config: bool,

    /// Register this username as the first superuser
    #[arg(long, value_name = "USERNAME", requires = "email")]
    admin: Option<String>,

    /// E-mail address of the superuser
    #[arg(long, value_name = "EMAIL")]
    email: Option<String>,

    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// Note: This command ignores --disable-autoinit (it would be paradoxical).
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = resolve_data_dir(global)?;

        let admin = match (self.admin, self.email) {
            (Some(username), Some(email)) => Some(
                NewGuest::new(username, email)
                    .map_err(|e| CliError::InvalidArguments(e.to_string()))?,
            ),
            _ => None,
        };

        if self.dry_run {
            println!("Dry-run mode: no changes will be made");
            println!();
            println!("Would initialize hotel in: {}", data_dir.display());

            if data_dir.exists() {
                println!("  - Data directory already exists: {}", data_dir.display());
            } else {
                println!("  - Create data directory: {}", data_dir.display());
            }

            let db_path = data_dir.join(DATABASE_FILE_NAME);
            if !db_path.exists() {
                println!("  - Create database: {}", db_path.display());
            } else if self.overwrite {
                println!("  - Replace existing database: {}", db_path.display());
            } else {
                println!(
                    "  - ERROR: Database already exists (use --overwrite to replace): {}",
                    db_path.display()
                );
            }

            if let Some(ref admin) = admin {
                println!("  - Register superuser: {}", admin.username);
            }

            if self.with_config {
                let config_path = data_dir.join(USER_CONFIG_FILE);
                if config_path.exists() {
                    println!(
                        "  - Configuration file already exists (will not overwrite): {}",
                        config_path.display()
                    );
                } else {
                    println!("  - Create configuration file: {}", config_path.display());
                }
            }

            return Ok(());
        }

        let options = InitOptions::new(data_dir)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config)
            .with_admin(admin);
        let result = init_database(&options)?;

        println!("Initialized hotel in: {}", result.data_dir.display());
        if result.data_dir_created {
            println!("  - Created data directory");
        }
        if result.database_created {
            if self.overwrite {
                println!("  - Recreated database");
            } else {
                println!("  - Created database");
            }
        }
        if let Some(admin) = result.admin {
            println!("  - Registered superuser {}", admin.username);
        }
        if result.config_created {
            println!("  - Created default configuration file");
        } else if self.with_config {
            println!("  - Configuration file already exists (not overwritten)");
        }

        Ok(())
    }
}
