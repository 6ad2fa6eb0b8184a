//! Database layer for persistent storage of the hotel catalog and reservations.
//!
//! This module provides a SQLite-based storage layer, including connection
//! management, schema versioning, write-locking transactions and CRUD
//! operations for guests, room types, rooms and reservations.
//!
//! # Examples
//!
//! ```no_run
//! use hotel::database::{Database, DatabaseConfig};
//!
//! // Open a database
//! let config = DatabaseConfig::new("/tmp/hotel.db");
//! let db = Database::open(config).unwrap();
//!
//! // List all rooms
//! for room in Database::list_rooms(db.connection()).unwrap() {
//!     println!("{room}: {}", room.state);
//! }
//! ```

mod catalog;
mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export public API
pub use config::{
    default_data_dir, resolve_data_dir, DatabaseConfig, DATABASE_FILE_NAME, DATA_DIR_ENV,
    DEFAULT_BUSY_TIMEOUT,
};
pub use connection::Database;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
