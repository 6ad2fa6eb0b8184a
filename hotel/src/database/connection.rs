//! Opening the booking database.

use rusqlite::{Connection, OpenFlags};

use crate::error::Result;

use super::config::DatabaseConfig;

/// A `SQLite` connection to the booking database.
///
/// Each thread or process that books rooms opens its own `Database`;
/// writers serialize on the `SQLite` write lock (see
/// [`Database::begin_immediate`]), waiting up to the configured busy
/// timeout.
///
/// # Examples
///
/// ```no_run
/// use hotel::database::{Database, DatabaseConfig};
///
/// let db = Database::open(DatabaseConfig::in_data_dir("/srv/hotel")).unwrap();
/// println!("{} rooms", Database::list_rooms(db.connection()).unwrap().len());
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    pub(super) config: DatabaseConfig,
}

/// WAL lets listings read while a booking holds the write lock; foreign
/// keys keep reservations pointing at real rooms and guests.
fn apply_pragmas(conn: &Connection) -> Result<()> {
    // journal_mode answers with a row
    let mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
    log::debug!("journal mode {mode}");
    conn.execute_batch("PRAGMA synchronous = NORMAL; PRAGMA foreign_keys = ON;")?;
    Ok(())
}

impl Database {
    /// Opens (creating if needed) the database described by `config` and
    /// brings its schema up to date.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the file cannot be
    /// created, if the schema belongs to a newer release, or
    /// [`Error::LockTimeout`](crate::Error::LockTimeout) if another writer
    /// holds the lock while the schema is being created.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(
            &config.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        // Before WAL: switching journal mode needs the lock too
        conn.busy_timeout(config.busy_timeout)?;
        apply_pragmas(&conn)?;

        super::migrations::check_schema_compatibility(&conn)
            .map_err(|e| e.with_lock_timeout(config.lock_wait_seconds()))?;

        log::debug!("opened database at {}", config.path.display());
        Ok(Self { conn, config })
    }

    /// The underlying connection, for the `Database::*` query functions.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Mutable access, needed to start transactions.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Returns the configuration this database was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }
}
