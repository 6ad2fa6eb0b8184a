//! Schema creation and version checks.
//!
//! The schema is created in one immediate transaction the first time a
//! database is opened. A database stamped with another version is refused
//! rather than guessed at.

use std::cmp::Ordering;

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_GUESTS_TABLE, CREATE_METADATA_TABLE, CREATE_OVERLAP_INSERT_TRIGGER,
    CREATE_OVERLAP_UPDATE_TRIGGER, CREATE_RESERVATIONS_TABLE, CREATE_RESERVATION_RANGE_INDEX,
    CREATE_RESERVATION_STATUS_INDEX, CREATE_ROOMS_TABLE, CREATE_ROOM_STATE_INDEX,
    CREATE_ROOM_TYPES_TABLE, CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION,
    SELECT_SCHEMA_VERSION,
};

/// Creates every table, index and overlap trigger and stamps the version.
///
/// Only for a database that has no schema yet.
///
/// # Errors
///
/// Returns the first failing statement; nothing is left behind then.
///
/// # Examples
///
/// ```no_run
/// use rusqlite::Connection;
/// use hotel::database::migrations::initialize_schema;
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch("BEGIN IMMEDIATE")?;
    match create_schema_objects(conn) {
        Ok(()) => {
            conn.execute_batch("COMMIT")?;
            Ok(())
        }
        Err(e) => {
            // The original error is more useful than a failed rollback
            let _ = conn.execute_batch("ROLLBACK");
            Err(e)
        }
    }
}

fn create_schema_objects(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;

    // Parents before children so the foreign keys resolve
    conn.execute(CREATE_GUESTS_TABLE, [])?;
    conn.execute(CREATE_ROOM_TYPES_TABLE, [])?;
    conn.execute(CREATE_ROOMS_TABLE, [])?;
    conn.execute(CREATE_RESERVATIONS_TABLE, [])?;

    conn.execute(CREATE_RESERVATION_RANGE_INDEX, [])?;
    conn.execute(CREATE_RESERVATION_STATUS_INDEX, [])?;
    conn.execute(CREATE_ROOM_STATE_INDEX, [])?;

    // Trigger bodies contain semicolons
    conn.execute_batch(CREATE_OVERLAP_INSERT_TRIGGER)?;
    conn.execute_batch(CREATE_OVERLAP_UPDATE_TRIGGER)?;

    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;
    Ok(())
}

/// Reads the schema version stored in the metadata table.
///
/// A database without the table, or without a version row, is version 0:
/// nothing has been created yet.
///
/// # Errors
///
/// Returns any other query failure.
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    let stored = conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value
            .parse::<i32>()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
    });
    match stored {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        // "no such table: metadata"
        Err(rusqlite::Error::SqliteFailure(ref failure, _))
            if failure.code == rusqlite::ErrorCode::Unknown =>
        {
            Ok(0)
        }
        Err(e) => Err(e.into()),
    }
}

/// Creates the schema on a fresh database and refuses one written by a
/// different schema version.
///
/// # Errors
///
/// Returns a validation error naming both versions on a mismatch, or the
/// failure of schema creation.
///
/// # Examples
///
/// ```no_run
/// use rusqlite::Connection;
/// use hotel::database::migrations::check_schema_compatibility;
///
/// let conn = Connection::open_in_memory().unwrap();
/// check_schema_compatibility(&conn).unwrap();
/// ```
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;
    if version == 0 {
        log::info!("creating booking schema version {CURRENT_SCHEMA_VERSION}");
        return initialize_schema(conn);
    }

    let message = match version.cmp(&CURRENT_SCHEMA_VERSION) {
        Ordering::Equal => return Ok(()),
        Ordering::Less => format!(
            "database schema version {version} is older than client version {CURRENT_SCHEMA_VERSION} and cannot be upgraded in place"
        ),
        Ordering::Greater => format!(
            "database schema version {version} is newer than client version {CURRENT_SCHEMA_VERSION}; upgrade hotel"
        ),
    };
    Err(Error::Validation {
        field: "schema_version".into(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema::TABLES;

    fn create_test_connection() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn test_initialize_schema() {
        let conn = create_test_connection();
        initialize_schema(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
        for table in TABLES {
            let count: i32 = conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
                .unwrap();
            assert_eq!(count, 0, "table {table} should be empty");
        }
    }

    #[test]
    fn test_fresh_database_is_version_zero() {
        let conn = create_test_connection();
        assert_eq!(get_schema_version(&conn).unwrap(), 0);

        check_schema_compatibility(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);

        // Second open is a no-op
        check_schema_compatibility(&conn).unwrap();
    }

    #[test]
    fn test_version_mismatch_refused() {
        let conn = create_test_connection();
        initialize_schema(&conn).unwrap();

        for (stored, expected) in [("999", "newer than client"), ("-1", "older than client")] {
            conn.execute(
                "UPDATE metadata SET value = ?1 WHERE key = 'schema_version'",
                [stored],
            )
            .unwrap();
            let err = check_schema_compatibility(&conn).unwrap_err();
            assert!(err.is_validation());
            assert!(err.to_string().contains(expected), "{err}");
        }
    }

    #[test]
    fn test_schema_creates_all_indices() {
        let conn = create_test_connection();
        initialize_schema(&conn).unwrap();

        let index_count: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name LIKE 'idx_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();

        // room range, status, room state
        assert_eq!(index_count, 3);
    }

    #[test]
    fn test_schema_creates_overlap_triggers() {
        let conn = create_test_connection();
        initialize_schema(&conn).unwrap();

        let trigger_count: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'trigger' AND name LIKE 'trg_reservations_overlap_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(trigger_count, 2);
    }

    #[test]
    fn test_overlap_trigger_rejects_raw_insert() {
        let conn = create_test_connection();
        initialize_schema(&conn).unwrap();
        conn.execute_batch(
            "INSERT INTO guests (username, email) VALUES ('ana', 'ana@example.com');
             INSERT INTO room_types (name, nightly_rate, max_occupancy) VALUES ('double', '25000.00', 2);
             INSERT INTO rooms (number, room_type_id, floor, created_at) VALUES ('101', 1, 1, 0);
             INSERT INTO reservations (guest_id, room_id, check_in, check_out, guest_count, total_price, created_at)
                 VALUES (1, 1, '2025-06-01', '2025-06-04', 1, '75000.00', 0);",
        )
        .unwrap();

        let overlapping = conn.execute(
            "INSERT INTO reservations (guest_id, room_id, check_in, check_out, guest_count, total_price, created_at)
             VALUES (1, 1, '2025-06-03', '2025-06-05', 1, '50000.00', 0)",
            [],
        );
        assert!(overlapping.is_err());

        // Back-to-back stays share no night
        conn.execute(
            "INSERT INTO reservations (guest_id, room_id, check_in, check_out, guest_count, total_price, created_at)
             VALUES (1, 1, '2025-06-04', '2025-06-05', 1, '25000.00', 0)",
            [],
        )
        .unwrap();

        // Cancelled reservations are ignored
        conn.execute(
            "INSERT INTO reservations (guest_id, room_id, check_in, check_out, guest_count, status, total_price, created_at)
             VALUES (1, 1, '2025-06-01', '2025-06-02', 1, 'cancelled', '25000.00', 0)",
            [],
        )
        .unwrap();
    }

    #[test]
    fn test_check_constraints() {
        let conn = create_test_connection();
        initialize_schema(&conn).unwrap();
        conn.execute_batch(
            "INSERT INTO guests (username, email) VALUES ('ana', 'ana@example.com');
             INSERT INTO room_types (name, nightly_rate, max_occupancy) VALUES ('single', '35000.00', 1);
             INSERT INTO rooms (number, room_type_id, floor, created_at) VALUES ('101', 1, 1, 0);",
        )
        .unwrap();

        let inverted = conn.execute(
            "INSERT INTO reservations (guest_id, room_id, check_in, check_out, guest_count, total_price, created_at)
             VALUES (1, 1, '2025-06-04', '2025-06-01', 1, '0.00', 0)",
            [],
        );
        assert!(inverted.is_err());

        let bad_type = conn.execute(
            "INSERT INTO room_types (name, nightly_rate, max_occupancy) VALUES ('penthouse', '1.00', 1)",
            [],
        );
        assert!(bad_type.is_err());
    }
}
