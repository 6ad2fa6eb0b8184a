//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, triggers and
//! constants related to the database schema for the hotel booking system.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
///
/// The metadata table stores key-value pairs for database configuration
/// and versioning information.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the guests table.
///
/// Guests mirror the identity records reservations point at.
pub const CREATE_GUESTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS guests (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL,
        full_name TEXT NOT NULL DEFAULT '',
        is_staff INTEGER NOT NULL DEFAULT 0,
        is_superuser INTEGER NOT NULL DEFAULT 0
    )";

/// SQL statement to create the room types table.
///
/// Rates are stored as canonical decimal text with two places.
pub const CREATE_ROOM_TYPES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS room_types (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
            CHECK (name IN ('single', 'double', 'suite', 'family')),
        description TEXT,
        nightly_rate TEXT NOT NULL,
        max_occupancy INTEGER NOT NULL CHECK (max_occupancy >= 1)
    )";

/// SQL statement to create the rooms table.
///
/// A room type that still has rooms cannot be deleted.
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        number TEXT NOT NULL UNIQUE,
        room_type_id INTEGER NOT NULL
            REFERENCES room_types(id) ON DELETE RESTRICT,
        state TEXT NOT NULL DEFAULT 'available'
            CHECK (state IN ('available', 'occupied', 'maintenance')),
        floor INTEGER NOT NULL,
        description TEXT,
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create the reservations table.
///
/// Dates are ISO-8601 text, so lexical order is chronological order and the
/// `CHECK (check_in < check_out)` constraint compares them correctly.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        guest_id INTEGER NOT NULL
            REFERENCES guests(id) ON DELETE CASCADE,
        room_id INTEGER NOT NULL
            REFERENCES rooms(id) ON DELETE CASCADE,
        check_in TEXT NOT NULL,
        check_out TEXT NOT NULL,
        guest_count INTEGER NOT NULL CHECK (guest_count >= 1),
        status TEXT NOT NULL DEFAULT 'pending'
            CHECK (status IN ('pending', 'confirmed', 'cancelled', 'completed')),
        total_price TEXT NOT NULL,
        created_at INTEGER NOT NULL,
        comments TEXT,
        CHECK (check_in < check_out)
    )";

/// SQL statement to create the index backing the overlap query.
pub const CREATE_RESERVATION_RANGE_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_room_range
    ON reservations(room_id, check_in, check_out)";

/// SQL statement to create an index on the reservation status.
///
/// This index speeds up the completion sweep and status-filtered listings.
pub const CREATE_RESERVATION_STATUS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_status ON reservations(status)";

/// SQL statement to create an index on the room state.
pub const CREATE_ROOM_STATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_rooms_state ON rooms(state)";

/// Trigger rejecting an inserted active reservation that overlaps another.
///
/// This is the storage-level backstop for the overlap check performed by
/// the booking path; it fires even for writes that bypass the library.
pub const CREATE_OVERLAP_INSERT_TRIGGER: &str = r"
    CREATE TRIGGER IF NOT EXISTS trg_reservations_overlap_insert
    BEFORE INSERT ON reservations
    WHEN NEW.status IN ('pending', 'confirmed')
    BEGIN
        SELECT RAISE(ABORT, 'overlapping active reservation')
        WHERE EXISTS (
            SELECT 1 FROM reservations
            WHERE room_id = NEW.room_id
              AND status IN ('pending', 'confirmed')
              AND check_in < NEW.check_out
              AND check_out > NEW.check_in
        );
    END";

/// Trigger rejecting an update that leaves two active reservations overlapping.
pub const CREATE_OVERLAP_UPDATE_TRIGGER: &str = r"
    CREATE TRIGGER IF NOT EXISTS trg_reservations_overlap_update
    BEFORE UPDATE OF room_id, check_in, check_out, status ON reservations
    WHEN NEW.status IN ('pending', 'confirmed')
    BEGIN
        SELECT RAISE(ABORT, 'overlapping active reservation')
        WHERE EXISTS (
            SELECT 1 FROM reservations
            WHERE room_id = NEW.room_id
              AND id != NEW.id
              AND status IN ('pending', 'confirmed')
              AND check_in < NEW.check_out
              AND check_out > NEW.check_in
        );
    END";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Names of the tables created by [`CREATE_GUESTS_TABLE`] and friends.
pub const TABLES: [&str; 4] = ["guests", "room_types", "rooms", "reservations"];
