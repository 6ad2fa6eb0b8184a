//! Database CRUD operations for reservations.
//!
//! This module implements the create, read, update and delete operations
//! for reservations, plus the range queries the availability engine, room
//! state derivation and completion sweep are built on. Every function takes
//! a plain `&Connection` so it can run inside a caller's transaction.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::catalog::RoomId;
use crate::error::{Error, Result};
use crate::guest::GuestId;
use crate::reservation::{
    NewReservation, Reservation, ReservationId, ReservationStatus, StayRange,
};

use super::connection::Database;

/// Storage format of calendar dates; lexical order is chronological order.
pub(super) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Converts a date to its stored text form.
pub(super) fn date_to_sql(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a stored date, reporting failures against column `idx`.
pub(super) fn date_from_sql(idx: usize, text: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Converts an amount to canonical text with two decimal places.
pub(super) fn decimal_to_sql(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Parses a stored amount, reporting failures against column `idx`.
pub(super) fn decimal_from_sql(idx: usize, text: &str) -> rusqlite::Result<Decimal> {
    Decimal::from_str(text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Converts a timestamp to Unix epoch seconds for database storage.
pub(super) fn datetime_to_unix_secs(time: DateTime<Utc>) -> i64 {
    time.timestamp()
}

/// Converts Unix epoch seconds from the database to a timestamp.
pub(super) fn unix_secs_to_datetime(idx: usize, secs: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(secs, 0).ok_or_else(|| {
        rusqlite::Error::IntegralValueOutOfRange(idx, secs)
    })
}

/// Wraps a domain conversion failure for a row mapper.
pub(super) fn conversion_failure(idx: usize, err: Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

/// Helper function to deserialize a reservation from a database row.
///
/// Expects row fields in this order: id, `guest_id`, `room_id`, room number,
/// `check_in`, `check_out`, `guest_count`, status, `total_price`,
/// `created_at`, comments
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let guest_id: i64 = row.get(1)?;
    let room_id: i64 = row.get(2)?;
    let room_number: String = row.get(3)?;
    let check_in: String = row.get(4)?;
    let check_out: String = row.get(5)?;
    let guest_count: u32 = row.get(6)?;
    let status: String = row.get(7)?;
    let total_price: String = row.get(8)?;
    let created_secs: i64 = row.get(9)?;
    let comments: Option<String> = row.get(10)?;

    let stay = StayRange::new(date_from_sql(4, &check_in)?, date_from_sql(5, &check_out)?)
        .map_err(|e| conversion_failure(4, e))?;
    let status = ReservationStatus::from_str(&status).map_err(|e| conversion_failure(7, e))?;

    Reservation::builder(ReservationId(id), GuestId(guest_id), RoomId(room_id), stay)
        .room_number(room_number)
        .guest_count(guest_count)
        .status(status)
        .total_price(decimal_from_sql(8, &total_price)?)
        .created_at(unix_secs_to_datetime(9, created_secs)?)
        .comments(comments)
        .build()
        .map_err(|e| conversion_failure(6, e))
}

// SQL statements for CRUD operations
const RESERVATION_COLUMNS: &str = r"
    SELECT v.id, v.guest_id, v.room_id, m.number, v.check_in, v.check_out,
           v.guest_count, v.status, v.total_price, v.created_at, v.comments
    FROM reservations v
    JOIN rooms m ON m.id = v.room_id
";

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (guest_id, room_id, check_in, check_out, guest_count, status, total_price, created_at, comments)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const UPDATE_RESERVATION: &str = r"
    UPDATE reservations
    SET room_id = ?, check_in = ?, check_out = ?, guest_count = ?,
        status = ?, total_price = ?, comments = ?
    WHERE id = ?
";

const UPDATE_STATUS: &str = "UPDATE reservations SET status = ? WHERE id = ?";

const DELETE_RESERVATION: &str = "DELETE FROM reservations WHERE id = ?";

const ACTIVE: &str = "v.status IN ('pending', 'confirmed')";

impl Database {
    /// Inserts a validated reservation and returns the stored record.
    ///
    /// The overlap trigger rejects the insert if it would leave two active
    /// reservations overlapping on one room.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_reservation(conn: &Connection, new: &NewReservation) -> Result<Reservation> {
        conn.execute(
            INSERT_RESERVATION,
            params![
                new.guest_id.0,
                new.room_id.0,
                date_to_sql(new.stay.check_in()),
                date_to_sql(new.stay.check_out()),
                new.guest_count,
                new.status.as_str(),
                decimal_to_sql(new.total_price),
                datetime_to_unix_secs(new.created_at),
                new.comments,
            ],
        )?;
        let id = ReservationId(conn.last_insert_rowid());
        log::debug!("inserted reservation {id}");
        new.clone().into_reservation(id)
    }

    /// Retrieves a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails (other than "not found").
    ///
    /// # Returns
    ///
    /// - `Ok(Some(reservation))` if the reservation exists
    /// - `Ok(None)` if the reservation doesn't exist
    pub fn get_reservation(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
        let sql = format!("{RESERVATION_COLUMNS} WHERE v.id = ?");
        Ok(conn
            .query_row(&sql, params![id.0], row_to_reservation)
            .optional()?)
    }

    /// Retrieves a reservation by id, failing with `NotFound` if it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there is no such reservation.
    pub fn require_reservation(conn: &Connection, id: ReservationId) -> Result<Reservation> {
        Self::get_reservation(conn, id)?.ok_or_else(|| Error::NotFound {
            resource: format!("reservation {id}"),
        })
    }

    /// Writes every mutable field of `reservation` back to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the reservation was found and updated
    /// - `Ok(false)` if the reservation was not found
    pub fn update_reservation(conn: &Connection, reservation: &Reservation) -> Result<bool> {
        let rows = conn.execute(
            UPDATE_RESERVATION,
            params![
                reservation.room_id().0,
                date_to_sql(reservation.check_in()),
                date_to_sql(reservation.check_out()),
                reservation.guest_count(),
                reservation.status().as_str(),
                decimal_to_sql(reservation.total_price()),
                reservation.comments(),
                reservation.id().0,
            ],
        )?;
        Ok(rows > 0)
    }

    /// Sets the status of a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_reservation_status(
        conn: &Connection,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<bool> {
        let rows = conn.execute(UPDATE_STATUS, params![status.as_str(), id.0])?;
        Ok(rows > 0)
    }

    /// Deletes a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the reservation was found and deleted
    /// - `Ok(false)` if the reservation was not found
    pub fn delete_reservation(conn: &Connection, id: ReservationId) -> Result<bool> {
        let rows = conn.execute(DELETE_RESERVATION, params![id.0])?;
        Ok(rows > 0)
    }

    /// Finds the active reservations on `room` that overlap `stay`.
    ///
    /// `exclude` skips one reservation, so an edited reservation does not
    /// conflict with its own prior record.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_overlapping_active(
        conn: &Connection,
        room: RoomId,
        stay: &StayRange,
        exclude: Option<ReservationId>,
    ) -> Result<Vec<Reservation>> {
        let sql = format!(
            "{RESERVATION_COLUMNS}
             WHERE v.room_id = ? AND {ACTIVE}
               AND v.check_in < ? AND v.check_out > ?
               AND v.id IS NOT ?
             ORDER BY v.check_in"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![
                room.0,
                date_to_sql(stay.check_out()),
                date_to_sql(stay.check_in()),
                exclude.map(|id| id.0),
            ],
            row_to_reservation,
        )?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Counts active reservations on `room` whose check-out is on or after `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_active_from(conn: &Connection, room: RoomId, today: NaiveDate) -> Result<usize> {
        let sql = format!(
            "SELECT COUNT(*) FROM reservations v
             WHERE v.room_id = ? AND {ACTIVE} AND v.check_out >= ?"
        );
        // Out-of-range counts fail the row read instead of reading as zero
        let count: usize = conn.query_row(&sql, params![room.0, date_to_sql(today)], |row| {
            row.get(0)
        })?;
        Ok(count)
    }

    /// Finds the confirmed reservation on `room` whose stay contains `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_occupying(
        conn: &Connection,
        room: RoomId,
        today: NaiveDate,
    ) -> Result<Option<Reservation>> {
        let sql = format!(
            "{RESERVATION_COLUMNS}
             WHERE v.room_id = ? AND v.status = 'confirmed'
               AND v.check_in <= ? AND v.check_out > ?
             ORDER BY v.check_in
             LIMIT 1"
        );
        let today = date_to_sql(today);
        Ok(conn
            .query_row(&sql, params![room.0, today, today], row_to_reservation)
            .optional()?)
    }

    /// Lists active reservations on `room` starting on or after `today`,
    /// soonest first, at most `limit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn upcoming_reservations(
        conn: &Connection,
        room: RoomId,
        today: NaiveDate,
        limit: usize,
    ) -> Result<Vec<Reservation>> {
        let sql = format!(
            "{RESERVATION_COLUMNS}
             WHERE v.room_id = ? AND {ACTIVE} AND v.check_in >= ?
             ORDER BY v.check_in, v.id
             LIMIT ?"
        );
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![room.0, date_to_sql(today), limit],
            row_to_reservation,
        )?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Finds confirmed reservations whose check-out is before `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_completable(conn: &Connection, today: NaiveDate) -> Result<Vec<Reservation>> {
        let sql = format!(
            "{RESERVATION_COLUMNS}
             WHERE v.status = 'confirmed' AND v.check_out < ?
             ORDER BY v.check_out, v.id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![date_to_sql(today)], row_to_reservation)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Lists reservations, newest first, optionally filtered by status and guest.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations(
        conn: &Connection,
        status: Option<ReservationStatus>,
        guest: Option<GuestId>,
    ) -> Result<Vec<Reservation>> {
        let sql = format!(
            "{RESERVATION_COLUMNS}
             WHERE (?1 IS NULL OR v.status = ?1)
               AND (?2 IS NULL OR v.guest_id = ?2)
             ORDER BY v.created_at DESC, v.id DESC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![status.map(ReservationStatus::as_str), guest.map(|g| g.0)],
            row_to_reservation,
        )?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Lists every reservation on `room`, by check-in.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_room_reservations(conn: &Connection, room: RoomId) -> Result<Vec<Reservation>> {
        let sql = format!("{RESERVATION_COLUMNS} WHERE v.room_id = ? ORDER BY v.check_in, v.id");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![room.0], row_to_reservation)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Verifies the integrity of the database file.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `PRAGMA integrity_check` reports problems.
    pub fn verify_integrity(&self) -> Result<()> {
        let result: String = self
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

        if result == "ok" {
            Ok(())
        } else {
            Err(Error::Validation {
                field: "database".into(),
                message: format!("Integrity check failed: {result}"),
            })
        }
    }
}
