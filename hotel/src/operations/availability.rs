//! Availability queries.
//!
//! Every function here reads the committed reservation set on each call;
//! nothing is cached between calls.

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::catalog::{Room, RoomState};
use crate::database::Database;
use crate::error::Result;
use crate::reservation::{Reservation, StayRange};

/// Whether `room` can be booked.
///
/// A room whose state is not `available` is never bookable. Without a date
/// range the room is available when no active reservation ends today or
/// later. With both dates given, an inverted or empty range is unavailable,
/// otherwise the room is available when no active reservation overlaps the
/// half-open range. A single date is treated as no range.
///
/// # Errors
///
/// Returns a persistence error if the query fails.
pub fn is_available(
    conn: &Connection,
    room: &Room,
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<bool> {
    if room.state != RoomState::Available {
        return Ok(false);
    }

    match (check_in, check_out) {
        (Some(check_in), Some(check_out)) => {
            let Ok(stay) = StayRange::new(check_in, check_out) else {
                return Ok(false);
            };
            let conflicts = Database::find_overlapping_active(conn, room.id, &stay, None)?;
            log::debug!(
                "room {} has {} conflict(s) for {stay}",
                room.number,
                conflicts.len()
            );
            Ok(conflicts.is_empty())
        }
        _ => Ok(Database::count_active_from(conn, room.id, today)? == 0),
    }
}

/// Active reservations on `room` checking in today or later, soonest first.
///
/// # Errors
///
/// Returns a persistence error if the query fails.
pub fn next_reservations(
    conn: &Connection,
    room: &Room,
    today: NaiveDate,
    limit: usize,
) -> Result<Vec<Reservation>> {
    Database::upcoming_reservations(conn, room.id, today, limit)
}

/// The confirmed reservation whose stay contains today, if any.
///
/// # Errors
///
/// Returns a persistence error if the query fails.
pub fn current_reservation(
    conn: &Connection,
    room: &Room,
    today: NaiveDate,
) -> Result<Option<Reservation>> {
    Database::find_occupying(conn, room.id, today)
}
