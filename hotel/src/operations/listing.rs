//! Listing queries.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::catalog::{Room, RoomState, RoomTypeName};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::guest::{Guest, GuestId};
use crate::reservation::{Reservation, ReservationStatus};

use super::availability::{current_reservation, is_available, next_reservations};

/// Availability filter for room listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    /// Rooms bookable right now with no date range.
    Available,
    /// Every other room.
    Reserved,
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Reserved => write!(f, "reserved"),
        }
    }
}

impl FromStr for Availability {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "reserved" => Ok(Self::Reserved),
            _ => Err(Error::Validation {
                field: "availability".into(),
                message: format!("expected 'available' or 'reserved', got '{s}'"),
            }),
        }
    }
}

/// Room listing filter. Empty fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomFilter {
    /// Only rooms of this type.
    pub room_type: Option<RoomTypeName>,
    /// Only rooms in this state.
    pub state: Option<RoomState>,
    /// Only rooms with this availability.
    pub availability: Option<Availability>,
}

/// A room with its availability as of the listing day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomSummary {
    /// The room.
    #[serde(flatten)]
    pub room: Room,
    /// Whether it can be booked with no date range.
    pub available: bool,
}

/// Lists rooms by number, applying `filter`.
///
/// # Errors
///
/// Returns a persistence error if a query fails.
pub fn list_rooms(conn: &Connection, filter: &RoomFilter, today: NaiveDate) -> Result<Vec<RoomSummary>> {
    let mut summaries = Vec::new();
    for room in Database::list_rooms(conn)? {
        if filter.room_type.is_some_and(|t| t != room.room_type.name) {
            continue;
        }
        if filter.state.is_some_and(|s| s != room.state) {
            continue;
        }
        let available = is_available(conn, &room, None, None, today)?;
        let wanted = match filter.availability {
            None => true,
            Some(Availability::Available) => available,
            Some(Availability::Reserved) => !available,
        };
        if wanted {
            summaries.push(RoomSummary { room, available });
        }
    }
    Ok(summaries)
}

/// Reservation listing filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    /// Only reservations with this status.
    pub status: Option<ReservationStatus>,
    /// Only reservations held by this guest.
    pub guest: Option<GuestId>,
}

/// Lists reservations visible to `actor`, newest first.
///
/// Staff see every reservation; a guest only ever sees their own,
/// whatever the filter asks for.
///
/// # Errors
///
/// Returns a persistence error if the query fails.
pub fn list_reservations(
    conn: &Connection,
    actor: &Guest,
    filter: &ReservationFilter,
) -> Result<Vec<Reservation>> {
    let guest = if actor.is_staff_or_admin() {
        filter.guest
    } else {
        Some(actor.id)
    };
    Database::list_reservations(conn, filter.status, guest)
}

/// A room with its current and upcoming reservations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomDetails {
    /// The room.
    pub room: Room,
    /// Whether it can be booked with no date range.
    pub available: bool,
    /// The confirmed stay covering today.
    pub current: Option<Reservation>,
    /// The next active reservations, soonest first.
    pub upcoming: Vec<Reservation>,
}

/// Loads the details of room `number`.
///
/// # Errors
///
/// Returns `NotFound` for an unknown room or a persistence error.
pub fn room_details(
    conn: &Connection,
    number: &str,
    today: NaiveDate,
    limit: usize,
) -> Result<RoomDetails> {
    let room = Database::require_room(conn, number)?;
    Ok(RoomDetails {
        available: is_available(conn, &room, None, None, today)?,
        current: current_reservation(conn, &room, today)?,
        upcoming: next_reservations(conn, &room, today, limit)?,
        room,
    })
}
