//! Room state derivation.
//!
//! A room's occupancy state follows from its active reservations:
//!
//! 1. a confirmed reservation whose stay contains today makes it `occupied`;
//! 2. otherwise, no active reservation ending today or later makes it
//!    `available`;
//! 3. otherwise the state is left as it is.
//!
//! Derivation only moves a room between `available` and `occupied`. A room
//! in `maintenance` is never touched; that state belongs to staff.

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

use crate::catalog::{RoomId, RoomState};
use crate::database::Database;
use crate::error::{Error, Result};

/// A state change made by derivation or by a manual override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomStateChange {
    /// The room that changed.
    pub room_id: RoomId,
    /// Its number.
    pub room_number: String,
    /// State before the change.
    pub from: RoomState,
    /// State after the change.
    pub to: RoomState,
}

/// The state a room should move to, or `None` to leave it unchanged.
///
/// `occupied_today` says whether a confirmed reservation covers today;
/// `active_from_today` counts active reservations with check-out on or
/// after today.
///
/// # Examples
///
/// ```
/// use hotel::operations::derived_state;
/// use hotel::RoomState;
///
/// assert_eq!(derived_state(RoomState::Available, true, 1), Some(RoomState::Occupied));
/// assert_eq!(derived_state(RoomState::Occupied, false, 0), Some(RoomState::Available));
/// assert_eq!(derived_state(RoomState::Occupied, false, 2), None);
/// assert_eq!(derived_state(RoomState::Maintenance, true, 1), None);
/// ```
#[must_use]
pub fn derived_state(
    current: RoomState,
    occupied_today: bool,
    active_from_today: usize,
) -> Option<RoomState> {
    if current == RoomState::Maintenance {
        return None;
    }
    let target = if occupied_today {
        RoomState::Occupied
    } else if active_from_today == 0 {
        RoomState::Available
    } else {
        return None;
    };
    (target != current).then_some(target)
}

/// Recomputes and stores the state of one room.
///
/// Idempotent: running it twice in a row changes nothing the second time.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the room does not exist, or a persistence
/// error if a query or the update fails.
pub fn derive_room_state(
    conn: &Connection,
    room_id: RoomId,
    today: NaiveDate,
) -> Result<Option<RoomStateChange>> {
    let room = Database::get_room(conn, room_id)?.ok_or_else(|| Error::NotFound {
        resource: format!("room id {room_id}"),
    })?;

    if room.state == RoomState::Maintenance {
        log::debug!("room {} is under maintenance, state left as is", room.number);
        return Ok(None);
    }

    let occupied_today = Database::find_occupying(conn, room_id, today)?.is_some();
    let active_from_today = Database::count_active_from(conn, room_id, today)?;

    let Some(to) = derived_state(room.state, occupied_today, active_from_today) else {
        log::debug!(
            "room {} stays {} ({} active reservation(s) from {today})",
            room.number,
            room.state,
            active_from_today
        );
        return Ok(None);
    };

    Database::set_room_state(conn, room_id, to)?;
    log::info!("room {} is now {to} (was {})", room.number, room.state);

    Ok(Some(RoomStateChange {
        room_id,
        room_number: room.number,
        from: room.state,
        to,
    }))
}
