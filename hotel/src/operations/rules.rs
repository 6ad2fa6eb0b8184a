//! Booking checks shared by the create and update plans.
//!
//! Each check returns the error of its own validation step, so callers run
//! them in order and the first failure wins.

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::catalog::{Room, RoomState};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::{ReservationId, StayRange};

/// A check-in before today cannot be booked.
pub(crate) fn check_not_in_past(stay: &StayRange, today: NaiveDate) -> Result<()> {
    if stay.check_in() < today {
        return Err(Error::DateInPast {
            check_in: stay.check_in(),
            today,
        });
    }
    Ok(())
}

/// At least one guest.
pub(crate) fn check_guest_count(count: u32) -> Result<()> {
    if count == 0 {
        return Err(Error::InvalidGuestCount { count });
    }
    Ok(())
}

/// The room type must hold `count` guests.
pub(crate) fn check_capacity(room: &Room, count: u32) -> Result<()> {
    if count > room.max_occupancy() {
        return Err(Error::CapacityExceeded {
            room: room.number.clone(),
            guests: count,
            max_occupancy: room.max_occupancy(),
        });
    }
    Ok(())
}

/// Only an `available` room takes new reservations; occupied and
/// maintenance rooms are refused whatever the dates.
pub(crate) fn check_room_bookable(room: &Room, stay: &StayRange) -> Result<()> {
    if room.state != RoomState::Available {
        return Err(unavailable(room, stay, format!("room is {}", room.state)));
    }
    Ok(())
}

/// No other active reservation on `room` may share a night with `stay`.
///
/// `exclude` is the reservation being edited, which never conflicts with
/// itself.
pub(crate) fn check_no_overlap(
    conn: &Connection,
    room: &Room,
    stay: &StayRange,
    exclude: Option<ReservationId>,
) -> Result<()> {
    let conflicts = Database::find_overlapping_active(conn, room.id, stay, exclude)?;
    if let Some(existing) = conflicts.first() {
        return Err(unavailable(
            room,
            stay,
            format!("overlaps reservation {} ({})", existing.id(), existing.stay()),
        ));
    }
    Ok(())
}

/// Both room checks of the booking path.
pub(crate) fn check_room_free(
    conn: &Connection,
    room: &Room,
    stay: &StayRange,
    exclude: Option<ReservationId>,
) -> Result<()> {
    check_room_bookable(room, stay)?;
    check_no_overlap(conn, room, stay, exclude)
}

fn unavailable(room: &Room, stay: &StayRange, reason: String) -> Error {
    Error::RoomUnavailable {
        room: room.number.clone(),
        check_in: stay.check_in(),
        check_out: stay.check_out(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, date, new_reservation, seed_guest, seed_room};
    use rust_decimal_macros::dec;

    #[test]
    fn test_past_check_in_rejected() {
        let stay = StayRange::new(date(2025, 2, 28), date(2025, 3, 2)).unwrap();
        let err = check_not_in_past(&stay, date(2025, 3, 1)).unwrap_err();
        assert!(matches!(err, Error::DateInPast { .. }));

        let stay = StayRange::new(date(2025, 3, 1), date(2025, 3, 2)).unwrap();
        assert!(check_not_in_past(&stay, date(2025, 3, 1)).is_ok());
    }

    #[test]
    fn test_guest_count_and_capacity() {
        let db = create_test_database();
        let room = seed_room(&db, "101", "double", dec!(100.00), 2);

        assert!(matches!(
            check_guest_count(0),
            Err(Error::InvalidGuestCount { count: 0 })
        ));
        assert!(check_guest_count(1).is_ok());

        assert!(check_capacity(&room, 2).is_ok());
        assert!(matches!(
            check_capacity(&room, 3),
            Err(Error::CapacityExceeded {
                guests: 3,
                max_occupancy: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_room_free_names_the_conflict() {
        let db = create_test_database();
        let guest = seed_guest(&db, "ana", false);
        let room = seed_room(&db, "101", "double", dec!(100.00), 2);
        let stored = Database::insert_reservation(
            db.connection(),
            &new_reservation(&guest, &room, date(2025, 3, 1), date(2025, 3, 4)),
        )
        .unwrap();

        let stay = StayRange::new(date(2025, 3, 3), date(2025, 3, 5)).unwrap();
        let err = check_room_free(db.connection(), &room, &stay, None).unwrap_err();
        match err {
            Error::RoomUnavailable { reason, .. } => {
                assert!(reason.contains(&stored.id().to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }

        // The reservation itself is not a conflict
        assert!(check_room_free(db.connection(), &room, &stay, Some(stored.id())).is_ok());
    }

    #[test]
    fn test_occupied_room_not_free() {
        let db = create_test_database();
        let mut room = seed_room(&db, "101", "double", dec!(100.00), 2);
        room.state = RoomState::Occupied;

        let stay = StayRange::new(date(2025, 3, 3), date(2025, 3, 5)).unwrap();
        match check_room_free(db.connection(), &room, &stay, None).unwrap_err() {
            Error::RoomUnavailable { reason, .. } => assert_eq!(reason, "room is occupied"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_maintenance_room_not_free() {
        let db = create_test_database();
        let mut room = seed_room(&db, "101", "double", dec!(100.00), 2);
        room.state = RoomState::Maintenance;

        let stay = StayRange::new(date(2025, 3, 3), date(2025, 3, 5)).unwrap();
        let err = check_room_free(db.connection(), &room, &stay, None).unwrap_err();
        assert!(err.to_string().contains("maintenance"));
    }
}
