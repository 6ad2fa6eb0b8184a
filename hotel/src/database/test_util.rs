//! Shared test utilities for database unit tests.
//!
//! This module provides helper functions used across multiple test modules
//! to create temporary databases and seed catalog data.

use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tempfile::tempdir;

use crate::catalog::{NewRoom, NewRoomType, Room, RoomTypeName};
use crate::database::{Database, DatabaseConfig};
use crate::guest::{Guest, NewGuest};
use crate::reservation::{NewReservation, ReservationStatus, StayRange};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Shorthand for a calendar date.
///
/// # Panics
///
/// Panics on an invalid date.
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Stores a guest with a derived e-mail address.
///
/// # Panics
///
/// Panics if the guest cannot be stored.
pub fn seed_guest(db: &Database, username: &str, is_staff: bool) -> Guest {
    let guest = NewGuest::new(username, format!("{username}@example.com"))
        .unwrap()
        .staff(is_staff);
    Database::insert_guest(db.connection(), &guest).unwrap()
}

/// Stores a room, creating its room type on first use.
///
/// # Panics
///
/// Panics if the type name is invalid or the room cannot be stored.
pub fn seed_room(
    db: &Database,
    number: &str,
    room_type: &str,
    nightly_rate: Decimal,
    max_occupancy: u32,
) -> Room {
    let name = RoomTypeName::from_str(room_type).unwrap();
    if Database::get_room_type(db.connection(), name)
        .unwrap()
        .is_none()
    {
        let new_type = NewRoomType::new(name, nightly_rate, max_occupancy).unwrap();
        Database::insert_room_type(db.connection(), &new_type).unwrap();
    }
    let room = NewRoom::new(number, name, 1).unwrap();
    Database::insert_room(db.connection(), &room).unwrap()
}

/// Builds a pending reservation priced at the room's rate.
///
/// # Panics
///
/// Panics if the dates do not form a valid stay.
#[must_use]
pub fn new_reservation(
    guest: &Guest,
    room: &Room,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> NewReservation {
    let stay = StayRange::new(check_in, check_out).unwrap();
    NewReservation {
        guest_id: guest.id,
        room_id: room.id,
        room_number: room.number.clone(),
        stay,
        guest_count: 1,
        status: ReservationStatus::Pending,
        total_price: stay.price(room.nightly_rate()).unwrap(),
        comments: None,
        created_at: Utc::now(),
    }
}
