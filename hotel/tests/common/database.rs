//! Shared database test utilities.

use std::path::{Path, PathBuf};

use hotel::database::{Database, DatabaseConfig};
use hotel::{Config, FrontDesk, Guest, NewGuest, NewRoom, NewRoomType, RoomTypeName};
use rust_decimal_macros::dec;
use tempfile::TempDir;

use super::{today, RecordingNotifier};

/// A front desk over a database file in its own temporary directory.
///
/// The directory lives as long as the fixture.
#[allow(dead_code)]
pub struct DeskFixture {
    pub dir: TempDir,
    pub desk: FrontDesk,
    pub notifier: RecordingNotifier,
    pub staff: Guest,
}

#[allow(dead_code)]
impl DeskFixture {
    /// Opens a fresh database pinned to [`today`] with a staff identity
    /// `desk` and an empty catalog.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db = open_database(&database_path(dir.path()));
        let notifier = RecordingNotifier::new();
        let mut desk = FrontDesk::new(db, Config::default())
            .with_notifier(Box::new(notifier.clone()))
            .with_today(today());

        desk.register_guest(
            NewGuest::new("desk", "desk@example.com").unwrap().staff(true),
            false,
        )
        .unwrap();
        let staff = desk.guest("desk").unwrap();

        Self {
            dir,
            desk,
            notifier,
            staff,
        }
    }

    /// Like [`DeskFixture::new`], with the standard catalog seeded.
    pub fn with_catalog() -> Self {
        let mut fixture = Self::new();
        seed_catalog(&mut fixture.desk, &fixture.staff);
        fixture
    }

    /// The database file behind the front desk.
    pub fn database_path(&self) -> PathBuf {
        database_path(self.dir.path())
    }

    /// Registers a regular guest and returns their identity.
    pub fn guest(&mut self, username: &str) -> Guest {
        self.desk
            .register_guest(
                NewGuest::new(username, format!("{username}@example.com"))
                    .unwrap()
                    .with_full_name(username.to_uppercase()),
                false,
            )
            .unwrap()
            .guest
            .unwrap()
    }
}

/// Path of the database file inside `dir`.
pub fn database_path(dir: &Path) -> PathBuf {
    dir.join("hotel.db")
}

/// Opens (creating if needed) the database at `path`.
pub fn open_database(path: &Path) -> Database {
    Database::open(DatabaseConfig::new(path)).unwrap()
}

/// Seeds the standard catalog:
///
/// | room | type   | rate     | max |
/// |------|--------|----------|-----|
/// | 101  | double | 25000.00 | 2   |
/// | 102  | double | 25000.00 | 2   |
/// | 201  | suite  | 60000.00 | 4   |
#[allow(dead_code)]
pub fn seed_catalog(desk: &mut FrontDesk, staff: &Guest) {
    desk.add_room_type(
        staff,
        NewRoomType::new(RoomTypeName::Double, dec!(25000.00), 2).unwrap(),
        false,
    )
    .unwrap();
    desk.add_room_type(
        staff,
        NewRoomType::new(RoomTypeName::Suite, dec!(60000.00), 4).unwrap(),
        false,
    )
    .unwrap();
    for (number, room_type, floor) in [
        ("101", RoomTypeName::Double, 1),
        ("102", RoomTypeName::Double, 1),
        ("201", RoomTypeName::Suite, 2),
    ] {
        desk.add_room(staff, NewRoom::new(number, room_type, floor).unwrap(), false)
            .unwrap();
    }
}
