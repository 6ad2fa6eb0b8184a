//! Database operations for guests, room types and rooms.

use std::str::FromStr;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::catalog::{NewRoom, NewRoomType, Room, RoomId, RoomState, RoomType, RoomTypeId, RoomTypeName};
use crate::error::{Error, Result};
use crate::guest::{Guest, GuestId, NewGuest};

use super::connection::Database;
use super::operations::{
    conversion_failure, datetime_to_unix_secs, decimal_from_sql, decimal_to_sql,
    unix_secs_to_datetime,
};

const GUEST_COLUMNS: &str =
    "SELECT id, username, email, full_name, is_staff, is_superuser FROM guests";

const ROOM_TYPE_COLUMNS: &str =
    "SELECT id, name, description, nightly_rate, max_occupancy FROM room_types";

const ROOM_COLUMNS: &str = r"
    SELECT r.id, r.number, r.state, r.floor, r.description, r.created_at,
           t.id, t.name, t.description, t.nightly_rate, t.max_occupancy
    FROM rooms r
    JOIN room_types t ON t.id = r.room_type_id
";

fn row_to_guest(row: &rusqlite::Row<'_>) -> rusqlite::Result<Guest> {
    Ok(Guest {
        id: GuestId(row.get(0)?),
        username: row.get(1)?,
        email: row.get(2)?,
        full_name: row.get(3)?,
        is_staff: row.get(4)?,
        is_superuser: row.get(5)?,
    })
}

/// Maps a room type row starting at column `base`.
fn row_to_room_type(row: &rusqlite::Row<'_>, base: usize) -> rusqlite::Result<RoomType> {
    let name: String = row.get(base + 1)?;
    let rate: String = row.get(base + 3)?;
    Ok(RoomType {
        id: RoomTypeId(row.get(base)?),
        name: RoomTypeName::from_str(&name).map_err(|e| conversion_failure(base + 1, e))?,
        description: row.get(base + 2)?,
        nightly_rate: decimal_from_sql(base + 3, &rate)?,
        max_occupancy: row.get(base + 4)?,
    })
}

fn row_to_room(row: &rusqlite::Row<'_>) -> rusqlite::Result<Room> {
    let state: String = row.get(2)?;
    let created_secs: i64 = row.get(5)?;
    Ok(Room {
        id: RoomId(row.get(0)?),
        number: row.get(1)?,
        state: RoomState::from_str(&state).map_err(|e| conversion_failure(2, e))?,
        floor: row.get(3)?,
        description: row.get(4)?,
        created_at: unix_secs_to_datetime(5, created_secs)?,
        room_type: row_to_room_type(row, 6)?,
    })
}

impl Database {
    /// Stores a new guest.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyExists`] if the username is taken.
    pub fn insert_guest(conn: &Connection, guest: &NewGuest) -> Result<Guest> {
        if Self::get_guest_by_username(conn, &guest.username)?.is_some() {
            return Err(Error::AlreadyExists {
                resource: format!("guest '{}'", guest.username),
            });
        }

        conn.execute(
            "INSERT INTO guests (username, email, full_name, is_staff, is_superuser)
             VALUES (?, ?, ?, ?, ?)",
            params![
                guest.username,
                guest.email,
                guest.full_name,
                guest.is_staff,
                guest.is_superuser,
            ],
        )?;

        Ok(Guest {
            id: GuestId(conn.last_insert_rowid()),
            username: guest.username.clone(),
            email: guest.email.clone(),
            full_name: guest.full_name.clone(),
            is_staff: guest.is_staff,
            is_superuser: guest.is_superuser,
        })
    }

    /// Retrieves a guest by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_guest(conn: &Connection, id: GuestId) -> Result<Option<Guest>> {
        let sql = format!("{GUEST_COLUMNS} WHERE id = ?");
        Ok(conn.query_row(&sql, params![id.0], row_to_guest).optional()?)
    }

    /// Retrieves a guest by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_guest_by_username(conn: &Connection, username: &str) -> Result<Option<Guest>> {
        let sql = format!("{GUEST_COLUMNS} WHERE username = ?");
        Ok(conn
            .query_row(&sql, params![username.trim()], row_to_guest)
            .optional()?)
    }

    /// Lists all guests by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_guests(conn: &Connection) -> Result<Vec<Guest>> {
        let sql = format!("{GUEST_COLUMNS} ORDER BY username");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_guest)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Stores a new room type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyExists`] if a type with this name exists.
    pub fn insert_room_type(conn: &Connection, room_type: &NewRoomType) -> Result<RoomType> {
        if Self::get_room_type(conn, room_type.name)?.is_some() {
            return Err(Error::AlreadyExists {
                resource: format!("room type '{}'", room_type.name),
            });
        }

        conn.execute(
            "INSERT INTO room_types (name, description, nightly_rate, max_occupancy)
             VALUES (?, ?, ?, ?)",
            params![
                room_type.name.as_str(),
                room_type.description,
                decimal_to_sql(room_type.nightly_rate),
                room_type.max_occupancy,
            ],
        )?;

        Ok(RoomType {
            id: RoomTypeId(conn.last_insert_rowid()),
            name: room_type.name,
            description: room_type.description.clone(),
            nightly_rate: room_type.nightly_rate,
            max_occupancy: room_type.max_occupancy,
        })
    }

    /// Retrieves a room type by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room_type(conn: &Connection, name: RoomTypeName) -> Result<Option<RoomType>> {
        let sql = format!("{ROOM_TYPE_COLUMNS} WHERE name = ?");
        Ok(conn
            .query_row(&sql, params![name.as_str()], |row| row_to_room_type(row, 0))
            .optional()?)
    }

    /// Lists all room types by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_room_types(conn: &Connection) -> Result<Vec<RoomType>> {
        let sql = format!("{ROOM_TYPE_COLUMNS} ORDER BY name");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| row_to_room_type(row, 0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Deletes a room type.
    ///
    /// # Errors
    ///
    /// Returns a persistence error (foreign key violation) while rooms of
    /// this type exist.
    pub fn delete_room_type(conn: &Connection, name: RoomTypeName) -> Result<bool> {
        let rows = conn.execute(
            "DELETE FROM room_types WHERE name = ?",
            params![name.as_str()],
        )?;
        Ok(rows > 0)
    }

    /// Stores a new room in state `available`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the room type does not exist, or
    /// [`Error::AlreadyExists`] if the number is taken.
    pub fn insert_room(conn: &Connection, room: &NewRoom) -> Result<Room> {
        let room_type = Self::get_room_type(conn, room.room_type)?.ok_or_else(|| Error::NotFound {
            resource: format!("room type '{}'", room.room_type),
        })?;
        if Self::get_room_by_number(conn, &room.number)?.is_some() {
            return Err(Error::AlreadyExists {
                resource: format!("room {}", room.number),
            });
        }

        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO rooms (number, room_type_id, state, floor, description, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                room.number,
                room_type.id.0,
                RoomState::Available.as_str(),
                room.floor,
                room.description,
                datetime_to_unix_secs(created_at),
            ],
        )?;

        Ok(Room {
            id: RoomId(conn.last_insert_rowid()),
            number: room.number.clone(),
            room_type,
            state: RoomState::Available,
            floor: room.floor,
            description: room.description.clone(),
            created_at,
        })
    }

    /// Retrieves a room by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room(conn: &Connection, id: RoomId) -> Result<Option<Room>> {
        let sql = format!("{ROOM_COLUMNS} WHERE r.id = ?");
        Ok(conn.query_row(&sql, params![id.0], row_to_room).optional()?)
    }

    /// Retrieves a room by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room_by_number(conn: &Connection, number: &str) -> Result<Option<Room>> {
        let sql = format!("{ROOM_COLUMNS} WHERE r.number = ?");
        Ok(conn
            .query_row(&sql, params![number.trim()], row_to_room)
            .optional()?)
    }

    /// Retrieves a room by number, failing with `NotFound` if it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there is no such room.
    pub fn require_room(conn: &Connection, number: &str) -> Result<Room> {
        Self::get_room_by_number(conn, number)?.ok_or_else(|| Error::NotFound {
            resource: format!("room {}", number.trim()),
        })
    }

    /// Lists all rooms in ascending number order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms(conn: &Connection) -> Result<Vec<Room>> {
        let sql = format!("{ROOM_COLUMNS} ORDER BY r.number");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_room)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Sets a room's state.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_room_state(conn: &Connection, id: RoomId, state: RoomState) -> Result<bool> {
        let rows = conn.execute(
            "UPDATE rooms SET state = ? WHERE id = ?",
            params![state.as_str(), id.0],
        )?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, seed_guest, seed_room};
    use rust_decimal_macros::dec;

    #[test]
    fn test_insert_guest_and_lookup() {
        let db = create_test_database();
        let new = NewGuest::new("ana", "ana@example.com")
            .unwrap()
            .with_full_name("Ana Pérez");
        let stored = Database::insert_guest(db.connection(), &new).unwrap();

        let by_name = Database::get_guest_by_username(db.connection(), "ana")
            .unwrap()
            .unwrap();
        assert_eq!(by_name, stored);
        assert_eq!(
            Database::get_guest(db.connection(), stored.id).unwrap(),
            Some(stored)
        );
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let db = create_test_database();
        seed_guest(&db, "ana", false);
        let err = Database::insert_guest(
            db.connection(),
            &NewGuest::new("ana", "other@example.com").unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::AlreadyExists { .. }));
    }

    #[test]
    fn test_insert_room_type_and_duplicate() {
        let db = create_test_database();
        let new = NewRoomType::new(RoomTypeName::Suite, dec!(95000.00), 2)
            .unwrap()
            .with_description(Some("Ocean view".into()));
        let stored = Database::insert_room_type(db.connection(), &new).unwrap();
        assert_eq!(stored.description.as_deref(), Some("Ocean view"));

        let loaded = Database::get_room_type(db.connection(), RoomTypeName::Suite)
            .unwrap()
            .unwrap();
        assert_eq!(loaded.nightly_rate, dec!(95000.00));

        let err = Database::insert_room_type(db.connection(), &new).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists { .. }));
    }

    #[test]
    fn test_insert_room_requires_type() {
        let db = create_test_database();
        let err = Database::insert_room(
            db.connection(),
            &NewRoom::new("101", RoomTypeName::Family, 1).unwrap(),
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_insert_room_and_duplicate_number() {
        let db = create_test_database();
        let room = seed_room(&db, "101", "double", dec!(55000.00), 2);
        assert_eq!(room.state, RoomState::Available);
        assert_eq!(room.max_occupancy(), 2);

        let err = Database::insert_room(
            db.connection(),
            &NewRoom::new(" 101 ", RoomTypeName::Double, 1).unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::AlreadyExists { .. }));
    }

    #[test]
    fn test_list_rooms_by_number() {
        let db = create_test_database();
        seed_room(&db, "201", "double", dec!(55000.00), 2);
        seed_room(&db, "101", "double", dec!(55000.00), 2);
        seed_room(&db, "102", "single", dec!(35000.00), 1);

        let numbers: Vec<_> = Database::list_rooms(db.connection())
            .unwrap()
            .into_iter()
            .map(|r| r.number)
            .collect();
        assert_eq!(numbers, vec!["101", "102", "201"]);
    }

    #[test]
    fn test_set_room_state() {
        let db = create_test_database();
        let room = seed_room(&db, "101", "double", dec!(55000.00), 2);
        assert!(Database::set_room_state(db.connection(), room.id, RoomState::Maintenance).unwrap());

        let loaded = Database::require_room(db.connection(), "101").unwrap();
        assert_eq!(loaded.state, RoomState::Maintenance);
        assert!(Database::require_room(db.connection(), "999").unwrap_err().is_not_found());
    }

    #[test]
    fn test_room_type_delete_restricted_by_rooms() {
        let db = create_test_database();
        seed_room(&db, "101", "double", dec!(55000.00), 2);

        let result = Database::delete_room_type(db.connection(), RoomTypeName::Double);
        assert!(matches!(result, Err(Error::Persistence(_))));

        Database::insert_room_type(
            db.connection(),
            &NewRoomType::new(RoomTypeName::Suite, dec!(95000.00), 2).unwrap(),
        )
        .unwrap();
        assert!(Database::delete_room_type(db.connection(), RoomTypeName::Suite).unwrap());
        assert_eq!(Database::list_room_types(db.connection()).unwrap().len(), 1);
    }

    #[test]
    fn test_list_guests() {
        let db = create_test_database();
        seed_guest(&db, "zoe", false);
        seed_guest(&db, "ana", true);
        let names: Vec<_> = Database::list_guests(db.connection())
            .unwrap()
            .into_iter()
            .map(|g| g.username)
            .collect();
        assert_eq!(names, vec!["ana", "zoe"]);
    }
}
