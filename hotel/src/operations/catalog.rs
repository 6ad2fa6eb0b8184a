//! Catalog and identity edits.
//!
//! Room types and rooms are staff-maintained reference data. Guests are
//! registered by anyone. A manual room state change is the only way a room
//! enters or leaves `maintenance`.

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::catalog::{NewRoom, NewRoomType, RoomState};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::guest::{Guest, NewGuest};

use super::plan::{OperationPlan, PlanAction};

/// Planners for catalog edits.
pub struct CatalogOperations;

impl CatalogOperations {
    /// Plans adding a room type.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for non-staff actors and `AlreadyExists` if a
    /// type with the same name is stored.
    pub fn plan_add_room_type(
        conn: &Connection,
        actor: &Guest,
        room_type: NewRoomType,
    ) -> Result<OperationPlan> {
        actor.require_staff("add room types")?;
        if Database::get_room_type(conn, room_type.name)?.is_some() {
            return Err(Error::AlreadyExists {
                resource: format!("room type {}", room_type.name),
            });
        }
        Ok(OperationPlan::new(format!("Add room type {}", room_type.name))
            .add_action(PlanAction::CreateRoomType(room_type)))
    }

    /// Plans adding a room.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for non-staff actors, `NotFound` if the room
    /// type is not stored, and `AlreadyExists` for a taken room number.
    pub fn plan_add_room(conn: &Connection, actor: &Guest, room: NewRoom) -> Result<OperationPlan> {
        actor.require_staff("add rooms")?;
        if Database::get_room_type(conn, room.room_type)?.is_none() {
            return Err(Error::NotFound {
                resource: format!("room type {}", room.room_type),
            });
        }
        if Database::get_room_by_number(conn, &room.number)?.is_some() {
            return Err(Error::AlreadyExists {
                resource: format!("room {}", room.number),
            });
        }
        Ok(OperationPlan::new(format!("Add room {}", room.number))
            .add_action(PlanAction::CreateRoom(room)))
    }

    /// Plans registering a guest identity.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if the username is taken.
    pub fn plan_register_guest(conn: &Connection, guest: NewGuest) -> Result<OperationPlan> {
        if Database::get_guest_by_username(conn, &guest.username)?.is_some() {
            return Err(Error::AlreadyExists {
                resource: format!("guest {}", guest.username),
            });
        }
        Ok(OperationPlan::new(format!("Register guest {}", guest.username))
            .add_action(PlanAction::CreateGuest(guest)))
    }

    /// Plans a manual room state change.
    ///
    /// Setting a room `available` while it still has active reservations
    /// ending today or later goes through, with a warning carrying their
    /// count.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for non-staff actors and `NotFound` for an
    /// unknown room.
    pub fn plan_room_state(
        conn: &Connection,
        actor: &Guest,
        number: &str,
        state: RoomState,
        today: NaiveDate,
    ) -> Result<OperationPlan> {
        actor.require_staff("change room state")?;
        let room = Database::require_room(conn, number)?;

        let mut plan = OperationPlan::new(format!("Set room {} {state}", room.number));
        if state == RoomState::Available {
            let active = Database::count_active_from(conn, room.id, today)?;
            if active > 0 {
                plan = plan.add_warning(format!(
                    "room {} still has {active} active reservation(s) ending on or after {today}",
                    room.number
                ));
            }
        }

        Ok(plan.add_action(PlanAction::SetRoomState {
            room_id: room.id,
            room_number: room.number,
            from: room.state,
            to: state,
        }))
    }
}
