//! Reservation removal.

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::guest::Guest;
use crate::reservation::ReservationId;

use super::plan::{OperationPlan, PlanAction};

/// A planned deletion.
///
/// Staff may delete any reservation; a guest may delete their own. The
/// room's state is re-derived afterwards as if the reservation had never
/// existed.
pub struct DeletePlan<'a> {
    id: ReservationId,
    actor: &'a Guest,
    today: NaiveDate,
}

impl<'a> DeletePlan<'a> {
    /// Creates a deletion plan.
    #[must_use]
    pub const fn new(id: ReservationId, actor: &'a Guest, today: NaiveDate) -> Self {
        Self { id, actor, today }
    }

    /// Builds the plan.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the reservation does not exist, `Unauthorized`
    /// if the actor is neither staff nor the holder, or a persistence error.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let reservation = Database::require_reservation(conn, self.id)?;

        if !self.actor.is_staff_or_admin() && reservation.guest_id() != self.actor.id {
            return Err(Error::Unauthorized {
                user: self.actor.username.clone(),
                action: format!("delete reservation {}", reservation.id()),
            });
        }

        let room_id = reservation.room_id();
        let room_number = reservation.room_number().to_string();
        Ok(
            OperationPlan::new(format!("Delete reservation {}", reservation.id()))
                .add_action(PlanAction::DeleteReservation(reservation))
                .add_action(PlanAction::DeriveRoomState {
                    room_id,
                    room_number,
                    today: self.today,
                }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RoomState;
    use crate::database::test_util::{create_test_database, date, new_reservation, seed_guest, seed_room};
    use crate::operations::PlanExecutor;
    use crate::reservation::ReservationStatus;
    use rust_decimal_macros::dec;

    #[test]
    fn test_owner_and_staff_may_delete() {
        let db = create_test_database();
        let owner = seed_guest(&db, "ana", false);
        let staff = seed_guest(&db, "desk", true);
        let room = seed_room(&db, "101", "double", dec!(100.00), 2);
        let today = date(2025, 3, 1);

        let first = Database::insert_reservation(
            db.connection(),
            &new_reservation(&owner, &room, date(2025, 3, 2), date(2025, 3, 3)),
        )
        .unwrap();
        let second = Database::insert_reservation(
            db.connection(),
            &new_reservation(&owner, &room, date(2025, 3, 5), date(2025, 3, 6)),
        )
        .unwrap();

        assert!(DeletePlan::new(first.id(), &owner, today)
            .build_plan(db.connection())
            .is_ok());
        assert!(DeletePlan::new(second.id(), &staff, today)
            .build_plan(db.connection())
            .is_ok());
    }

    #[test]
    fn test_other_guest_cannot_delete() {
        let db = create_test_database();
        let owner = seed_guest(&db, "ana", false);
        let other = seed_guest(&db, "bo", false);
        let room = seed_room(&db, "101", "double", dec!(100.00), 2);

        let stored = Database::insert_reservation(
            db.connection(),
            &new_reservation(&owner, &room, date(2025, 3, 2), date(2025, 3, 3)),
        )
        .unwrap();

        let err = DeletePlan::new(stored.id(), &other, date(2025, 3, 1))
            .build_plan(db.connection())
            .unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_deleting_sole_reservation_frees_room() {
        let db = create_test_database();
        let owner = seed_guest(&db, "ana", false);
        let room = seed_room(&db, "101", "double", dec!(100.00), 2);
        let today = date(2025, 3, 1);

        let mut new = new_reservation(&owner, &room, today, date(2025, 3, 3));
        new.status = ReservationStatus::Confirmed;
        let stored = Database::insert_reservation(db.connection(), &new).unwrap();
        Database::set_room_state(db.connection(), room.id, RoomState::Occupied).unwrap();

        let plan = DeletePlan::new(stored.id(), &owner, today)
            .build_plan(db.connection())
            .unwrap();
        let result = PlanExecutor::new(db.connection()).execute(&plan).unwrap();

        assert_eq!(result.deleted.len(), 1);
        let room = Database::get_room(db.connection(), room.id).unwrap().unwrap();
        assert_eq!(room.state, RoomState::Available);
    }

    #[test]
    fn test_missing_reservation() {
        let db = create_test_database();
        let staff = seed_guest(&db, "desk", true);
        let err = DeletePlan::new(ReservationId(1), &staff, date(2025, 3, 1))
            .build_plan(db.connection())
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
