//! Reservation edits and status changes.
//!
//! Editing a reservation re-runs the booking checks that still make sense
//! for an existing record (the range, the party size, the capacity and, for
//! an active result, the overlap) but not the past-date check, so staff can
//! fix up a stay that has already begun. The room state is re-derived for
//! the old room and, when the reservation moves, for the new one.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::catalog::non_blank;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::guest::Guest;
use crate::reservation::{
    ReservationId, ReservationStatus, StayRange, TransitionCheck, TransitionPolicy,
};

use super::plan::{OperationPlan, PlanAction};
use super::rules::{check_capacity, check_guest_count, check_no_overlap, check_room_bookable};

/// Fields to change on a reservation. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationChanges {
    /// New first night.
    pub check_in: Option<NaiveDate>,
    /// New departure day.
    pub check_out: Option<NaiveDate>,
    /// Number of the room to move to.
    pub room: Option<String>,
    /// New party size.
    pub guest_count: Option<u32>,
    /// New status.
    pub status: Option<ReservationStatus>,
    /// Explicit total price; non-positive values are ignored.
    pub total_price: Option<Decimal>,
    /// New comments; blank text clears them.
    pub comments: Option<String>,
}

impl ReservationChanges {
    /// Changes only the status.
    ///
    /// # Examples
    ///
    /// ```
    /// use hotel::operations::ReservationChanges;
    /// use hotel::ReservationStatus;
    ///
    /// let changes = ReservationChanges::status(ReservationStatus::Cancelled);
    /// assert_eq!(changes.status, Some(ReservationStatus::Cancelled));
    /// assert!(changes.room.is_none());
    /// ```
    #[must_use]
    pub fn status(status: ReservationStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Whether nothing would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A planned edit of one reservation.
pub struct UpdatePlan<'a> {
    id: ReservationId,
    changes: ReservationChanges,
    actor: &'a Guest,
    policy: TransitionPolicy,
    today: NaiveDate,
}

impl<'a> UpdatePlan<'a> {
    /// Creates an update plan.
    #[must_use]
    pub const fn new(
        id: ReservationId,
        changes: ReservationChanges,
        actor: &'a Guest,
        policy: TransitionPolicy,
        today: NaiveDate,
    ) -> Self {
        Self {
            id,
            changes,
            actor,
            policy,
            today,
        }
    }

    /// Builds the plan.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for non-staff actors, `NotFound` for a missing
    /// reservation or room, `InvalidStatusTransition` under the strict
    /// policy, the first failing booking check, or a persistence error.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        self.actor.require_staff("change reservations")?;

        let before = Database::require_reservation(conn, self.id)?;
        let changes = &self.changes;

        let stay = StayRange::new(
            changes.check_in.unwrap_or_else(|| before.check_in()),
            changes.check_out.unwrap_or_else(|| before.check_out()),
        )?;
        let guest_count = changes.guest_count.unwrap_or_else(|| before.guest_count());
        check_guest_count(guest_count)?;

        let room = match &changes.room {
            Some(number) => Database::require_room(conn, number)?,
            None => Database::get_room(conn, before.room_id())?.ok_or_else(|| Error::NotFound {
                resource: format!("room {}", before.room_number()),
            })?,
        };
        check_capacity(&room, guest_count)?;

        let status = changes.status.unwrap_or_else(|| before.status());
        let transition = self.policy.check(before.status(), status)?;

        let moved = room.id != before.room_id();
        if status.is_active() {
            if moved {
                check_room_bookable(&room, &stay)?;
            }
            check_no_overlap(conn, &room, &stay, Some(before.id()))?;
        }

        let total_price = match changes.total_price.filter(|p| *p > Decimal::ZERO) {
            Some(price) => price,
            None if moved || stay != before.stay() => stay.price(room.nightly_rate())?,
            None => before.total_price(),
        };
        let comments = match &changes.comments {
            Some(text) => non_blank(Some(text.clone())),
            None => before.comments().map(str::to_string),
        };

        let after = before
            .to_builder()
            .room(room.id, room.number.clone())
            .stay(stay)
            .guest_count(guest_count)
            .status(status)
            .total_price(total_price)
            .comments(comments)
            .build()?;

        let mut plan = OperationPlan::new(format!("Update reservation {}", before.id()));
        if transition == TransitionCheck::Override {
            let warning = format!(
                "reservation {} moved {} -> {} outside the usual lifecycle",
                before.id(),
                before.status(),
                status
            );
            log::warn!("{warning}");
            plan = plan.add_warning(warning);
        }

        let old_room = (before.room_id(), before.room_number().to_string());
        plan = plan.add_action(PlanAction::UpdateReservation { before, after });
        plan = plan.add_action(PlanAction::DeriveRoomState {
            room_id: old_room.0,
            room_number: old_room.1,
            today: self.today,
        });
        if moved {
            plan = plan.add_action(PlanAction::DeriveRoomState {
                room_id: room.id,
                room_number: room.number,
                today: self.today,
            });
        }
        Ok(plan)
    }
}
