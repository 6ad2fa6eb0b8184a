//! Plan types for booking operations.
//!
//! This module defines the plan structures that describe what actions
//! will be taken during an operation, without actually performing them.

use chrono::NaiveDate;

use crate::catalog::{NewRoom, NewRoomType, RoomId, RoomState};
use crate::guest::NewGuest;
use crate::reservation::{NewReservation, Reservation};

/// A single action to be taken during plan execution.
///
/// Each action corresponds to one write performed by the executor.
/// `DeriveRoomState` always follows the reservation write it depends on, so
/// the derivation sees the reservation set as it will be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Store a new reservation.
    CreateReservation(NewReservation),

    /// Replace a stored reservation with an edited copy.
    UpdateReservation {
        /// The record as currently stored.
        before: Reservation,
        /// The record to store.
        after: Reservation,
    },

    /// Mark a confirmed reservation whose stay is over as completed.
    CompleteReservation(Reservation),

    /// Remove a reservation.
    DeleteReservation(Reservation),

    /// Recompute a room's occupancy state from its active reservations.
    DeriveRoomState {
        /// Room to recompute.
        room_id: RoomId,
        /// Room number, for messages.
        room_number: String,
        /// The day the derivation is evaluated for.
        today: NaiveDate,
    },

    /// Manually set a room's state.
    SetRoomState {
        /// Room to change.
        room_id: RoomId,
        /// Room number, for messages.
        room_number: String,
        /// Current state.
        from: RoomState,
        /// Requested state.
        to: RoomState,
    },

    /// Add a room type to the catalog.
    CreateRoomType(NewRoomType),

    /// Add a room to the catalog.
    CreateRoom(NewRoom),

    /// Store a guest identity record.
    CreateGuest(NewGuest),
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::CreateReservation(new) => format!(
                "Create {} reservation on room {} for {} ({} guest(s), total {})",
                new.status, new.room_number, new.stay, new.guest_count, new.total_price
            ),
            Self::UpdateReservation { before, after } => {
                let mut changes = Vec::new();
                if before.room_id() != after.room_id() {
                    changes.push(format!(
                        "room {} -> {}",
                        before.room_number(),
                        after.room_number()
                    ));
                }
                if before.stay() != after.stay() {
                    changes.push(format!("dates {} -> {}", before.stay(), after.stay()));
                }
                if before.guest_count() != after.guest_count() {
                    changes.push(format!(
                        "guests {} -> {}",
                        before.guest_count(),
                        after.guest_count()
                    ));
                }
                if before.status() != after.status() {
                    changes.push(format!("status {} -> {}", before.status(), after.status()));
                }
                if before.total_price() != after.total_price() {
                    changes.push(format!(
                        "total {} -> {}",
                        before.total_price(),
                        after.total_price()
                    ));
                }
                if before.comments() != after.comments() {
                    changes.push("comments".to_string());
                }
                if changes.is_empty() {
                    format!("Re-save reservation {} unchanged", before.id())
                } else {
                    format!("Update reservation {}: {}", before.id(), changes.join(", "))
                }
            }
            Self::CompleteReservation(r) => format!(
                "Complete reservation {} on room {} (checked out {})",
                r.id(),
                r.room_number(),
                r.check_out()
            ),
            Self::DeleteReservation(r) => format!(
                "Delete reservation {} on room {} for {}",
                r.id(),
                r.room_number(),
                r.stay()
            ),
            Self::DeriveRoomState {
                room_number, today, ..
            } => format!("Derive state of room {room_number} as of {today}"),
            Self::SetRoomState {
                room_number,
                from,
                to,
                ..
            } => format!("Set room {room_number} state {from} -> {to}"),
            Self::CreateRoomType(t) => format!(
                "Add room type {} (rate {}, up to {} guest(s))",
                t.name, t.nightly_rate, t.max_occupancy
            ),
            Self::CreateRoom(r) => format!(
                "Add room {} ({}) on floor {}",
                r.number, r.room_type, r.floor
            ),
            Self::CreateGuest(g) => format!("Register guest {} <{}>", g.username, g.email),
        }
    }
}

/// A complete operation plan describing all actions to be taken.
///
/// Plans are generated during the planning phase and can be inspected,
/// logged, or executed. They include a description, a sequence of actions,
/// and any warnings that should be communicated to the user.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates a new operation plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use hotel::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Book room 101");
    /// assert_eq!(plan.description, "Book room 101");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use hotel::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Test")
    ///     .add_warning("This is a warning");
    ///
    /// assert_eq!(plan.warnings.len(), 1);
    /// ```
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}
