//! Plan execution engine.
//!
//! This module implements the executor that takes operation plans
//! and applies them to the database.

use rusqlite::Connection;

use crate::catalog::{Room, RoomType};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::guest::Guest;
use crate::reservation::{Reservation, ReservationStatus};

use super::derive::{derive_room_state, RoomStateChange};
use super::plan::{OperationPlan, PlanAction};

const DRY_RUN_SAVEPOINT: &str = "SAVEPOINT dry_run";
const DRY_RUN_ROLLBACK: &str = "ROLLBACK TO dry_run; RELEASE dry_run";

/// Result of executing a plan.
///
/// This struct provides information about what happened during execution,
/// including whether it was a dry run and what records the actions produced.
/// In a dry run the records are the ones that would have been written.
#[derive(Debug, Clone, Default)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// Reservations created, updated or completed, in action order.
    pub reservations: Vec<Reservation>,

    /// Reservations removed.
    pub deleted: Vec<Reservation>,

    /// Reservations that entered `confirmed` during this execution.
    pub newly_confirmed: Vec<Reservation>,

    /// Room state changes, derived or manual.
    pub room_changes: Vec<RoomStateChange>,

    /// Room type added, if any.
    pub room_type: Option<RoomType>,

    /// Room added, if any.
    pub room: Option<Room>,

    /// Guest registered, if any.
    pub guest: Option<Guest>,
}

impl ExecutionResult {
    fn for_plan(plan: &OperationPlan) -> Self {
        Self {
            success: true,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            ..Self::default()
        }
    }

    /// The first reservation the plan wrote, if any.
    #[must_use]
    pub fn reservation(&self) -> Option<&Reservation> {
        self.reservations.first()
    }
}

/// Executes operation plans against a connection.
///
/// The executor never opens a transaction of its own; callers run it inside
/// [`Database::with_immediate_transaction`] so the checks made while
/// planning and the writes made here share one write lock. In dry-run mode
/// the actions are applied inside a savepoint that is rolled back before
/// returning, so the result reports real ids and derived states without
/// leaving anything behind.
///
/// # Examples
///
/// ```no_run
/// use hotel::database::{Database, DatabaseConfig};
/// use hotel::operations::{OperationPlan, PlanExecutor};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/hotel.db")).unwrap();
/// let plan = OperationPlan::new("Nothing to do");
///
/// let result = db
///     .with_immediate_transaction(false, |tx| PlanExecutor::new(tx).execute(&plan))
///     .unwrap();
/// assert!(result.success);
/// ```
pub struct PlanExecutor<'a> {
    conn: &'a Connection,
    dry_run: bool,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            dry_run: false,
        }
    }

    /// Sets the executor to dry-run mode.
    ///
    /// In dry-run mode, the executor applies and then rolls back every
    /// action, so nothing is visible after [`execute`](Self::execute)
    /// returns.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// # Errors
    ///
    /// Returns an error if any action fails to execute. Actions already
    /// applied are left for the enclosing transaction to roll back.
    pub fn execute(&self, plan: &OperationPlan) -> Result<ExecutionResult> {
        if !self.dry_run {
            return self.apply(plan);
        }

        self.conn.execute_batch(DRY_RUN_SAVEPOINT)?;
        let outcome = self.apply(plan);
        self.conn.execute_batch(DRY_RUN_ROLLBACK)?;

        let mut result = outcome?;
        result.dry_run = true;
        Ok(result)
    }

    fn apply(&self, plan: &OperationPlan) -> Result<ExecutionResult> {
        let mut result = ExecutionResult::for_plan(plan);
        for action in &plan.actions {
            log::debug!("{}", action.description());
            self.execute_action(action, &mut result)?;
        }
        Ok(result)
    }

    fn execute_action(&self, action: &PlanAction, result: &mut ExecutionResult) -> Result<()> {
        match action {
            PlanAction::CreateReservation(new) => {
                let created = Database::insert_reservation(self.conn, new)?;
                log::info!(
                    "created reservation {} on room {} for {}",
                    created.id(),
                    created.room_number(),
                    created.stay()
                );
                if created.status() == ReservationStatus::Confirmed {
                    result.newly_confirmed.push(created.clone());
                }
                result.reservations.push(created);
            }
            PlanAction::UpdateReservation { before, after } => {
                if !Database::update_reservation(self.conn, after)? {
                    return Err(Error::NotFound {
                        resource: format!("reservation {}", after.id()),
                    });
                }
                log::info!("updated reservation {}", after.id());
                if before.status() != ReservationStatus::Confirmed
                    && after.status() == ReservationStatus::Confirmed
                {
                    result.newly_confirmed.push(after.clone());
                }
                result.reservations.push(after.clone());
            }
            PlanAction::CompleteReservation(reservation) => {
                Database::set_reservation_status(
                    self.conn,
                    reservation.id(),
                    ReservationStatus::Completed,
                )?;
                log::info!("completed reservation {}", reservation.id());
                let completed = reservation
                    .to_builder()
                    .status(ReservationStatus::Completed)
                    .build()?;
                result.reservations.push(completed);
            }
            PlanAction::DeleteReservation(reservation) => {
                if !Database::delete_reservation(self.conn, reservation.id())? {
                    return Err(Error::NotFound {
                        resource: format!("reservation {}", reservation.id()),
                    });
                }
                log::info!("deleted reservation {}", reservation.id());
                result.deleted.push(reservation.clone());
            }
            PlanAction::DeriveRoomState { room_id, today, .. } => {
                if let Some(change) = derive_room_state(self.conn, *room_id, *today)? {
                    result.room_changes.push(change);
                }
            }
            PlanAction::SetRoomState {
                room_id,
                room_number,
                from,
                to,
            } => {
                Database::set_room_state(self.conn, *room_id, *to)?;
                log::info!("room {room_number} set to {to} (was {from})");
                if from != to {
                    result.room_changes.push(RoomStateChange {
                        room_id: *room_id,
                        room_number: room_number.clone(),
                        from: *from,
                        to: *to,
                    });
                }
            }
            PlanAction::CreateRoomType(new) => {
                result.room_type = Some(Database::insert_room_type(self.conn, new)?);
            }
            PlanAction::CreateRoom(new) => {
                result.room = Some(Database::insert_room(self.conn, new)?);
            }
            PlanAction::CreateGuest(new) => {
                result.guest = Some(Database::insert_guest(self.conn, new)?);
            }
        }
        Ok(())
    }
}
