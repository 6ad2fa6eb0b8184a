//! Lazy completion sweep.
//!
//! Stays are not completed by a scheduler. Instead, before a listing is
//! served (or when asked explicitly), every confirmed reservation whose
//! check-out is before today is marked `completed` and the state of each
//! affected room is re-derived.
//!
//! ## Transactional Semantics
//!
//! The whole sweep runs inside one immediate transaction: either every
//! completable reservation is completed and every affected room re-derived,
//! or nothing changes.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

use crate::database::Database;
use crate::error::Result;
use crate::reservation::Reservation;

use super::derive::RoomStateChange;
use super::executor::PlanExecutor;
use super::plan::{OperationPlan, PlanAction};

/// Result of a sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepResult {
    /// Reservations that were (or would be, in dry-run mode) completed.
    pub completed: Vec<Reservation>,
    /// Rooms whose state changed as a consequence.
    pub room_changes: Vec<RoomStateChange>,
    /// Whether nothing was written.
    pub dry_run: bool,
}

impl SweepResult {
    /// Whether the sweep had nothing to do.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty() && self.room_changes.is_empty()
    }
}

/// Completion sweep operations.
///
/// All operations are static methods, like the database layer.
pub struct SweepOperations;

impl SweepOperations {
    /// Plans the sweep as of `today`: one completion per finished stay,
    /// then one derivation per affected room.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn plan(conn: &Connection, today: NaiveDate) -> Result<OperationPlan> {
        let completable = Database::find_completable(conn, today)?;

        let mut rooms = BTreeMap::new();
        for reservation in &completable {
            rooms
                .entry(reservation.room_id())
                .or_insert_with(|| reservation.room_number().to_string());
        }

        let mut plan = OperationPlan::new(format!("Complete stays ended before {today}"));
        for reservation in completable {
            plan = plan.add_action(PlanAction::CompleteReservation(reservation));
        }
        for (room_id, room_number) in rooms {
            plan = plan.add_action(PlanAction::DeriveRoomState {
                room_id,
                room_number,
                today,
            });
        }
        Ok(plan)
    }

    /// Runs the sweep on an open transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if a query or write fails.
    pub fn run(conn: &Connection, today: NaiveDate) -> Result<SweepResult> {
        let plan = Self::plan(conn, today)?;
        if plan.is_empty() {
            return Ok(SweepResult::default());
        }

        let result = PlanExecutor::new(conn).execute(&plan)?;
        log::info!(
            "sweep completed {} reservation(s), {} room(s) changed state",
            result.reservations.len(),
            result.room_changes.len()
        );
        Ok(SweepResult {
            completed: result.reservations,
            room_changes: result.room_changes,
            dry_run: false,
        })
    }

    /// Completes every confirmed reservation that checked out before `today`.
    ///
    /// # Arguments
    ///
    /// * `db` - Database to operate on
    /// * `today` - The day the sweep is evaluated for
    /// * `dry_run` - If true, report what would change without changing it
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started or any write
    /// fails, in which case nothing is changed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use chrono::NaiveDate;
    /// use hotel::database::{Database, DatabaseConfig};
    /// use hotel::operations::SweepOperations;
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/hotel.db")).unwrap();
    /// let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    ///
    /// let preview = SweepOperations::sweep_completed(&mut db, today, true).unwrap();
    /// println!("Would complete {} reservations", preview.completed.len());
    /// ```
    pub fn sweep_completed(
        db: &mut Database,
        today: NaiveDate,
        dry_run: bool,
    ) -> Result<SweepResult> {
        let mut result = db.with_immediate_transaction(dry_run, |tx| Self::run(tx, today))?;
        result.dry_run = dry_run;
        Ok(result)
    }
}
