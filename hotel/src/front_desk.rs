//! The booking core's entry point.
//!
//! [`FrontDesk`] owns the database connection, the merged configuration and
//! the confirmation notifier. Every mutation it offers runs plan and
//! execution inside one `BEGIN IMMEDIATE` transaction; confirmation notices
//! are collected inside that transaction and delivered only after it
//! commits.

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::catalog::{NewRoom, NewRoomType, Room, RoomState};
use crate::config::Config;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::guest::{Guest, NewGuest};
use crate::notify::{deliver, notifier_from_config, ConfirmationNotice, Notifier};
use crate::operations::{
    self, BookingOptions, BookingPlan, CatalogOperations, DeletePlan, ExecutionResult,
    OperationPlan, PlanExecutor, ReservationChanges, ReservationFilter, RoomDetails, RoomFilter,
    RoomSummary, SweepOperations, SweepResult, UpdatePlan,
};
use crate::reservation::{Reservation, ReservationId, ReservationStatus};

/// Hotel booking facade.
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use hotel::config::ConfigBuilder;
/// use hotel::database::{Database, DatabaseConfig};
/// use hotel::operations::BookingOptions;
/// use hotel::FrontDesk;
///
/// let config = ConfigBuilder::new().build().unwrap();
/// let db = Database::open(DatabaseConfig::new("/tmp/hotel.db")).unwrap();
/// let mut desk = FrontDesk::new(db, config);
///
/// let guest = desk.guest("ana").unwrap();
/// let options = BookingOptions::new(
///     "101",
///     NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
///     2,
/// );
/// let result = desk.create_reservation(&guest, options).unwrap();
/// println!("{}", result.reservation().unwrap());
/// ```
pub struct FrontDesk {
    db: Database,
    config: Config,
    notifier: Box<dyn Notifier>,
    today: Option<NaiveDate>,
}

impl FrontDesk {
    /// Creates a front desk using the notifier `config` selects.
    #[must_use]
    pub fn new(db: Database, config: Config) -> Self {
        let notifier = notifier_from_config(&config);
        Self {
            db,
            config,
            notifier,
            today: None,
        }
    }

    /// Replaces the notifier.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Pins the day every rule is evaluated against.
    #[must_use]
    pub const fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The day rules are evaluated against: the pinned day, or the local
    /// calendar date.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// The underlying database.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    /// The merged configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Looks up a guest identity by username.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown username.
    pub fn guest(&self, username: &str) -> Result<Guest> {
        Database::get_guest_by_username(self.db.connection(), username)?.ok_or_else(|| {
            Error::NotFound {
                resource: format!("guest {username}"),
            }
        })
    }

    /// Looks up a room by number.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown room.
    pub fn room(&self, number: &str) -> Result<Room> {
        Database::require_room(self.db.connection(), number)
    }

    /// Registers a guest identity.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` for a taken username.
    pub fn register_guest(&mut self, guest: NewGuest, dry_run: bool) -> Result<ExecutionResult> {
        self.run(dry_run, |conn, _| {
            CatalogOperations::plan_register_guest(conn, guest)
        })
    }

    /// Adds a room type (staff only).
    ///
    /// # Errors
    ///
    /// See [`CatalogOperations::plan_add_room_type`].
    pub fn add_room_type(
        &mut self,
        actor: &Guest,
        room_type: NewRoomType,
        dry_run: bool,
    ) -> Result<ExecutionResult> {
        self.run(dry_run, |conn, _| {
            CatalogOperations::plan_add_room_type(conn, actor, room_type)
        })
    }

    /// Adds a room (staff only).
    ///
    /// # Errors
    ///
    /// See [`CatalogOperations::plan_add_room`].
    pub fn add_room(&mut self, actor: &Guest, room: NewRoom, dry_run: bool) -> Result<ExecutionResult> {
        self.run(dry_run, |conn, _| CatalogOperations::plan_add_room(conn, actor, room))
    }

    /// Manually sets a room's state (staff only).
    ///
    /// # Errors
    ///
    /// See [`CatalogOperations::plan_room_state`].
    pub fn change_room_state(
        &mut self,
        actor: &Guest,
        number: &str,
        state: RoomState,
        dry_run: bool,
    ) -> Result<ExecutionResult> {
        self.run(dry_run, |conn, today| {
            CatalogOperations::plan_room_state(conn, actor, number, state, today)
        })
    }

    /// Whether room `number` can be booked, optionally for a date range.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown room or a persistence error.
    pub fn is_available(
        &self,
        number: &str,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
    ) -> Result<bool> {
        let room = self.room(number)?;
        operations::is_available(self.db.connection(), &room, check_in, check_out, self.today())
    }

    /// The next active reservations on room `number`; `limit` defaults to
    /// the configured `upcoming_limit`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown room or a persistence error.
    pub fn next_reservations(&self, number: &str, limit: Option<usize>) -> Result<Vec<Reservation>> {
        let room = self.room(number)?;
        let limit = limit.unwrap_or_else(|| self.config.upcoming_limit());
        operations::next_reservations(self.db.connection(), &room, self.today(), limit)
    }

    /// The confirmed stay in room `number` covering today.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown room or a persistence error.
    pub fn current_reservation(&self, number: &str) -> Result<Option<Reservation>> {
        let room = self.room(number)?;
        operations::current_reservation(self.db.connection(), &room, self.today())
    }

    /// Room `number` with its current and upcoming reservations.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown room or a persistence error.
    pub fn room_details(&mut self, number: &str, limit: Option<usize>) -> Result<RoomDetails> {
        self.autosweep()?;
        let limit = limit.unwrap_or_else(|| self.config.upcoming_limit());
        operations::room_details(self.db.connection(), number, self.today(), limit)
    }

    /// Books a room.
    ///
    /// # Errors
    ///
    /// Returns the first failing booking check; see [`BookingPlan`].
    pub fn create_reservation(
        &mut self,
        actor: &Guest,
        options: BookingOptions,
    ) -> Result<ExecutionResult> {
        let dry_run = options.dry_run;
        self.run(dry_run, |conn, today| {
            BookingPlan::new(options, actor, today).build_plan(conn)
        })
    }

    /// Edits a reservation (staff only).
    ///
    /// # Errors
    ///
    /// See [`UpdatePlan::build_plan`].
    pub fn update_reservation(
        &mut self,
        actor: &Guest,
        id: ReservationId,
        changes: ReservationChanges,
        dry_run: bool,
    ) -> Result<ExecutionResult> {
        let policy = self.config.transition_policy();
        self.run(dry_run, |conn, today| {
            UpdatePlan::new(id, changes, actor, policy, today).build_plan(conn)
        })
    }

    /// Sets a reservation's status (staff only).
    ///
    /// # Errors
    ///
    /// See [`UpdatePlan::build_plan`].
    pub fn change_reservation_status(
        &mut self,
        actor: &Guest,
        id: ReservationId,
        status: ReservationStatus,
        dry_run: bool,
    ) -> Result<ExecutionResult> {
        self.update_reservation(actor, id, ReservationChanges::status(status), dry_run)
    }

    /// Cancels a reservation (staff only).
    ///
    /// # Errors
    ///
    /// See [`UpdatePlan::build_plan`].
    pub fn cancel_reservation(
        &mut self,
        actor: &Guest,
        id: ReservationId,
        dry_run: bool,
    ) -> Result<ExecutionResult> {
        self.change_reservation_status(actor, id, ReservationStatus::Cancelled, dry_run)
    }

    /// Deletes a reservation (staff or its holder).
    ///
    /// # Errors
    ///
    /// See [`DeletePlan::build_plan`].
    pub fn delete_reservation(
        &mut self,
        actor: &Guest,
        id: ReservationId,
        dry_run: bool,
    ) -> Result<ExecutionResult> {
        self.run(dry_run, |conn, today| {
            DeletePlan::new(id, actor, today).build_plan(conn)
        })
    }

    /// Completes every confirmed stay that ended before today.
    ///
    /// # Errors
    ///
    /// Returns an error if the sweep fails; nothing is changed then.
    pub fn sweep_completed(&mut self, dry_run: bool) -> Result<SweepResult> {
        let today = self.today();
        SweepOperations::sweep_completed(&mut self.db, today, dry_run)
    }

    /// Lists rooms, running the completion sweep first unless disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the sweep or a query fails.
    pub fn list_rooms(&mut self, filter: &RoomFilter) -> Result<Vec<RoomSummary>> {
        self.autosweep()?;
        operations::list_rooms(self.db.connection(), filter, self.today())
    }

    /// Lists reservations visible to `actor`, running the completion sweep
    /// first unless disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the sweep or the query fails.
    pub fn list_reservations(
        &mut self,
        actor: &Guest,
        filter: &ReservationFilter,
    ) -> Result<Vec<Reservation>> {
        self.autosweep()?;
        operations::list_reservations(self.db.connection(), actor, filter)
    }

    fn autosweep(&mut self) -> Result<()> {
        if self.config.autosweep_disabled() {
            return Ok(());
        }
        let swept = self.sweep_completed(false)?;
        if !swept.is_empty() {
            log::debug!("autosweep completed {} reservation(s)", swept.completed.len());
        }
        Ok(())
    }

    /// Plans and executes inside one immediate transaction, then delivers
    /// confirmation notices once the transaction has committed.
    fn run<F>(&mut self, dry_run: bool, plan: F) -> Result<ExecutionResult>
    where
        F: FnOnce(&Connection, NaiveDate) -> Result<OperationPlan>,
    {
        let today = self.today();
        let (result, notices) = self.db.with_immediate_transaction(dry_run, |tx| {
            let conn: &Connection = tx;
            let plan = plan(conn, today)?;
            log::debug!("{} ({} action(s))", plan.description, plan.len());

            let executor = PlanExecutor::new(conn);
            let executor = if dry_run { executor.dry_run() } else { executor };
            let result = executor.execute(&plan)?;

            let notices = confirmation_notices(conn, &result.newly_confirmed)?;
            Ok((result, notices))
        })?;

        if !dry_run {
            for notice in &notices {
                deliver(self.notifier.as_ref(), notice);
            }
        }
        Ok(result)
    }
}

fn confirmation_notices(
    conn: &Connection,
    confirmed: &[Reservation],
) -> Result<Vec<ConfirmationNotice>> {
    let mut notices = Vec::with_capacity(confirmed.len());
    for reservation in confirmed {
        match Database::get_guest(conn, reservation.guest_id())? {
            Some(guest) => notices.push(ConfirmationNotice::new(&guest, reservation)),
            None => log::warn!(
                "no guest record for reservation {}, confirmation not sent",
                reservation.id()
            ),
        }
    }
    Ok(notices)
}
