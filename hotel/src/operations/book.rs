//! Booking plan.
//!
//! A booking is validated in a fixed order and the first failing step wins:
//!
//! 1. the stay range (`check_in < check_out`);
//! 2. the check-in is not in the past;
//! 3. at least one guest;
//! 4. the room exists and its type holds the party;
//! 5. the room is `available` and no active reservation on it
//!    shares a night with the stay.
//!
//! The plan stores the reservation and then re-derives the room's state.

use chrono::{NaiveDate, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::catalog::non_blank;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::guest::Guest;
use crate::reservation::{NewReservation, ReservationStatus, StayRange};

use super::plan::{OperationPlan, PlanAction};
use super::rules::{check_capacity, check_guest_count, check_not_in_past, check_room_free};

/// Options for a booking.
#[derive(Debug, Clone)]
pub struct BookingOptions {
    /// Number of the room to book.
    pub room: String,

    /// First night.
    pub check_in: NaiveDate,

    /// Departure day.
    pub check_out: NaiveDate,

    /// Size of the party.
    pub guest_count: u32,

    /// Free-form request from the guest.
    pub comments: Option<String>,

    /// Initial status (staff only when not `pending`).
    pub status: ReservationStatus,

    /// Explicit total price (staff only). Non-positive values are ignored.
    pub total_price: Option<Decimal>,

    /// Book on behalf of this username (staff only).
    pub for_guest: Option<String>,

    /// Validate and report without writing.
    pub dry_run: bool,
}

impl BookingOptions {
    /// Creates options for a pending booking with no extras.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use hotel::operations::BookingOptions;
    /// use hotel::ReservationStatus;
    ///
    /// let options = BookingOptions::new(
    ///     "101",
    ///     NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
    ///     2,
    /// );
    /// assert_eq!(options.status, ReservationStatus::Pending);
    /// assert!(!options.dry_run);
    /// ```
    #[must_use]
    pub fn new(
        room: impl Into<String>,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guest_count: u32,
    ) -> Self {
        Self {
            room: room.into(),
            check_in,
            check_out,
            guest_count,
            comments: None,
            status: ReservationStatus::Pending,
            total_price: None,
            for_guest: None,
            dry_run: false,
        }
    }

    /// Sets the comments.
    #[must_use]
    pub fn with_comments(mut self, comments: Option<String>) -> Self {
        self.comments = non_blank(comments);
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets an explicit total price.
    #[must_use]
    pub const fn with_total_price(mut self, total_price: Option<Decimal>) -> Self {
        self.total_price = total_price;
        self
    }

    /// Books on behalf of another guest.
    #[must_use]
    pub fn with_for_guest(mut self, username: Option<String>) -> Self {
        self.for_guest = username;
        self
    }

    /// Sets the dry-run flag.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Whether these options need staff rights.
    fn needs_staff(&self) -> bool {
        self.status != ReservationStatus::Pending
            || self.total_price.is_some()
            || self.for_guest.is_some()
    }
}

/// A planned booking.
pub struct BookingPlan<'a> {
    options: BookingOptions,
    actor: &'a Guest,
    today: NaiveDate,
}

impl<'a> BookingPlan<'a> {
    /// Creates a booking plan for `actor`, evaluated as of `today`.
    #[must_use]
    pub const fn new(options: BookingOptions, actor: &'a Guest, today: NaiveDate) -> Self {
        Self {
            options,
            actor,
            today,
        }
    }

    /// Builds the plan.
    ///
    /// Run this inside the same immediate transaction that executes the
    /// plan, so the overlap check cannot go stale before the insert.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if a guest uses a staff-only option, then the
    /// first failing validation step, or a persistence error.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let options = &self.options;
        if options.needs_staff() {
            self.actor.require_staff("book with status, price or on behalf of a guest")?;
        }

        let stay = StayRange::new(options.check_in, options.check_out)?;
        check_not_in_past(&stay, self.today)?;
        check_guest_count(options.guest_count)?;
        let room = Database::require_room(conn, &options.room)?;
        check_capacity(&room, options.guest_count)?;
        check_room_free(conn, &room, &stay, None)?;

        let guest_id = match &options.for_guest {
            Some(username) => {
                Database::get_guest_by_username(conn, username)?
                    .ok_or_else(|| Error::NotFound {
                        resource: format!("guest {username}"),
                    })?
                    .id
            }
            None => self.actor.id,
        };

        let total_price = match options.total_price.filter(|price| *price > Decimal::ZERO) {
            Some(price) => price,
            None => stay.price(room.nightly_rate())?,
        };

        let new = NewReservation {
            guest_id,
            room_id: room.id,
            room_number: room.number.clone(),
            stay,
            guest_count: options.guest_count,
            status: options.status,
            total_price,
            comments: options.comments.clone(),
            created_at: Utc::now(),
        };

        Ok(OperationPlan::new(format!("Book room {} for {stay}", room.number))
            .add_action(PlanAction::CreateReservation(new))
            .add_action(PlanAction::DeriveRoomState {
                room_id: room.id,
                room_number: room.number,
                today: self.today,
            }))
    }
}
