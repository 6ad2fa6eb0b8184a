//! Update command implementation.
//!
//! Edits any field of a reservation. Every booking check except the
//! past-date one runs again against the edited reservation, and both the
//! old and the new room have their state re-derived.

use crate::error::CliError;
use crate::utils::{open_desk, report_result, require_actor, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use hotel::{Decimal, ReservationChanges, ReservationId, ReservationStatus};

/// Edit a reservation.
#[derive(Args)]
pub struct UpdateCommand {
    /// Reservation id
    pub id: i64,

    /// New first night
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub check_in: Option<NaiveDate>,

    /// New departure day
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub check_out: Option<NaiveDate>,

    /// Move to this room
    #[arg(long, value_name = "NUMBER")]
    pub room: Option<String>,

    /// New party size
    #[arg(long, value_name = "COUNT")]
    pub guests: Option<u32>,

    /// New status
    #[arg(long, value_name = "STATUS")]
    pub status: Option<ReservationStatus>,

    /// Explicit total price; omit to reprice on date or room changes
    #[arg(long, value_name = "AMOUNT")]
    pub price: Option<Decimal>,

    /// New comments; an empty string clears them
    #[arg(long, value_name = "TEXT")]
    pub comments: Option<String>,

    /// Validate without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl UpdateCommand {
    /// Execute the update command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let changes = ReservationChanges {
            check_in: self.check_in,
            check_out: self.check_out,
            room: self.room,
            guest_count: self.guests,
            status: self.status,
            total_price: self.price,
            comments: self.comments,
        };
        if changes.is_empty() {
            return Err(CliError::InvalidArguments(
                "nothing to update (pass at least one field)".to_string(),
            ));
        }

        let mut desk = open_desk(global)?;
        let actor = require_actor(global, &desk)?;

        let result = desk.update_reservation(&actor, ReservationId(self.id), changes, self.dry_run)?;
        report_result(global, &result);
        if let Some(reservation) = result.reservation() {
            if !global.quiet {
                println!(
                    "{} room {} {} {} total {}",
                    reservation.id(),
                    reservation.room_number(),
                    reservation.stay(),
                    reservation.status(),
                    reservation.total_price()
                );
            }
        }
        Ok(())
    }
}
