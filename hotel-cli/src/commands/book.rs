//! Book command implementation.
//!
//! This module implements the `book` command, which books a room for the
//! acting identity (or, for staff, on behalf of another guest) and prints
//! the new reservation's id.

use crate::error::CliError;
use crate::utils::{open_desk, report_result, require_actor, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use hotel::operations::BookingOptions;
use hotel::{Decimal, ReservationStatus};

/// Book a room.
#[derive(Args)]
pub struct BookCommand {
    /// Room number
    #[arg(long, value_name = "NUMBER")]
    pub room: String,

    /// First night of the stay
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub check_in: NaiveDate,

    /// Departure day
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub check_out: NaiveDate,

    /// Size of the party
    #[arg(long, value_name = "COUNT", default_value_t = 1)]
    pub guests: u32,

    /// Requests for the front desk
    #[arg(long, value_name = "TEXT")]
    pub comments: Option<String>,

    /// Initial status (staff only)
    #[arg(long, value_name = "STATUS")]
    pub status: Option<ReservationStatus>,

    /// Explicit total price (staff only)
    #[arg(long, value_name = "AMOUNT")]
    pub price: Option<Decimal>,

    /// Book on behalf of this username (staff only)
    #[arg(long, value_name = "USERNAME")]
    pub for_guest: Option<String>,

    /// Validate without booking
    #[arg(long)]
    pub dry_run: bool,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut desk = open_desk(global)?;
        let actor = require_actor(global, &desk)?;

        let mut options = BookingOptions::new(self.room, self.check_in, self.check_out, self.guests)
            .with_comments(self.comments)
            .with_total_price(self.price)
            .with_for_guest(self.for_guest)
            .with_dry_run(self.dry_run);
        if let Some(status) = self.status {
            options = options.with_status(status);
        }

        let result = desk.create_reservation(&actor, options)?;
        report_result(global, &result);

        // Shell-friendly: just the id on stdout
        if let Some(reservation) = result.reservation() {
            if result.dry_run {
                if !global.quiet {
                    eprintln!(
                        "Would book room {} for {} night(s), total {}",
                        reservation.room_number(),
                        reservation.nights(),
                        reservation.total_price()
                    );
                }
            } else {
                println!("{}", reservation.id().0);
            }
        }
        Ok(())
    }
}
