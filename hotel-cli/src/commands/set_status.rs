//! Set-status command implementation.

use crate::error::CliError;
use crate::utils::{open_desk, report_result, require_actor, GlobalOptions};
use clap::Args;
use hotel::{ReservationId, ReservationStatus};

/// Set a reservation's status.
///
/// Moving into `confirmed` sends the guest a confirmation once the change
/// is committed.
#[derive(Args)]
pub struct SetStatusCommand {
    /// Reservation id
    pub id: i64,

    /// New status: pending, confirmed, cancelled or completed
    pub status: ReservationStatus,

    /// Validate without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl SetStatusCommand {
    /// Execute the set-status command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut desk = open_desk(global)?;
        let actor = require_actor(global, &desk)?;

        let result =
            desk.change_reservation_status(&actor, ReservationId(self.id), self.status, self.dry_run)?;
        report_result(global, &result);
        if let Some(reservation) = result.reservation() {
            if !global.quiet {
                println!("{} {}", reservation.id(), reservation.status());
            }
        }
        Ok(())
    }
}
