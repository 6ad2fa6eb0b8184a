//! Delete command implementation.

use crate::error::CliError;
use crate::utils::{open_desk, report_result, require_actor, GlobalOptions};
use clap::Args;
use hotel::ReservationId;

/// Delete a reservation.
#[derive(Args)]
pub struct DeleteCommand {
    /// Reservation id
    pub id: i64,

    /// Validate without deleting
    #[arg(long)]
    pub dry_run: bool,
}

impl DeleteCommand {
    /// Execute the delete command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut desk = open_desk(global)?;
        let actor = require_actor(global, &desk)?;

        let result = desk.delete_reservation(&actor, ReservationId(self.id), self.dry_run)?;
        report_result(global, &result);
        Ok(())
    }
}
