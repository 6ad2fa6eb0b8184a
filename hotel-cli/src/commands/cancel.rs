//! Cancel command implementation.

use crate::error::CliError;
use crate::utils::{open_desk, report_result, require_actor, GlobalOptions};
use clap::Args;
use hotel::ReservationId;

/// Cancel a reservation, freeing its nights.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation id
    pub id: i64,

    /// Validate without cancelling
    #[arg(long)]
    pub dry_run: bool,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut desk = open_desk(global)?;
        let actor = require_actor(global, &desk)?;

        let result = desk.cancel_reservation(&actor, ReservationId(self.id), self.dry_run)?;
        report_result(global, &result);
        Ok(())
    }
}
