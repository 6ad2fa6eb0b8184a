//! Reservations command implementation.
//!
//! Staff see every reservation and may filter by guest; anyone else only
//! ever sees their own.

use crate::error::CliError;
use crate::render::print_reservations;
use crate::utils::{open_desk, require_actor, GlobalOptions};
use clap::Args;
use hotel::config::OutputFormat;
use hotel::operations::ReservationFilter;
use hotel::ReservationStatus;

/// List reservations, newest first.
#[derive(Args)]
pub struct ReservationsCommand {
    /// Only reservations with this status
    #[arg(long, value_name = "STATUS")]
    pub status: Option<ReservationStatus>,

    /// Only the acting identity's reservations
    #[arg(long, conflicts_with = "guest")]
    pub mine: bool,

    /// Only reservations held by this username
    #[arg(long, value_name = "USERNAME")]
    pub guest: Option<String>,

    /// Output format (table, json, csv)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl ReservationsCommand {
    /// Execute the reservations command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut desk = open_desk(global)?;
        let actor = require_actor(global, &desk)?;

        let guest = if self.mine {
            Some(actor.id)
        } else {
            match self.guest {
                Some(ref username) => Some(desk.guest(username)?.id),
                None => None,
            }
        };
        let filter = ReservationFilter {
            status: self.status,
            guest,
        };

        let reservations = desk.list_reservations(&actor, &filter)?;
        let format = self.format.unwrap_or_else(|| desk.config().output_format());
        print_reservations(format, &reservations)
    }
}
