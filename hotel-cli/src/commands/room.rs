//! Room command implementation.

use crate::error::CliError;
use crate::render::print_room_details;
use crate::utils::{open_desk, GlobalOptions};
use clap::Args;
use hotel::config::OutputFormat;

/// Show a room with its current and upcoming reservations.
#[derive(Args)]
pub struct RoomCommand {
    /// Room number
    pub number: String,

    /// How many upcoming reservations to show (default from configuration)
    #[arg(long, value_name = "COUNT")]
    pub limit: Option<usize>,

    /// Output format (table, json, csv)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl RoomCommand {
    /// Execute the room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.limit == Some(0) {
            return Err(CliError::InvalidArguments(
                "--limit must be at least 1".to_string(),
            ));
        }

        let mut desk = open_desk(global)?;
        let details = desk.room_details(&self.number, self.limit)?;
        let format = self.format.unwrap_or_else(|| desk.config().output_format());
        print_room_details(format, &details)
    }
}
