//! Add-room-type command implementation.

use crate::error::CliError;
use crate::utils::{open_desk, report_result, require_actor, GlobalOptions};
use clap::Args;
use hotel::{Decimal, NewRoomType, RoomTypeName};

/// Add a room type.
#[derive(Args)]
pub struct AddRoomTypeCommand {
    /// Type name: single, double, suite or family
    pub name: RoomTypeName,

    /// Price of one night
    #[arg(long, value_name = "AMOUNT")]
    pub rate: Decimal,

    /// Largest party the type holds
    #[arg(long, value_name = "COUNT")]
    pub max_occupancy: u32,

    /// Free-text description
    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    /// Validate without adding
    #[arg(long)]
    pub dry_run: bool,
}

impl AddRoomTypeCommand {
    /// Execute the add-room-type command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut desk = open_desk(global)?;
        let actor = require_actor(global, &desk)?;

        let room_type = NewRoomType::new(self.name, self.rate, self.max_occupancy)?
            .with_description(self.description);
        let result = desk.add_room_type(&actor, room_type, self.dry_run)?;
        report_result(global, &result);

        if let Some(room_type) = result.room_type {
            if !global.quiet {
                println!(
                    "{} at {} per night, up to {} guest(s)",
                    room_type.name, room_type.nightly_rate, room_type.max_occupancy
                );
            }
        }
        Ok(())
    }
}
