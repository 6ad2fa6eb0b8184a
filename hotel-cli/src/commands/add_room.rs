//! Add-room command implementation.

use crate::error::CliError;
use crate::utils::{open_desk, report_result, require_actor, GlobalOptions};
use clap::Args;
use hotel::{NewRoom, RoomTypeName};

/// Add a room.
#[derive(Args)]
pub struct AddRoomCommand {
    /// Room number
    pub number: String,

    /// Room type name
    #[arg(long = "type", value_name = "TYPE")]
    pub room_type: RoomTypeName,

    /// Floor
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub floor: i32,

    /// Free-text description
    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    /// Validate without adding
    #[arg(long)]
    pub dry_run: bool,
}

impl AddRoomCommand {
    /// Execute the add-room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut desk = open_desk(global)?;
        let actor = require_actor(global, &desk)?;

        let room = NewRoom::new(&self.number, self.room_type, self.floor)?
            .with_description(self.description);
        let result = desk.add_room(&actor, room, self.dry_run)?;
        report_result(global, &result);

        if let Some(room) = result.room {
            println!("{}", room.number);
        }
        Ok(())
    }
}
