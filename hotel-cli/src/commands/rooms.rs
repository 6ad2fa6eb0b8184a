//! Rooms command implementation.
//!
//! Lists rooms with their state and current availability. The completion
//! sweep runs first unless it is disabled in the configuration.

use crate::error::CliError;
use crate::render::print_rooms;
use crate::utils::{open_desk, GlobalOptions};
use clap::Args;
use hotel::config::OutputFormat;
use hotel::operations::{Availability, RoomFilter};
use hotel::{RoomState, RoomTypeName};

/// List rooms.
#[derive(Args)]
pub struct RoomsCommand {
    /// Only rooms of this type
    #[arg(long = "type", value_name = "TYPE")]
    pub room_type: Option<RoomTypeName>,

    /// Only rooms in this state
    #[arg(long, value_name = "STATE")]
    pub state: Option<RoomState>,

    /// Only rooms that are available or reserved right now
    #[arg(long, value_name = "AVAILABILITY")]
    pub availability: Option<Availability>,

    /// Output format (table, json, csv)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl RoomsCommand {
    /// Execute the rooms command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut desk = open_desk(global)?;
        let filter = RoomFilter {
            room_type: self.room_type,
            state: self.state,
            availability: self.availability,
        };

        let rooms = desk.list_rooms(&filter)?;
        let format = self.format.unwrap_or_else(|| desk.config().output_format());
        print_rooms(format, &rooms)
    }
}
