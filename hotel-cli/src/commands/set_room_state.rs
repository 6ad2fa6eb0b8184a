//! Set-room-state command implementation.

use crate::error::CliError;
use crate::utils::{open_desk, report_result, require_actor, GlobalOptions};
use clap::Args;
use hotel::RoomState;

/// Set a room's state by hand.
///
/// Reservation changes never move a room out of `maintenance`; this is the
/// only way back.
#[derive(Args)]
pub struct SetRoomStateCommand {
    /// Room number
    pub number: String,

    /// New state: available, occupied or maintenance
    pub state: RoomState,

    /// Validate without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl SetRoomStateCommand {
    /// Execute the set-room-state command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut desk = open_desk(global)?;
        let actor = require_actor(global, &desk)?;

        let result = desk.change_room_state(&actor, &self.number, self.state, self.dry_run)?;
        report_result(global, &result);
        if !global.quiet {
            for change in &result.room_changes {
                println!("{} {} -> {}", change.room_number, change.from, change.to);
            }
        }
        Ok(())
    }
}
