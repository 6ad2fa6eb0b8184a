//! Sweep command implementation.
//!
//! Listings already sweep on their own; this runs it on demand, e.g. from
//! a nightly job with `HOTEL_DISABLE_AUTOSWEEP` set.

use crate::error::CliError;
use crate::utils::{open_desk, GlobalOptions};
use clap::Args;

/// Complete every confirmed stay that has ended.
#[derive(Args)]
pub struct SweepCommand {
    /// Report what would be completed without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl SweepCommand {
    /// Execute the sweep command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut desk = open_desk(global)?;
        let result = desk.sweep_completed(self.dry_run)?;

        if !global.quiet {
            let verb = if result.dry_run { "Would complete" } else { "Completed" };
            eprintln!("{verb} {} reservation(s)", result.completed.len());
            for reservation in &result.completed {
                eprintln!(
                    "  {} room {} {}",
                    reservation.id(),
                    reservation.room_number(),
                    reservation.stay()
                );
            }
            for change in &result.room_changes {
                eprintln!("  room {}: {} -> {}", change.room_number, change.from, change.to);
            }
        }
        println!("{}", result.completed.len());
        Ok(())
    }
}
