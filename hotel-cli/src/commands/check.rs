//! Check command implementation.
//!
//! Prints `available` or `unavailable` and, like an assertion, exits with
//! status 1 when the room cannot be booked.

use crate::error::CliError;
use crate::utils::{open_desk, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;

/// Check whether a room can be booked.
#[derive(Args)]
pub struct CheckCommand {
    /// Room number
    pub number: String,

    /// First night of the stay
    #[arg(long, value_name = "YYYY-MM-DD", requires = "check_out")]
    pub check_in: Option<NaiveDate>,

    /// Departure day
    #[arg(long, value_name = "YYYY-MM-DD", requires = "check_in")]
    pub check_out: Option<NaiveDate>,
}

impl CheckCommand {
    /// Execute the check command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let desk = open_desk(global)?;
        let available = desk.is_available(&self.number, self.check_in, self.check_out)?;

        if available {
            println!("available");
            Ok(())
        } else {
            println!("unavailable");
            Err(CliError::SemanticFailure(format!(
                "Room {} is not available",
                self.number
            )))
        }
    }
}
