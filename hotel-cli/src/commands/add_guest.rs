//! Add-guest command implementation.

use crate::error::CliError;
use crate::utils::{open_desk, report_result, require_actor, GlobalOptions};
use clap::Args;
use hotel::NewGuest;

/// Register a guest identity.
#[derive(Args)]
pub struct AddGuestCommand {
    /// Login name
    pub username: String,

    /// E-mail address confirmations are sent to
    #[arg(long, value_name = "EMAIL")]
    pub email: String,

    /// Full name
    #[arg(long, value_name = "NAME")]
    pub full_name: Option<String>,

    /// Grant staff rights (requires a staff --as)
    #[arg(long)]
    pub staff: bool,

    /// Grant superuser rights (requires a staff --as)
    #[arg(long)]
    pub superuser: bool,

    /// Validate without registering
    #[arg(long)]
    pub dry_run: bool,
}

impl AddGuestCommand {
    /// Execute the add-guest command.
    ///
    /// Plain guests may be registered by anyone; privileged identities only
    /// by staff.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut desk = open_desk(global)?;

        if self.staff || self.superuser {
            let actor = require_actor(global, &desk)?;
            actor.require_staff("register staff identities")?;
        }

        let mut guest = NewGuest::new(&self.username, &self.email)?
            .staff(self.staff)
            .superuser(self.superuser);
        if let Some(ref name) = self.full_name {
            guest = guest.with_full_name(name);
        }

        let result = desk.register_guest(guest, self.dry_run)?;
        report_result(global, &result);
        if let Some(guest) = result.guest {
            println!("{}", guest.id.0);
        }
        Ok(())
    }
}
