//! Build script for hotel-cli.
//!
//! Generates the `hotel.1` man page into `OUT_DIR` with `clap_mangen`.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! structure is declared again here.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep in step with src/cli.rs.
fn build_cli() -> Command {
    Command::new("hotel")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage hotel rooms and reservations")
        .long_about("Command-line front desk for a small hotel's rooms, room types and reservations")
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("HOTEL_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("HOTEL_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(ArgAction::SetTrue)
                .env("HOTEL_DISABLE_AUTOINIT"),
        )
        .arg(
            Arg::new("as")
                .long("as")
                .help("Username of the acting identity")
                .value_name("USERNAME")
                .global(true)
                .env("HOTEL_USER"),
        )
        .arg(
            Arg::new("today")
                .long("today")
                .help("Evaluate every rule as of this day instead of the local date")
                .value_name("YYYY-MM-DD")
                .global(true)
                .env("HOTEL_TODAY"),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize the data directory and database")
                .long_about("Create the database, optionally a config template and the first superuser"),
            Command::new("add-guest")
                .about("Register a guest identity")
                .long_about("Register a guest; staff and superusers need a staff actor"),
            Command::new("add-room-type")
                .about("Add a room type (staff)")
                .long_about("Add a room type with its nightly rate and maximum occupancy"),
            Command::new("add-room")
                .about("Add a room (staff)")
                .long_about("Add a room of an existing type"),
            Command::new("rooms")
                .about("List rooms")
                .long_about("List rooms with their state, filtered by type, state or availability"),
            Command::new("room")
                .about("Show a room")
                .long_about("Show a room with its current and upcoming reservations"),
            Command::new("check")
                .about("Check whether a room can be booked")
                .long_about("Check a room's availability, optionally for a date range"),
            Command::new("book")
                .about("Book a room")
                .long_about("Validate and store a reservation, then re-derive the room's state"),
            Command::new("reservations")
                .about("List reservations")
                .long_about("List reservations visible to the acting identity"),
            Command::new("set-status")
                .about("Set a reservation's status (staff)")
                .long_about("Move a reservation through its lifecycle"),
            Command::new("set-room-state")
                .about("Set a room's state by hand (staff)")
                .long_about("Put a room into or take it out of maintenance"),
            Command::new("update")
                .about("Edit a reservation (staff)")
                .long_about("Change a reservation's dates, room, party size, status, price or comments"),
            Command::new("cancel")
                .about("Cancel a reservation (staff)")
                .long_about("Set a reservation to cancelled, freeing its nights"),
            Command::new("delete")
                .about("Delete a reservation (staff or its holder)")
                .long_about("Remove a reservation and re-derive its room's state"),
            Command::new("sweep")
                .about("Complete every confirmed stay that has ended")
                .long_about("Mark confirmed reservations whose departure day has passed as completed"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").unwrap_or_default());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(man_dir.join("hotel.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
