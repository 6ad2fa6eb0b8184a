//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddGuestCommand, AddRoomCommand, AddRoomTypeCommand, BookCommand, CancelCommand,
    CheckCommand, CompletionsCommand, DeleteCommand, InitCommand, ReservationsCommand,
    RoomCommand, RoomsCommand, SetRoomStateCommand, SetStatusCommand, SweepCommand,
    UpdateCommand,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line front desk for the hotel booking core.
#[derive(Parser)]
#[command(name = "hotel")]
#[command(version, about = "Manage hotel rooms and reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "HOTEL_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "HOTEL_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "HOTEL_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    /// Username of the acting identity
    #[arg(long = "as", value_name = "USERNAME", global = true, env = "HOTEL_USER")]
    pub actor: Option<String>,

    /// Evaluate every rule as of this day instead of the local date
    #[arg(long, value_name = "YYYY-MM-DD", global = true, env = "HOTEL_TODAY")]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Register a guest identity
    AddGuest(AddGuestCommand),

    /// Add a room type (staff)
    AddRoomType(AddRoomTypeCommand),

    /// Add a room (staff)
    AddRoom(AddRoomCommand),

    /// List rooms
    Rooms(RoomsCommand),

    /// Show a room with its current and upcoming reservations
    Room(RoomCommand),

    /// Check whether a room can be booked
    Check(CheckCommand),

    /// Book a room
    Book(BookCommand),

    /// List reservations
    Reservations(ReservationsCommand),

    /// Set a reservation's status (staff)
    SetStatus(SetStatusCommand),

    /// Set a room's state by hand (staff)
    SetRoomState(SetRoomStateCommand),

    /// Edit a reservation (staff)
    Update(UpdateCommand),

    /// Cancel a reservation (staff)
    Cancel(CancelCommand),

    /// Delete a reservation (staff or its holder)
    Delete(DeleteCommand),

    /// Complete every confirmed stay that has ended
    Sweep(SweepCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
