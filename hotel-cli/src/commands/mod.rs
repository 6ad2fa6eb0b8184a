//! CLI command implementations.
//!
//! Catalog setup (`init`, `add-guest`, `add-room-type`, `add-room`),
//! queries (`rooms`, `room`, `check`, `reservations`), reservation writes
//! (`book`, `update`, `set-status`, `cancel`, `delete`), room state
//! (`set-room-state`) and maintenance (`sweep`, `completions`).

pub mod add_guest;
pub mod add_room;
pub mod add_room_type;
pub mod book;
pub mod cancel;
pub mod check;
pub mod completions;
pub mod delete;
pub mod init;
pub mod reservations;
pub mod room;
pub mod rooms;
pub mod set_room_state;
pub mod set_status;
pub mod sweep;
pub mod update;

pub use add_guest::AddGuestCommand;
pub use add_room::AddRoomCommand;
pub use add_room_type::AddRoomTypeCommand;
pub use book::BookCommand;
pub use cancel::CancelCommand;
pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use delete::DeleteCommand;
pub use init::InitCommand;
pub use reservations::ReservationsCommand;
pub use room::RoomCommand;
pub use rooms::RoomsCommand;
pub use set_room_state::SetRoomStateCommand;
pub use set_status::SetStatusCommand;
pub use sweep::SweepCommand;
pub use update::UpdateCommand;
