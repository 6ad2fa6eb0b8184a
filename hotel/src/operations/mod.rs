//! Booking operations using the plan-execute pattern.
//!
//! This module provides a plan-execute pattern for every write the booking
//! core makes, separating planning from execution to enable dry-run mode,
//! better testing, and clear error messages.
//!
//! # Architecture
//!
//! Operations are split into two phases:
//! 1. **Planning**: Analyzes the request, validates constraints, builds a plan
//! 2. **Execution**: Takes the plan and performs actual database operations
//!
//! Both phases run on the same connection inside one immediate transaction,
//! so the checks made while planning still hold when the plan is applied.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use hotel::database::{Database, DatabaseConfig};
//! use hotel::operations::{BookingOptions, BookingPlan, PlanExecutor};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/hotel.db")).unwrap();
//! let guest = Database::get_guest_by_username(db.connection(), "ana")
//!     .unwrap()
//!     .unwrap();
//! let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
//!
//! let options = BookingOptions::new(
//!     "101",
//!     today,
//!     NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
//!     2,
//! );
//!
//! let result = db
//!     .with_immediate_transaction(false, |tx| {
//!         // Generate plan
//!         let plan = BookingPlan::new(options, &guest, today).build_plan(tx)?;
//!         // Execute plan
//!         PlanExecutor::new(tx).execute(&plan)
//!     })
//!     .unwrap();
//! println!("booked {}", result.reservation().unwrap().id());
//! ```

pub mod availability;
pub mod book;
pub mod catalog;
pub mod delete;
pub mod derive;
pub mod executor;
pub mod init;
pub mod listing;
pub mod plan;
mod rules;
pub mod sweep;
pub mod update;

#[cfg(test)]
mod proptests;

pub use availability::{current_reservation, is_available, next_reservations};
pub use book::{BookingOptions, BookingPlan};
pub use catalog::CatalogOperations;
pub use delete::DeletePlan;
pub use derive::{derive_room_state, derived_state, RoomStateChange};
pub use executor::{ExecutionResult, PlanExecutor};
pub use init::{init_database, InitOptions, InitResult};
pub use listing::{
    list_reservations, list_rooms, room_details, Availability, ReservationFilter, RoomDetails,
    RoomFilter, RoomSummary,
};
pub use plan::{OperationPlan, PlanAction};
pub use sweep::{SweepOperations, SweepResult};
pub use update::{ReservationChanges, UpdatePlan};
