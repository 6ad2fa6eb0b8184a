#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # hotel
//!
//! The booking core of a small hotel: a room catalog, an availability
//! engine, the reservation lifecycle and room state derivation, stored in
//! `SQLite`.
//!
//! A booking is validated, stored and followed by a re-derivation of the
//! room's state, all inside one write-locking transaction, so two
//! concurrent bookers can never both take the same nights.
//!
//! ## Core Types
//!
//! - [`RoomType`] and [`Room`]: the catalog
//! - [`Reservation`], [`StayRange`] and [`ReservationStatus`]: bookings
//! - [`Guest`]: the acting identity and its staff capability
//! - [`FrontDesk`]: every operation, transactional, with notifications
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use hotel::{quote_price, StayRange};
//! use rust_decimal::Decimal;
//!
//! let stay = StayRange::new(
//!     NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
//! )
//! .unwrap();
//! assert_eq!(stay.nights(), 3);
//!
//! let rate = Decimal::new(2_500_000, 2); // 25000.00
//! assert_eq!(stay.price(rate), quote_price(3, rate));
//! ```

pub mod catalog;
pub mod config;
pub mod database;
pub mod error;
pub mod front_desk;
pub mod guest;
pub mod logging;
pub mod notify;
pub mod operations;
pub mod reservation;

// Re-export key types at crate root for convenience
pub use catalog::{NewRoom, NewRoomType, Room, RoomId, RoomState, RoomType, RoomTypeId, RoomTypeName};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use front_desk::FrontDesk;
pub use guest::{Guest, GuestId, NewGuest};
pub use logging::{init_logger, LogLevel, Logger};
pub use notify::{ConfirmationNotice, Notifier, NotifyError};
pub use operations::{
    BookingOptions, ExecutionResult, OperationPlan, PlanAction, PlanExecutor, ReservationChanges,
    SweepResult,
};
pub use reservation::{
    quote_price, NewReservation, Reservation, ReservationId, ReservationStatus, StayRange,
    TransitionCheck, TransitionPolicy,
};
pub use rust_decimal::Decimal;
