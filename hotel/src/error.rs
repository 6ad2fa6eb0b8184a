//! Error types for the hotel library.
//!
//! This module provides the error hierarchy for every booking, catalog and
//! persistence operation, using `thiserror` for ergonomic error handling.

use chrono::NaiveDate;
use thiserror::Error;

use crate::reservation::ReservationStatus;

/// Result type alias for operations that may fail with a hotel error.
///
/// # Examples
///
/// ```
/// use hotel::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the hotel library.
///
/// Booking validation failures are recoverable at the request boundary and
/// are reported back to the user. Persistence failures abort the whole
/// operation; nothing is committed when one is returned.
#[derive(Debug, Error)]
pub enum Error {
    /// The check-in date is not strictly before the check-out date.
    #[error("invalid date range: check-in {check_in} must be before check-out {check_out}")]
    InvalidDateRange {
        /// Requested check-in date.
        check_in: NaiveDate,
        /// Requested check-out date.
        check_out: NaiveDate,
    },

    /// A new reservation starts before today.
    #[error("check-in date {check_in} is in the past (today is {today})")]
    DateInPast {
        /// Requested check-in date.
        check_in: NaiveDate,
        /// The date the request was evaluated against.
        today: NaiveDate,
    },

    /// The guest count is below one.
    #[error("invalid guest count {count}: a reservation needs at least one guest")]
    InvalidGuestCount {
        /// The rejected guest count.
        count: u32,
    },

    /// The guest count exceeds the room type's occupancy limit.
    #[error("{guests} guest(s) exceed the maximum occupancy of {max_occupancy} for room {room}")]
    CapacityExceeded {
        /// Room number.
        room: String,
        /// Requested number of guests.
        guests: u32,
        /// Maximum occupancy of the room type.
        max_occupancy: u32,
    },

    /// The room cannot be booked for the requested dates.
    #[error("room {room} is not available from {check_in} to {check_out}: {reason}")]
    RoomUnavailable {
        /// Room number.
        room: String,
        /// Requested check-in date.
        check_in: NaiveDate,
        /// Requested check-out date.
        check_out: NaiveDate,
        /// Why the room is unavailable.
        reason: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// The resource being created already exists.
    #[error("already exists: {resource}")]
    AlreadyExists {
        /// The resource that already exists.
        resource: String,
    },

    /// A reservation status outside the allowed value set.
    #[error("invalid reservation status '{value}' (expected pending, confirmed, cancelled or completed)")]
    InvalidStatusValue {
        /// The rejected value.
        value: String,
    },

    /// A status change outside the lifecycle table under the strict policy.
    #[error("reservation cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// Current status.
        from: ReservationStatus,
        /// Requested status.
        to: ReservationStatus,
    },

    /// A room state outside the allowed value set.
    #[error("invalid room state '{value}' (expected available, occupied or maintenance)")]
    InvalidRoomState {
        /// The rejected value.
        value: String,
    },

    /// A room type name outside the allowed value set.
    #[error("invalid room type '{value}' (expected single, double, suite or family)")]
    InvalidRoomType {
        /// The rejected value.
        value: String,
    },

    /// The acting identity may not perform the operation.
    #[error("unauthorized: {user} may not {action}")]
    Unauthorized {
        /// The acting username.
        user: String,
        /// The attempted action.
        action: String,
    },

    /// A storage-layer failure (constraint violation, transaction conflict, ...).
    #[error("persistence error: {0}")]
    Persistence(#[from] rusqlite::Error),

    /// The database stayed locked past the busy timeout.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// A field failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if the error is a booking or input validation failure.
    ///
    /// These are recovered at the request boundary and shown to the user;
    /// everything else is an infrastructure failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use hotel::Error;
    ///
    /// let err = Error::InvalidGuestCount { count: 0 };
    /// assert!(err.is_validation());
    ///
    /// let err = Error::LockTimeout { seconds: 5 };
    /// assert!(!err.is_validation());
    /// ```
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDateRange { .. }
                | Self::DateInPast { .. }
                | Self::InvalidGuestCount { .. }
                | Self::CapacityExceeded { .. }
                | Self::RoomUnavailable { .. }
                | Self::NotFound { .. }
                | Self::AlreadyExists { .. }
                | Self::InvalidStatusValue { .. }
                | Self::InvalidStatusTransition { .. }
                | Self::InvalidRoomState { .. }
                | Self::InvalidRoomType { .. }
                | Self::Validation { .. }
        )
    }

    /// Check if error indicates a missing room, guest or reservation.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error is an authorization failure.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Maps SQLite busy/locked failures to [`Error::LockTimeout`].
    ///
    /// Every other error is returned unchanged.
    #[must_use]
    pub fn with_lock_timeout(self, seconds: u64) -> Self {
        match self {
            Self::Persistence(rusqlite::Error::SqliteFailure(ref failure, _))
                if matches!(
                    failure.code,
                    rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
                ) =>
            {
                Self::LockTimeout { seconds }
            }
            other => other,
        }
    }
}
