//! Confirmation notifications.
//!
//! The booking core tells a [`Notifier`] when a reservation becomes
//! confirmed. Delivery happens after the transaction commits and a failed
//! delivery never changes the outcome of the operation that triggered it.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::guest::Guest;
use crate::reservation::{Reservation, ReservationId};

/// Payload sent when a reservation moves into `confirmed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationNotice {
    /// Where the confirmation goes.
    pub guest_email: String,
    /// Full name, or the username when no name is on file.
    pub guest_name: String,
    /// The confirmed reservation.
    pub reservation_id: ReservationId,
    /// Room number.
    pub room_number: String,
    /// First night.
    pub check_in: NaiveDate,
    /// Departure day.
    pub check_out: NaiveDate,
    /// Price of the whole stay.
    pub total_price: Decimal,
}

impl ConfirmationNotice {
    /// Builds the notice for `reservation` held by `guest`.
    #[must_use]
    pub fn new(guest: &Guest, reservation: &Reservation) -> Self {
        Self {
            guest_email: guest.email.clone(),
            guest_name: guest.display_name().to_string(),
            reservation_id: reservation.id(),
            room_number: reservation.room_number().to_string(),
            check_in: reservation.stay().check_in(),
            check_out: reservation.stay().check_out(),
            total_price: reservation.total_price(),
        }
    }
}

/// Delivery failure reported by a [`Notifier`].
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The outbox could not be written.
    #[error("failed to write notification outbox {path}: {source}")]
    Outbox {
        /// Outbox file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The notice could not be encoded.
    #[error("failed to encode notification: {0}")]
    Encode(#[from] serde_json::Error),

    /// Any other transport failure.
    #[error("notification rejected: {0}")]
    Rejected(String),
}

/// Receives confirmation notices.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send {
    /// Deliver one notice.
    ///
    /// # Errors
    ///
    /// Returns an error when the notice could not be delivered; callers log
    /// it and carry on.
    fn reservation_confirmed(&self, notice: &ConfirmationNotice) -> Result<(), NotifyError>;
}

/// Writes notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn reservation_confirmed(&self, notice: &ConfirmationNotice) -> Result<(), NotifyError> {
        log::info!(
            "confirmation for {} <{}>: reservation {} room {} {}..{} total {}",
            notice.guest_name,
            notice.guest_email,
            notice.reservation_id,
            notice.room_number,
            notice.check_in,
            notice.check_out,
            notice.total_price
        );
        Ok(())
    }
}

/// Appends each notice as one JSON line to a file.
#[derive(Debug, Clone)]
pub struct OutboxNotifier {
    path: PathBuf,
}

impl OutboxNotifier {
    /// Notifier appending to `path`; the file is created on first use.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The outbox file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Notifier for OutboxNotifier {
    fn reservation_confirmed(&self, notice: &ConfirmationNotice) -> Result<(), NotifyError> {
        let mut line = serde_json::to_string(notice)?;
        line.push('\n');

        let outbox_error = |source| NotifyError::Outbox {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(outbox_error)?;
        file.write_all(line.as_bytes()).map_err(outbox_error)
    }
}

/// Drops every notice.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledNotifier;

impl Notifier for DisabledNotifier {
    fn reservation_confirmed(&self, _notice: &ConfirmationNotice) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// The notifier selected by `config`.
#[must_use]
pub fn notifier_from_config(config: &Config) -> Box<dyn Notifier> {
    if !config.notifications_enabled() {
        return Box::new(DisabledNotifier);
    }
    match config.notification_outbox() {
        Some(path) => Box::new(OutboxNotifier::new(path)),
        None => Box::new(LogNotifier),
    }
}

/// Delivers `notice`, logging instead of returning any failure.
pub(crate) fn deliver(notifier: &dyn Notifier, notice: &ConfirmationNotice) {
    match notifier.reservation_confirmed(notice) {
        Ok(()) => log::debug!("confirmation sent for reservation {}", notice.reservation_id),
        Err(e) => log::warn!(
            "could not notify {} about reservation {}: {e}",
            notice.guest_email,
            notice.reservation_id
        ),
    }
}
