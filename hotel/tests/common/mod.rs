//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixtures for driving the hotel
//! library through its [`FrontDesk`] entry point.

pub mod database;

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use hotel::{ConfirmationNotice, Notifier, NotifyError};

/// Shorthand for a calendar date.
#[allow(dead_code)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// The day every scenario runs on unless it says otherwise.
#[allow(dead_code)]
pub fn today() -> NaiveDate {
    date(2025, 3, 1)
}

/// Notifier that keeps every notice it is handed.
///
/// Clones share the same record, so a test can hand one clone to the
/// front desk and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<ConfirmationNotice>>>,
}

#[allow(dead_code)]
impl RecordingNotifier {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices delivered so far, in order.
    pub fn sent(&self) -> Vec<ConfirmationNotice> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn reservation_confirmed(&self, notice: &ConfirmationNotice) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(notice.clone());
        Ok(())
    }
}
