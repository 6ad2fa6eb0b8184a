//! Configuration validation.
//!
//! This module checks that merged configuration values are in range before
//! they reach the database layer or the booking operations.

use crate::config::schema::{Config, NotificationConfig, MAX_UPCOMING_LIMIT};
use crate::error::{Error, Result};

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use hotel::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
///
/// let bad = Config { upcoming_limit: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(timeout) = config.maximum_lock_wait_seconds {
            if timeout == 0 {
                return Err(Error::Validation {
                    field: "maximum_lock_wait_seconds".into(),
                    message: "Timeout must be greater than 0".into(),
                });
            }
        }

        if let Some(limit) = config.upcoming_limit {
            Self::validate_upcoming_limit(limit)?;
        }

        if let Some(ref notifications) = config.notifications {
            Self::validate_notifications(notifications)?;
        }

        Ok(())
    }

    /// Validate an upcoming-reservation limit.
    ///
    /// # Errors
    ///
    /// Returns an error unless `1 <= limit <= 100`.
    pub fn validate_upcoming_limit(limit: usize) -> Result<()> {
        if limit == 0 || limit > MAX_UPCOMING_LIMIT {
            return Err(Error::Validation {
                field: "upcoming_limit".into(),
                message: format!("Must be between 1 and {MAX_UPCOMING_LIMIT}, got {limit}"),
            });
        }
        Ok(())
    }

    fn validate_notifications(notifications: &NotificationConfig) -> Result<()> {
        if let Some(ref outbox) = notifications.outbox {
            if outbox.as_os_str().is_empty() {
                return Err(Error::Validation {
                    field: "notifications.outbox".into(),
                    message: "Cannot be empty".into(),
                });
            }
            if outbox.is_dir() {
                return Err(Error::Validation {
                    field: "notifications.outbox".into(),
                    message: format!("{} is a directory", outbox.display()),
                });
            }
        }
        Ok(())
    }
}
