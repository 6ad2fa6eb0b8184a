//! Environment variable overrides for configuration.
//!
//! This module provides support for `HOTEL_*` environment variables that
//! override values loaded from configuration files.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Handles environment variable overrides.
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to a configuration.
    ///
    /// Reads the `HOTEL_*` configuration variables and applies them to the
    /// provided configuration, overwriting any existing values. Empty
    /// variables are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable has an invalid value.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(seconds) = Self::var("HOTEL_MAXIMUM_LOCK_WAIT_SECONDS") {
            config.maximum_lock_wait_seconds =
                Some(Self::parse_number("HOTEL_MAXIMUM_LOCK_WAIT_SECONDS", &seconds)?);
        }

        if let Some(val) = Self::var("HOTEL_DISABLE_AUTOSWEEP") {
            config.disable_autosweep = Some(Self::parse_bool("HOTEL_DISABLE_AUTOSWEEP", &val)?);
        }

        if let Some(limit) = Self::var("HOTEL_UPCOMING_LIMIT") {
            config.upcoming_limit = Some(Self::parse_number("HOTEL_UPCOMING_LIMIT", &limit)?);
        }

        if let Some(val) = Self::var("HOTEL_STRICT_STATUS_TRANSITIONS") {
            config.strict_status_transitions =
                Some(Self::parse_bool("HOTEL_STRICT_STATUS_TRANSITIONS", &val)?);
        }

        if let Some(format) = Self::var("HOTEL_OUTPUT_FORMAT") {
            let parsed: OutputFormat = format.parse().map_err(|_| Error::Validation {
                field: "HOTEL_OUTPUT_FORMAT".into(),
                message: format!("Invalid output format: '{format}' (expected table, json or csv)"),
            })?;
            config.output_format = Some(parsed);
        }

        Self::apply_notification_overrides(config)?;

        Ok(())
    }

    /// Apply notification-related environment variable overrides.
    fn apply_notification_overrides(config: &mut Config) -> Result<()> {
        let mut notifications = config.notifications.clone().unwrap_or_default();
        let mut modified = false;

        if let Some(val) = Self::var("HOTEL_NOTIFICATIONS_ENABLED") {
            notifications.enabled = Some(Self::parse_bool("HOTEL_NOTIFICATIONS_ENABLED", &val)?);
            modified = true;
        }

        if let Some(outbox) = Self::var("HOTEL_NOTIFICATIONS_OUTBOX") {
            notifications.outbox = Some(PathBuf::from(outbox));
            modified = true;
        }

        if modified {
            config.notifications = Some(notifications);
        }

        Ok(())
    }

    /// Read a variable, treating unset and blank the same way.
    fn var(name: &str) -> Option<String> {
        env::var(name).ok().filter(|v| !v.trim().is_empty())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes for true, false/0/no for false (case-insensitive).
    pub(crate) fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!("Invalid boolean value: '{s}' (expected true/false/1/0/yes/no)"),
            }),
        }
    }

    fn parse_number<T: std::str::FromStr>(field: &str, s: &str) -> Result<T> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("Invalid number: '{s}'"),
        })
    }
}
