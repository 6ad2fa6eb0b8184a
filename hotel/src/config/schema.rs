//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the hotel
//! booking core: lock waiting, the lazy completion sweep, listing defaults,
//! the status transition policy and confirmation notifications.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::reservation::TransitionPolicy;

/// Default number of upcoming reservations shown per room.
pub const DEFAULT_UPCOMING_LIMIT: usize = 3;

/// Largest accepted `upcoming_limit`.
pub const MAX_UPCOMING_LIMIT: usize = 100;

/// Default busy timeout in seconds.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// Every field is optional so that partial configurations from several
/// sources can be merged; the accessor methods supply the defaults.
///
/// # Examples
///
/// ```
/// use hotel::config::Config;
///
/// let config = Config {
///     upcoming_limit: Some(5),
///     ..Default::default()
/// };
/// assert_eq!(config.upcoming_limit(), 5);
/// assert!(!config.autosweep_disabled());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Skip the completion sweep that normally runs before listings.
    pub disable_autosweep: Option<bool>,

    /// Default number of upcoming reservations per room.
    pub upcoming_limit: Option<usize>,

    /// Reject status changes outside the lifecycle table.
    pub strict_status_transitions: Option<bool>,

    /// Confirmation notification settings.
    pub notifications: Option<NotificationConfig>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Effective busy timeout in seconds.
    #[must_use]
    pub fn lock_wait_seconds(&self) -> u64 {
        self.maximum_lock_wait_seconds
            .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS)
    }

    /// Whether the lazy completion sweep is disabled.
    #[must_use]
    pub fn autosweep_disabled(&self) -> bool {
        self.disable_autosweep.unwrap_or(false)
    }

    /// Effective default limit for upcoming reservations.
    #[must_use]
    pub fn upcoming_limit(&self) -> usize {
        self.upcoming_limit.unwrap_or(DEFAULT_UPCOMING_LIMIT)
    }

    /// The status transition policy selected by this configuration.
    #[must_use]
    pub fn transition_policy(&self) -> TransitionPolicy {
        if self.strict_status_transitions.unwrap_or(false) {
            TransitionPolicy::Strict
        } else {
            TransitionPolicy::Permissive
        }
    }

    /// Whether confirmation notifications are sent at all.
    #[must_use]
    pub fn notifications_enabled(&self) -> bool {
        self.notifications
            .as_ref()
            .and_then(|n| n.enabled)
            .unwrap_or(true)
    }

    /// The configured notification outbox file, if any.
    #[must_use]
    pub fn notification_outbox(&self) -> Option<&PathBuf> {
        self.notifications.as_ref().and_then(|n| n.outbox.as_ref())
    }

    /// Effective output format for listings.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or(OutputFormat::Table)
    }
}

/// Confirmation notification settings.
///
/// # Examples
///
/// ```
/// use hotel::config::NotificationConfig;
/// use std::path::PathBuf;
///
/// let config = NotificationConfig {
///     enabled: Some(true),
///     outbox: Some(PathBuf::from("/var/spool/hotel/outbox.jsonl")),
/// };
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NotificationConfig {
    /// Send notifications (default true).
    pub enabled: Option<bool>,

    /// Append notices as JSON lines to this file instead of logging them.
    pub outbox: Option<PathBuf>,
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use hotel::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// Human-readable table format.
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Table => write!(f, "table"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            _ => Err(crate::error::Error::Validation {
                field: "output_format".into(),
                message: format!("Invalid output format: '{s}' (expected table, json or csv)"),
            }),
        }
    }
}
