//! Configuration merging and precedence handling.
//!
//! This module implements hierarchical merging of configuration sources.
//! Scalars are replaced by the higher-precedence source; the nested
//! notification settings merge field by field.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, NotificationConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use hotel::config::{Config, ConfigMerger};
///
/// let low = Config { upcoming_limit: Some(3), ..Default::default() };
/// let high = Config { upcoming_limit: Some(8), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.upcoming_limit, Some(8));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Notifications: field-by-field merge
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.disable_autosweep.is_some() {
            target.disable_autosweep = source.disable_autosweep;
        }

        if source.upcoming_limit.is_some() {
            target.upcoming_limit = source.upcoming_limit;
        }

        if source.strict_status_transitions.is_some() {
            target.strict_status_transitions = source.strict_status_transitions;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(ref source_notifications) = source.notifications {
            let merged = target
                .notifications
                .get_or_insert_with(NotificationConfig::default);
            Self::merge_notifications(merged, source_notifications);
        }
    }

    fn merge_notifications(target: &mut NotificationConfig, source: &NotificationConfig) {
        if source.enabled.is_some() {
            target.enabled = source.enabled;
        }
        if source.outbox.is_some() {
            target.outbox.clone_from(&source.outbox);
        }
    }
}
