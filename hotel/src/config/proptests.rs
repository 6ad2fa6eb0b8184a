//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{Config, NotificationConfig, OutputFormat};
use super::validator::ConfigValidator;
use proptest::prelude::*;
use std::path::PathBuf;

fn output_format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Table),
        Just(OutputFormat::Json),
        Just(OutputFormat::Csv),
    ]
}

fn notification_strategy() -> impl Strategy<Value = NotificationConfig> {
    (
        prop::option::of(any::<bool>()),
        prop::option::of("[a-z]{1,12}".prop_map(|s| PathBuf::from(format!("/tmp/{s}.jsonl")))),
    )
        .prop_map(|(enabled, outbox)| NotificationConfig { enabled, outbox })
}

// Strategy for generating configs
fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(1u64..600),
        prop::option::of(any::<bool>()),
        prop::option::of(1usize..=100),
        prop::option::of(any::<bool>()),
        prop::option::of(notification_strategy()),
        prop::option::of(output_format_strategy()),
    )
        .prop_map(
            |(lock_wait, autosweep, limit, strict, notifications, format)| Config {
                maximum_lock_wait_seconds: lock_wait,
                disable_autosweep: autosweep,
                upcoming_limit: limit,
                strict_status_transitions: strict,
                notifications,
                output_format: format,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 2000,
        .. ProptestConfig::default()
    })]

    // Set values in the higher-precedence config always win; unset ones keep the lower value
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(
            result.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );
        prop_assert_eq!(result.disable_autosweep, high.disable_autosweep.or(low.disable_autosweep));
        prop_assert_eq!(result.upcoming_limit, high.upcoming_limit.or(low.upcoming_limit));
        prop_assert_eq!(
            result.strict_status_transitions,
            high.strict_status_transitions.or(low.strict_status_transitions)
        );
        prop_assert_eq!(result.output_format, high.output_format.or(low.output_format));
    }

    // Merging a config into itself changes nothing
    #[test]
    fn config_merge_idempotent(config in config_strategy()) {
        let mut result = config.clone();
        ConfigMerger::merge_into(&mut result, &config);
        prop_assert_eq!(result, config);
    }

    // Merging into an empty config reproduces the source
    #[test]
    fn config_merge_into_default_is_identity(config in config_strategy()) {
        let mut result = Config::default();
        ConfigMerger::merge_into(&mut result, &config);
        prop_assert_eq!(result, config);
    }

    // Generated configs are within range, so merging two of them stays valid
    #[test]
    fn config_merge_preserves_validity(low in config_strategy(), high in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&low).is_ok());
        let mut result = low;
        ConfigMerger::merge_into(&mut result, &high);
        prop_assert!(ConfigValidator::validate(&result).is_ok());
    }

    // Out-of-range upcoming limits are always rejected
    #[test]
    fn upcoming_limit_out_of_range_rejected(limit in 101usize..10_000) {
        let config = Config { upcoming_limit: Some(limit), ..Default::default() };
        prop_assert!(ConfigValidator::validate(&config).is_err());
    }
}
