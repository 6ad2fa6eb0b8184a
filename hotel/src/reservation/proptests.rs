//! Property-based tests for `StayRange`, pricing and the status table.

use super::{quote_price, ReservationStatus, StayRange, TransitionCheck, TransitionPolicy};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

// Strategy for generating valid stays within a two-year window
fn stay_strategy() -> impl Strategy<Value = StayRange> {
    (0i64..730, 1i64..30).prop_map(|(offset, nights)| {
        let check_in = base_date() + Duration::days(offset);
        StayRange::new(check_in, check_in + Duration::days(nights)).unwrap()
    })
}

// Nightly rates with at most two decimal places
fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn status_strategy() -> impl Strategy<Value = ReservationStatus> {
    prop::sample::select(ReservationStatus::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 2000,
        .. ProptestConfig::default()
    })]

    // Overlap is symmetric
    #[test]
    fn overlap_is_symmetric(a in stay_strategy(), b in stay_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    // Overlap holds exactly when the stays share a night
    #[test]
    fn overlap_matches_shared_night(a in stay_strategy(), b in stay_strategy()) {
        let mut shared = false;
        let mut day = a.check_in();
        while day < a.check_out() {
            if b.contains(day) {
                shared = true;
                break;
            }
            day += Duration::days(1);
        }
        prop_assert_eq!(a.overlaps(&b), shared);
    }

    // A stay starting on another's check-out day never overlaps it
    #[test]
    fn back_to_back_never_overlaps(a in stay_strategy(), nights in 1i64..30) {
        let next = StayRange::new(a.check_out(), a.check_out() + Duration::days(nights)).unwrap();
        prop_assert!(!a.overlaps(&next));
        prop_assert!(!next.overlaps(&a));
    }

    // Every valid stay has at least one night and overlaps itself
    #[test]
    fn stay_has_nights(a in stay_strategy()) {
        prop_assert!(a.nights() >= 1);
        prop_assert!(a.overlaps(&a));
    }

    // Inverted or empty ranges are rejected
    #[test]
    fn inverted_range_rejected(offset in 0i64..730, back in 0i64..30) {
        let check_in = base_date() + Duration::days(offset);
        let check_out = check_in - Duration::days(back);
        prop_assert!(StayRange::new(check_in, check_out).is_err());
    }

    // With two-decimal rates the price is exact
    #[test]
    fn price_is_nights_times_rate(stay in stay_strategy(), rate in rate_strategy()) {
        let price = stay.price(rate).unwrap();
        prop_assert_eq!(price, Decimal::from(stay.nights()) * rate);
        prop_assert!(price.scale() <= 2);
    }

    // Price grows with each extra night
    #[test]
    fn price_monotonic_in_nights(nights in 1i64..365, rate in rate_strategy()) {
        prop_assert!(quote_price(nights + 1, rate).unwrap() > quote_price(nights, rate).unwrap());
    }

    // The permissive policy accepts everything the strict one does
    #[test]
    fn permissive_accepts_superset(from in status_strategy(), to in status_strategy()) {
        let strict = TransitionPolicy::Strict.check(from, to);
        let permissive = TransitionPolicy::Permissive.check(from, to);
        prop_assert!(permissive.is_ok());
        if let Ok(check) = strict {
            prop_assert_eq!(permissive.unwrap(), check);
            prop_assert_ne!(check, TransitionCheck::Override);
        }
    }

    // Status names parse back to the same status
    #[test]
    fn status_name_parses(status in status_strategy()) {
        let parsed: ReservationStatus = status.as_str().to_uppercase().parse().unwrap();
        prop_assert_eq!(parsed, status);
    }
}
