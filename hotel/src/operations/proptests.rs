//! Property-based tests for operations module.
//!
//! These tests drive random request sequences through the plan-execute
//! pattern and check the booking invariants on what ends up stored.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal_macros::dec;

use crate::catalog::RoomState;
use crate::database::test_util::{create_test_database, date, seed_guest, seed_room};
use crate::database::Database;
use crate::error::Error;
use crate::reservation::{ReservationStatus, StayRange};

use super::{derive_room_state, BookingOptions, BookingPlan, PlanExecutor};

const ROOMS: [&str; 2] = ["101", "102"];

fn today() -> NaiveDate {
    date(2025, 3, 1)
}

#[derive(Debug, Clone)]
struct Request {
    room: usize,
    offset: u64,
    nights: u64,
    confirmed: bool,
}

fn request_strategy() -> impl Strategy<Value = Request> {
    (0..ROOMS.len(), 0u64..30, 1u64..6, any::<bool>()).prop_map(|(room, offset, nights, confirmed)| {
        Request {
            room,
            offset,
            nights,
            confirmed,
        }
    })
}

fn stay_of(request: &Request) -> StayRange {
    let check_in = today() + Days::new(request.offset);
    StayRange::new(check_in, check_in + Days::new(request.nights)).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    // No two active reservations on one room ever share a night, and a
    // request is rejected exactly when it would have broken that rule or
    // a confirmed stay already holds the room today.
    #[test]
    fn bookings_never_overlap(requests in prop::collection::vec(request_strategy(), 1..25)) {
        let db = create_test_database();
        let staff = seed_guest(&db, "desk", true);
        for number in ROOMS {
            seed_room(&db, number, "double", dec!(100.00), 2);
        }

        let mut accepted: Vec<(usize, StayRange, bool)> = Vec::new();
        for request in &requests {
            let stay = stay_of(request);
            let status = if request.confirmed {
                ReservationStatus::Confirmed
            } else {
                ReservationStatus::Pending
            };
            let options = BookingOptions::new(ROOMS[request.room], stay.check_in(), stay.check_out(), 1)
                .with_status(status);

            let expected_conflict = accepted.iter().any(|(room, existing, confirmed)| {
                *room == request.room
                    && (existing.overlaps(&stay) || (*confirmed && existing.contains(today())))
            });

            let outcome = BookingPlan::new(options, &staff, today())
                .build_plan(db.connection())
                .and_then(|plan| PlanExecutor::new(db.connection()).execute(&plan));

            match outcome {
                Ok(result) => {
                    prop_assert!(!expected_conflict);
                    let created = result.reservation().unwrap();
                    prop_assert_eq!(created.total_price(), stay.price(dec!(100.00)).unwrap());
                    accepted.push((request.room, stay, request.confirmed));
                }
                Err(Error::RoomUnavailable { .. }) => prop_assert!(expected_conflict),
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
        }

        for number in ROOMS {
            let room = Database::require_room(db.connection(), number).unwrap();
            let active: Vec<_> = Database::list_room_reservations(db.connection(), room.id)
                .unwrap()
                .into_iter()
                .filter(|r| r.is_active())
                .collect();
            for (i, a) in active.iter().enumerate() {
                for b in &active[i + 1..] {
                    prop_assert!(!a.stay().overlaps(&b.stay()));
                }
            }
        }
    }

    // After any booking sequence the stored room state is what derivation
    // computes, and deriving again changes nothing.
    #[test]
    fn derived_state_is_stable(requests in prop::collection::vec(request_strategy(), 1..15)) {
        let db = create_test_database();
        let staff = seed_guest(&db, "desk", true);
        for number in ROOMS {
            seed_room(&db, number, "double", dec!(100.00), 2);
        }

        for request in &requests {
            let stay = stay_of(request);
            let options = BookingOptions::new(ROOMS[request.room], stay.check_in(), stay.check_out(), 1)
                .with_status(if request.confirmed {
                    ReservationStatus::Confirmed
                } else {
                    ReservationStatus::Pending
                });
            if let Ok(plan) = BookingPlan::new(options, &staff, today()).build_plan(db.connection()) {
                PlanExecutor::new(db.connection()).execute(&plan).unwrap();
            }
        }

        for number in ROOMS {
            let room = Database::require_room(db.connection(), number).unwrap();
            prop_assert_ne!(room.state, RoomState::Maintenance);
            let occupied = Database::find_occupying(db.connection(), room.id, today()).unwrap().is_some();
            if occupied {
                prop_assert_eq!(room.state, RoomState::Occupied);
            }
            prop_assert!(derive_room_state(db.connection(), room.id, today()).unwrap().is_none());
        }
    }
}
