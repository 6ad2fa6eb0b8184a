//! Integration tests for booking and reservation lifecycle commands.

mod common;

use common::{parse_json, TestEnv, ADMIN};
use predicates::prelude::*;

#[test]
fn test_guest_books_pending_reservation() {
    let env = TestEnv::with_catalog();
    env.add_guest("ana");

    let id = env.book(
        "ana",
        &["--room", "101", "--check-in", "2025-03-01", "--check-out", "2025-03-04", "--guests", "2"],
    );

    let output = env
        .command_as("ana")
        .args(["reservations", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let listed = parse_json(&output.stdout);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], id);
    assert_eq!(listed[0]["room_number"], "101");
    assert_eq!(listed[0]["status"], "pending");
}

#[test]
fn test_book_requires_actor() {
    let env = TestEnv::with_catalog();

    env.command()
        .args(["book", "--room", "101", "--check-in", "2025-03-02", "--check-out", "2025-03-03"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("--as"));
}

#[test]
fn test_book_as_unknown_identity() {
    let env = TestEnv::with_catalog();

    env.command_as("ghost")
        .args(["book", "--room", "101", "--check-in", "2025-03-02", "--check-out", "2025-03-03"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_book_rejections_exit_one() {
    let env = TestEnv::with_catalog();
    env.add_guest("ana");

    // Reversed dates
    env.command_as("ana")
        .args(["book", "--room", "101", "--check-in", "2025-03-05", "--check-out", "2025-03-02"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid date range"));

    // In the past
    env.command_as("ana")
        .args(["book", "--room", "101", "--check-in", "2025-02-27", "--check-out", "2025-03-02"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("in the past"));

    // Too many guests for a double
    env.command_as("ana")
        .args([
            "book", "--room", "101", "--check-in", "2025-03-02", "--check-out", "2025-03-03",
            "--guests", "3",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("maximum occupancy"));

    // Unknown room
    env.command_as("ana")
        .args(["book", "--room", "999", "--check-in", "2025-03-02", "--check-out", "2025-03-03"])
        .assert()
        .code(1);
}

#[test]
fn test_overlapping_booking_rejected() {
    let env = TestEnv::with_catalog();
    env.add_guest("ana");
    env.add_guest("ben");

    env.book("ana", &["--room", "101", "--check-in", "2025-03-02", "--check-out", "2025-03-05"]);

    env.command_as("ben")
        .args(["book", "--room", "101", "--check-in", "2025-03-04", "--check-out", "2025-03-06"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not available"));

    // Back-to-back is fine
    env.book("ben", &["--room", "101", "--check-in", "2025-03-05", "--check-out", "2025-03-06"]);
}

#[test]
fn test_guest_cannot_use_staff_options() {
    let env = TestEnv::with_catalog();
    env.add_guest("ana");

    env.command_as("ana")
        .args([
            "book", "--room", "101", "--check-in", "2025-03-02", "--check-out", "2025-03-03",
            "--status", "confirmed",
        ])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("unauthorized"));
}

#[test]
fn test_book_dry_run_stores_nothing() {
    let env = TestEnv::with_catalog();
    env.add_guest("ana");

    env.command_as("ana")
        .args([
            "book", "--room", "101", "--check-in", "2025-03-02", "--check-out", "2025-03-04",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Would book room 101 for 2 night(s), total 50000.00"));

    env.command_as("ana")
        .args(["reservations", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn test_confirmed_stay_occupies_room() {
    let env = TestEnv::with_catalog();
    env.add_guest("ana");

    env.book(
        ADMIN,
        &[
            "--room", "101", "--check-in", "2025-03-01", "--check-out", "2025-03-03", "--status",
            "confirmed", "--for-guest", "ana",
        ],
    );

    let output = env.command().args(["rooms", "--format", "json"]).output().unwrap();
    let rooms = parse_json(&output.stdout);
    let room_101 = rooms
        .as_array()
        .unwrap()
        .iter()
        .find(|room| room["number"] == "101")
        .unwrap()
        .clone();
    assert_eq!(room_101["state"], "occupied");
    assert_eq!(room_101["available"], false);

    env.command()
        .args(["check", "101"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("unavailable"));
}

#[test]
fn test_status_change_is_staff_only() {
    let env = TestEnv::with_catalog();
    env.add_guest("ana");
    let id = env.book("ana", &["--room", "101", "--check-in", "2025-03-02", "--check-out", "2025-03-03"]);

    env.command_as("ana")
        .args(["set-status", &id.to_string(), "confirmed"])
        .assert()
        .code(8);

    env.command_as(ADMIN)
        .args(["set-status", &id.to_string(), "confirmed"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{id} confirmed")));
}

#[test]
fn test_cancel_frees_the_nights() {
    let env = TestEnv::with_catalog();
    env.add_guest("ana");
    let id = env.book("ana", &["--room", "101", "--check-in", "2025-03-02", "--check-out", "2025-03-04"]);

    env.command()
        .args(["check", "101", "--check-in", "2025-03-03", "--check-out", "2025-03-05"])
        .assert()
        .code(1);

    env.command_as(ADMIN)
        .args(["cancel", &id.to_string()])
        .assert()
        .success();

    env.command()
        .args(["check", "101", "--check-in", "2025-03-03", "--check-out", "2025-03-05"])
        .assert()
        .success()
        .stdout("available\n");
}

#[test]
fn test_guest_deletes_own_reservation_only() {
    let env = TestEnv::with_catalog();
    env.add_guest("ana");
    env.add_guest("ben");
    let id = env.book("ana", &["--room", "101", "--check-in", "2025-03-02", "--check-out", "2025-03-03"]);

    env.command_as("ben")
        .args(["delete", &id.to_string()])
        .assert()
        .code(8);

    env.command_as("ana")
        .args(["delete", &id.to_string()])
        .assert()
        .success();

    env.command_as(ADMIN)
        .args(["reservations", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn test_update_requires_a_change() {
    let env = TestEnv::with_catalog();
    env.add_guest("ana");
    let id = env.book("ana", &["--room", "101", "--check-in", "2025-03-02", "--check-out", "2025-03-03"]);

    env.command_as(ADMIN)
        .args(["update", &id.to_string()])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("nothing to update"));
}

#[test]
fn test_update_moves_and_reprices() {
    let env = TestEnv::with_catalog();
    env.add_guest("ana");
    let id = env.book("ana", &["--room", "101", "--check-in", "2025-03-02", "--check-out", "2025-03-04"]);

    env.command_as(ADMIN)
        .args(["update", &id.to_string(), "--room", "201"])
        .assert()
        .success()
        .stdout(predicate::str::contains("room 201"))
        .stdout(predicate::str::contains("total 120000.00"));

    env.command()
        .args(["check", "101", "--check-in", "2025-03-02", "--check-out", "2025-03-04"])
        .assert()
        .success();
}

#[test]
fn test_maintenance_blocks_booking() {
    let env = TestEnv::with_catalog();
    env.add_guest("ana");

    env.command_as(ADMIN)
        .args(["set-room-state", "102", "maintenance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("102 available -> maintenance"));

    env.command_as("ana")
        .args(["book", "--room", "102", "--check-in", "2025-03-02", "--check-out", "2025-03-03"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("maintenance"));

    env.command_as("ana")
        .args(["set-room-state", "102", "available"])
        .assert()
        .code(8);
}

#[test]
fn test_sweep_completes_past_stays() {
    let env = TestEnv::with_catalog();
    env.add_guest("ana");
    let id = env.book(
        ADMIN,
        &[
            "--room", "101", "--check-in", "2025-03-01", "--check-out", "2025-03-03", "--status",
            "confirmed", "--for-guest", "ana",
        ],
    );

    // Not over yet
    env.command().args(["sweep"]).assert().success().stdout("0\n");

    env.command_on("2025-03-05")
        .args(["sweep", "--dry-run"])
        .assert()
        .success()
        .stdout("1\n")
        .stderr(predicate::str::contains("Would complete 1 reservation(s)"));

    env.command_on("2025-03-05")
        .args(["sweep"])
        .assert()
        .success()
        .stdout("1\n");

    let output = env
        .command_on("2025-03-05")
        .args(["--as", ADMIN, "reservations", "--format", "json"])
        .output()
        .unwrap();
    let listed = parse_json(&output.stdout);
    assert_eq!(listed[0]["id"], id);
    assert_eq!(listed[0]["status"], "completed");
}
