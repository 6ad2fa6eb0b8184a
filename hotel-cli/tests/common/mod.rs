//! Common test utilities for CLI integration tests.
//!
//! Every test gets its own data directory and a fixed "today" of
//! 2025-03-01, so date rules do not depend on when the suite runs.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The day every command is pinned to.
pub const TODAY: &str = "2025-03-01";

/// Superuser registered by [`TestEnv::init_with_admin`].
pub const ADMIN: &str = "desk";

const HOTEL_ENV_VARS: [&str; 12] = [
    "HOTEL_DATA_DIR",
    "HOTEL_BUSY_TIMEOUT",
    "HOTEL_DISABLE_AUTOINIT",
    "HOTEL_USER",
    "HOTEL_TODAY",
    "HOTEL_MAXIMUM_LOCK_WAIT_SECONDS",
    "HOTEL_DISABLE_AUTOSWEEP",
    "HOTEL_UPCOMING_LIMIT",
    "HOTEL_STRICT_STATUS_TRANSITIONS",
    "HOTEL_NOTIFICATIONS_ENABLED",
    "HOTEL_NOTIFICATIONS_OUTBOX",
    "HOTEL_OUTPUT_FORMAT",
];

/// Test environment with an isolated data directory.
pub struct TestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the hotel data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment; the data directory is not created.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("hotel-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// The hotel binary with no flags and a clean environment.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("hotel").expect("Failed to find hotel binary");
        cmd.current_dir(&self.temp_path);
        for var in HOTEL_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// The hotel binary with `--data-dir` and `--today` set.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir).arg("--today").arg(TODAY);
        cmd
    }

    /// The hotel binary with `--data-dir` set and pinned to `day`.
    pub fn command_on(&self, day: &str) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir).arg("--today").arg(day);
        cmd
    }

    /// [`Self::command`] acting as `username`.
    pub fn command_as(&self, username: &str) -> Command {
        let mut cmd = self.command();
        cmd.arg("--as").arg(username);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Path of the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("hotel.db")
    }

    /// Initialize the data directory with the `desk` superuser.
    pub fn init_with_admin(&self) {
        self.command()
            .args(["init", "--admin", ADMIN, "--email", "desk@example.com"])
            .assert()
            .success();
    }

    /// Register a plain guest and return its id.
    pub fn add_guest(&self, username: &str) -> i64 {
        let output = self
            .command()
            .args(["add-guest", username, "--email"])
            .arg(format!("{username}@example.com"))
            .output()
            .expect("Failed to run add-guest");
        assert!(output.status.success(), "add-guest {username} failed");
        parse_id(&output.stdout)
    }

    /// Initialize with the superuser and a small catalog: doubles 101 and
    /// 102 at 25000.00 for two, and suite 201 at 60000.00 for four.
    pub fn with_catalog() -> Self {
        let env = Self::new();
        env.init_with_admin();
        env.command_as(ADMIN)
            .args(["add-room-type", "double", "--rate", "25000.00", "--max-occupancy", "2"])
            .assert()
            .success();
        env.command_as(ADMIN)
            .args(["add-room-type", "suite", "--rate", "60000.00", "--max-occupancy", "4"])
            .assert()
            .success();
        for (number, room_type, floor) in [("101", "double", "1"), ("102", "double", "1"), ("201", "suite", "2")] {
            env.command_as(ADMIN)
                .args(["add-room", number, "--type", room_type, "--floor", floor])
                .assert()
                .success();
        }
        env
    }

    /// Book as `username` and return the reservation id.
    pub fn book(&self, username: &str, args: &[&str]) -> i64 {
        let output = self
            .command_as(username)
            .arg("book")
            .args(args)
            .output()
            .expect("Failed to run book");
        assert!(
            output.status.success(),
            "book failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        parse_id(&output.stdout)
    }
}

/// Parse an id printed alone on stdout.
pub fn parse_id(stdout: &[u8]) -> i64 {
    String::from_utf8_lossy(stdout)
        .trim()
        .parse()
        .expect("stdout should be a single id")
}

/// Parse JSON printed on stdout.
#[allow(dead_code)]
pub fn parse_json(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).expect("stdout should be JSON")
}
