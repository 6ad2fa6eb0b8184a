//! Stderr logging behind the `log` facade.
//!
//! The library reports through `log::{debug, info, warn}`: reservation
//! writes and room-state changes at debug/info, swallowed notification
//! failures and permitted-but-unusual status changes at warn. A binary
//! picks the verbosity with [`init_logger`] and calls [`Logger::install`].

use std::env;
use std::fmt;
use std::str::FromStr;

/// Environment variable selecting the log level.
pub const LOG_MODE_ENV: &str = "HOTEL_LOG_MODE";

/// How much the logger lets through.
///
/// # Examples
///
/// ```
/// use hotel::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert_eq!("VERBOSE".parse::<LogLevel>().unwrap(), LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Nothing at all.
    Quiet,
    /// Errors and warnings.
    #[default]
    Normal,
    /// Everything down to debug, tagged with the emitting module.
    Verbose,
}

impl LogLevel {
    /// The most detailed `log` level shown at this verbosity.
    #[must_use]
    pub const fn level_filter(self) -> log::LevelFilter {
        match self {
            Self::Quiet => log::LevelFilter::Off,
            Self::Normal => log::LevelFilter::Warn,
            Self::Verbose => log::LevelFilter::Debug,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Quiet => "quiet",
            Self::Normal => "normal",
            Self::Verbose => "verbose",
        })
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }
}

/// A `log` backend writing one line per record to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a logger at `level`.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Formats `record` the way it is written to stderr.
    ///
    /// Verbose output carries the emitting module so a booking can be
    /// followed through planning, execution and derivation.
    #[must_use]
    pub fn format_record(&self, record: &log::Record<'_>) -> String {
        let tag = match record.level() {
            log::Level::Error => "error",
            log::Level::Warn => "warning",
            log::Level::Info => "info",
            log::Level::Debug | log::Level::Trace => "debug",
        };
        if self.level == LogLevel::Verbose {
            format!("{tag} [{}]: {}", record.target(), record.args())
        } else {
            format!("{tag}: {}", record.args())
        }
    }

    /// Installs this logger as the global `log` backend.
    ///
    /// Returns `false` if a logger was already installed, which leaves the
    /// existing one in place.
    pub fn install(self) -> bool {
        let installed = log::set_logger(Box::leak(Box::new(self))).is_ok();
        if installed {
            log::set_max_level(self.level.level_filter());
        }
        installed
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.level.level_filter()
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", self.format_record(record));
        }
    }

    fn flush(&self) {}
}

/// Picks the logger for a run.
///
/// `verbose` wins over `quiet`; with neither flag `HOTEL_LOG_MODE` is
/// consulted, and an unparsable value falls back to normal.
///
/// # Examples
///
/// ```
/// use hotel::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, true).level(), LogLevel::Verbose);
/// assert_eq!(init_logger(false, true).level(), LogLevel::Quiet);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    let level = if verbose {
        LogLevel::Verbose
    } else if quiet {
        LogLevel::Quiet
    } else {
        env::var(LOG_MODE_ENV)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    };
    Logger::new(level)
}
