//! Configuration system for the hotel booking core.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and project `hotel.yaml`)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of every value before use
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`HOTEL_*`)
//! 3. Project config (`hotel.yaml`, nearest ancestor of the working directory)
//! 4. User config (`<data_dir>/config.yaml`)
//! 5. Built-in defaults
//!
//! # Examples
//!
//! Loading from a specific directory:
//!
//! ```no_run
//! use hotel::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/srv/front-desk"))
//!     .build()
//!     .unwrap();
//!
//! println!("showing {} upcoming stays per room", config.upcoming_limit());
//! ```
//!
//! Programmatic configuration:
//!
//! ```
//! use hotel::config::{Config, ConfigBuilder};
//! use hotel::TransitionPolicy;
//!
//! let custom = Config {
//!     strict_status_transitions: Some(true),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.transition_policy(), TransitionPolicy::Strict);
//! ```

mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, PROJECT_CONFIG_FILE, USER_CONFIG_FILE};
pub use merger::ConfigMerger;
pub use schema::{Config, NotificationConfig, OutputFormat, DEFAULT_UPCOMING_LIMIT};
pub use validator::ConfigValidator;

#[cfg(test)]
mod proptests;
