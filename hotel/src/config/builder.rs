//! Configuration builder.
//!
//! Assembles the final [`Config`] from files, environment variables and
//! programmatic overrides, then validates it.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builder for loading configuration with precedence.
///
/// # Examples
///
/// ```
/// use hotel::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config { upcoming_limit: Some(5), ..Default::default() })
///     .build()
///     .unwrap();
/// assert_eq!(config.upcoming_limit(), 5);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Create a builder that loads files and environment variables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory to start the `hotel.yaml` search from (default: current dir).
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Data directory holding the user `config.yaml`.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Do not read any configuration file.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Do not apply `HOTEL_*` environment overrides.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Programmatic overrides, applied last.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Load, merge and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be read or parsed, an
    /// environment variable is malformed, or the result fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = if self.skip_files {
            Config::default()
        } else {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            let sources = ConfigLoader::load_all(&working_dir, self.data_dir.as_deref())?;
            for source in &sources {
                ConfigValidator::validate(&source.config)?;
            }
            ConfigMerger::merge(sources)
        };

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_defaults() {
        let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_project_file_overrides_user_file() {
        let data_dir = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(
            data_dir.path().join("config.yaml"),
            "upcoming_limit: 2\ndisable_autosweep: true\n",
        )
        .unwrap();
        fs::write(project.path().join("hotel.yaml"), "upcoming_limit: 6\n").unwrap();

        let config = ConfigBuilder::new()
            .with_working_dir(project.path())
            .with_data_dir(data_dir.path())
            .skip_env()
            .build()
            .unwrap();

        assert_eq!(config.upcoming_limit(), 6);
        assert!(config.autosweep_disabled());
    }

    #[test]
    fn test_programmatic_overrides_win() {
        let project = TempDir::new().unwrap();
        let data_dir = TempDir::new().unwrap();
        fs::write(project.path().join("hotel.yaml"), "upcoming_limit: 6\n").unwrap();

        let config = ConfigBuilder::new()
            .with_working_dir(project.path())
            .with_data_dir(data_dir.path())
            .skip_env()
            .with_config(Config {
                upcoming_limit: Some(1),
                ..Default::default()
            })
            .build()
            .unwrap();

        assert_eq!(config.upcoming_limit(), 1);
    }

    #[test]
    fn test_invalid_file_value_rejected() {
        let project = TempDir::new().unwrap();
        let data_dir = TempDir::new().unwrap();
        fs::write(project.path().join("hotel.yaml"), "upcoming_limit: 0\n").unwrap();

        let result = ConfigBuilder::new()
            .with_working_dir(project.path())
            .with_data_dir(data_dir.path())
            .skip_env()
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_override_rejected() {
        let result = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config(Config {
                maximum_lock_wait_seconds: Some(0),
                ..Default::default()
            })
            .build();
        assert!(result.is_err());
    }
}
