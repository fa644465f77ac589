// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for presto-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. presto.toml (cwd, optional)
//! 3. --ini files
//! 4. PRESTO_* env vars
//! 5. --set overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! PRESTO_JOBS__SLOTS=4                 → jobs.slots = 4
//! PRESTO_PROCESS__LINE_ENDINGS=any     → process.line_endings = "any"
//! PRESTO_GLOBAL__OUTPUT_LOG_LEVEL=4    → global.output_log_level = 4
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::logging::LogConfig;

use loader::ConfigLoader;
use types::{GlobalConfig, JobsConfig, ProcessConfig};

/// Name of the configuration file picked up from the working directory.
pub const CONFIG_FILE_NAME: &str = "presto.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "PRESTO";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Job scheduling.
    pub jobs: JobsConfig,
    /// Child process launching.
    pub process: ProcessConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use presto_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("presto.toml")
    ///     .with_env_prefix("PRESTO")
    ///     .apply_override("jobs.slots=4")?
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file (simple API).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validates values that deserialize fine but make no sense.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending key.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.process.validate()
    }

    /// Logging settings derived from `[global]`.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        LogConfig::builder()
            .with_console_level(self.global.output_log_level)
            .with_file_level(self.global.file_log_level)
            .maybe_with_log_file(self.global.log_file.clone())
            .with_file_format(self.global.log_format)
            .build()
    }

    /// Renders the effective configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
