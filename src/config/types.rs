// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for presto-rs.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, JobsConfig, ProcessConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::process::{DEFAULT_READ_BUFFER_SIZE, LineEndings, lines::DEFAULT_MAX_LINE_LENGTH};
use crate::error::ConfigError;
use crate::logging::{LogFormat, LogLevel};
use crate::utility::encoding::Encoding;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-5).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-5).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// `text` or `json` lines in the log file.
    pub log_format: LogFormat,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
            log_format: LogFormat::Text,
        }
    }
}

/// How commands are scheduled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobsConfig {
    /// Maximum number of concurrently running commands; 0 means unlimited.
    pub slots: usize,
    /// Keep launching commands after one fails.
    pub keep_going: bool,
    /// Do not echo command lines before running them.
    pub silent: bool,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            slots: 1,
            keep_going: false,
            silent: false,
        }
    }
}

/// How child processes are launched and their output decoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessConfig {
    /// Shell executable, an absolute path or a name looked up on `PATH`.
    pub shell: String,
    /// Arguments placed before the command line.
    pub shell_args: Vec<String>,
    /// Size of a single non-blocking read.
    pub read_buffer_size: usize,
    /// Longest accepted output line, in bytes.
    pub max_line_length: usize,
    pub line_endings: LineEndings,
    pub encoding: Encoding,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            shell: default_shell().to_string(),
            shell_args: default_shell_args()
                .iter()
                .map(ToString::to_string)
                .collect(),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            line_endings: LineEndings::default(),
            encoding: Encoding::default(),
        }
    }
}

impl ProcessConfig {
    /// Checks values the type system cannot.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending key.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| ConfigError::InvalidValue {
            section: "process".to_string(),
            key: key.to_string(),
            message: message.to_string(),
        };

        if self.shell.trim().is_empty() {
            return Err(invalid("shell", "must not be empty"));
        }
        if self.read_buffer_size == 0 {
            return Err(invalid("read_buffer_size", "must be greater than 0"));
        }
        if self.max_line_length == 0 {
            return Err(invalid("max_line_length", "must be greater than 0"));
        }
        Ok(())
    }
}

/// Shell used to run command lines.
#[must_use]
pub const fn default_shell() -> &'static str {
    if cfg!(windows) { "pwsh" } else { "/bin/sh" }
}

/// Arguments passed to [`default_shell`] before the command line.
#[must_use]
pub const fn default_shell_args() -> &'static [&'static str] {
    if cfg!(windows) {
        &["-NoProfile", "-NonInteractive", "-Command"]
    } else {
        &["-c"]
    }
}
