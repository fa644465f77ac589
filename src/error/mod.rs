// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            PrestoError (~24 bytes)
//!                   |
//!   +------+--------+-------+------+------+
//!   |      |        |       |      |      |
//!   v      v        v       v      v      v
//! Launch  Pump    Wait   Config   Io   Other
//!  Box    Box     Box     Box    Box  Box<str>
//!
//! Sub-errors:
//!   Launch  ShellNotFound, Pipe, Duplicate, Register, Spawn
//!   Pump    Read, LineTooLong, Reap, Sink
//!   Wait    Empty, AllTerminated, Readiness
//!   Config  InvalidValue, InvalidOverride, InvalidAssignment, NotFound
//! ```
//!
//! "Not ready yet" and "end-of-stream" are never errors: they are
//! [`PumpStatus`](crate::core::process::PumpStatus) values.

use std::io;

use thiserror::Error;

use crate::core::process::ProcessId;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`PrestoError`].
pub type PrestoResult<T> = std::result::Result<T, PrestoError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum small on the stack.
#[derive(Debug, Error)]
pub enum PrestoError {
    /// A child process could not be launched.
    #[error("launch error: {0}")]
    Launch(#[from] Box<LaunchError>),

    /// Output of a running child could not be processed.
    #[error("pump error: {0}")]
    Pump(#[from] Box<PumpError>),

    /// The wait primitive was misused or failed.
    #[error("wait error: {0}")]
    Wait(#[from] Box<WaitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for PrestoError {
                fn from(err: $error) -> Self {
                    PrestoError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    LaunchError => Launch,
    PumpError => Pump,
    WaitError => Wait,
    ConfigError => Config,
    io::Error => Io,
}

// --- Launch Errors ---

/// Failure to start a child process.
///
/// Every resource acquired for the failed attempt has already been released
/// when one of these is returned.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The configured shell could not be resolved.
    #[error("shell not found: '{shell}'")]
    ShellNotFound { shell: String },

    /// The combined output pipe could not be created.
    #[error("failed to create output pipe for '{command}'")]
    Pipe {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The write end of the output pipe could not be duplicated for stderr.
    #[error("failed to duplicate output pipe for '{command}'")]
    Duplicate {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The read end could not be registered for non-blocking reads.
    #[error("failed to register output pipe for '{command}'")]
    Register {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The OS refused to create the process.
    #[error("failed to spawn '{command}'")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
}

// --- Pump Errors ---

/// Failure while processing the output of a running child.
///
/// The handle is not marked terminated; the driver decides whether to
/// abandon the job.
#[derive(Debug, Error)]
pub enum PumpError {
    /// Reading the combined output stream failed.
    #[error("failed to read output of process {id} ('{command}')")]
    Read {
        id: ProcessId,
        command: String,
        #[source]
        source: io::Error,
    },

    /// A single line grew past the configured maximum.
    #[error("line from process {id} ('{command}') exceeds {limit} bytes")]
    LineTooLong {
        id: ProcessId,
        command: String,
        limit: usize,
    },

    /// The exit status could not be collected after end-of-stream.
    #[error("failed to collect exit status of process {id} ('{command}')")]
    Reap {
        id: ProcessId,
        command: String,
        #[source]
        source: io::Error,
    },

    /// The line sink rejected a line.
    #[error("output sink failed for process {id} ('{command}'): {source}")]
    Sink {
        id: ProcessId,
        command: String,
        #[source]
        source: anyhow::Error,
    },
}

impl PumpError {
    /// Returns the process this error belongs to.
    #[must_use]
    pub const fn process(&self) -> ProcessId {
        match self {
            Self::Read { id, .. }
            | Self::LineTooLong { id, .. }
            | Self::Reap { id, .. }
            | Self::Sink { id, .. } => *id,
        }
    }
}

// --- Wait Errors ---

/// Misuse or failure of the wait primitive.
#[derive(Debug, Error)]
pub enum WaitError {
    /// No handles were supplied.
    #[error("no processes to wait on")]
    Empty,

    /// Every supplied handle has already terminated.
    #[error("all {count} processes have already terminated")]
    AllTerminated { count: usize },

    /// Polling an output stream for readiness failed.
    #[error("failed waiting for process output")]
    Readiness(#[source] io::Error),
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// A `--set` override was not of the form `section.key=value`.
    #[error("invalid override '{0}', expected 'section.key=value'")]
    InvalidOverride(String),

    /// An environment assignment was not of the form `NAME=value`.
    #[error("invalid assignment '{0}', expected 'NAME=value'")]
    InvalidAssignment(String),

    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),
}
