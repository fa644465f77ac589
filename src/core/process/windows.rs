// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Combined stdout/stderr stream of one child (Windows).
//!
//! ```text
//! ServerOptions (inbound, byte mode) --> NamedPipeServer  (overlapped, parent)
//! OpenOptions::write(name)           --> File             (child stdout)
//!   file.try_clone()                 --> File             (child stderr)
//!
//! first readable(): connect() completes immediately (client already open)
//! ERROR_BROKEN_PIPE on read --> EndOfStream
//! ```

use std::cell::Cell;
use std::fs::OpenOptions;
use std::io;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::net::windows::named_pipe::{NamedPipeServer, PipeMode, ServerOptions};

use super::{ChildOutput, ReadOutcome};
use crate::error::LaunchError;

/// `ConnectNamedPipe` result when the client connected and already closed.
const ERROR_NO_DATA: i32 = 232;

/// Uniquifies pipe names within this process.
static PIPE_SERIAL: AtomicU64 = AtomicU64::new(0);

/// Server end of a child's combined output pipe.
#[derive(Debug)]
pub struct OutputChannel {
    server: NamedPipeServer,
    connected: Cell<bool>,
}

impl OutputChannel {
    /// Creates the pipe and returns the server end together with the two
    /// client handles destined for the child.
    pub(super) fn open(command: &str) -> Result<(Self, ChildOutput), LaunchError> {
        let name = format!(
            r"\\.\pipe\presto-{}-{}",
            std::process::id(),
            PIPE_SERIAL.fetch_add(1, Ordering::Relaxed)
        );

        let server = ServerOptions::new()
            .first_pipe_instance(true)
            .access_inbound(true)
            .access_outbound(false)
            .pipe_mode(PipeMode::Byte)
            .create(&name)
            .map_err(|source| LaunchError::Register {
                command: command.to_string(),
                source,
            })?;
        let writer = OpenOptions::new()
            .write(true)
            .open(&name)
            .map_err(|source| LaunchError::Pipe {
                command: command.to_string(),
                source,
            })?;
        let stderr_writer = writer.try_clone().map_err(|source| LaunchError::Duplicate {
            command: command.to_string(),
            source,
        })?;

        Ok((
            Self {
                server,
                connected: Cell::new(false),
            },
            ChildOutput {
                stdout: Stdio::from(writer),
                stderr: Stdio::from(stderr_writer),
            },
        ))
    }

    /// Attempts one non-blocking read into `buf`.
    ///
    /// Reports `Pending` until the first [`readable`](Self::readable) call
    /// has completed the server side of the connection.
    pub(super) fn try_read(&self, buf: &mut [u8]) -> io::Result<ReadOutcome> {
        debug_assert!(!buf.is_empty());
        if !self.connected.get() {
            return Ok(ReadOutcome::Pending);
        }
        match self.server.try_read(buf) {
            Ok(0) => Ok(ReadOutcome::EndOfStream),
            Ok(n) => Ok(ReadOutcome::Data(n)),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(ReadOutcome::Pending),
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(ReadOutcome::EndOfStream),
            Err(e) => Err(e),
        }
    }

    /// Resolves once a read would not block.
    pub(super) async fn readable(&self) -> io::Result<()> {
        if !self.connected.get() {
            match self.server.connect().await {
                // The child already closed its end; the next read sees EOF.
                Err(e) if e.raw_os_error() != Some(ERROR_NO_DATA) => return Err(e),
                _ => {}
            }
            self.connected.set(true);
            return Ok(());
        }
        self.server.readable().await
    }
}
