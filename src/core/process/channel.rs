// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Combined stdout/stderr stream of one child (Unix).
//!
//! ```text
//! std::io::pipe()  --> (PipeReader, PipeWriter)
//!   writer          --> child stdout
//!   writer.clone()  --> child stderr
//!   reader          --> tokio pipe::Receiver (O_NONBLOCK, registered)
//!
//! try_read(buf)  Data(n) | Pending | EndOfStream
//! readable()     resolves once data or EOF is available
//! ```

use std::io::{self, PipeReader};
use std::os::fd::OwnedFd;
use std::process::Stdio;

use tokio::net::unix::pipe;

use super::{ChildOutput, ReadOutcome};
use crate::error::LaunchError;

/// Read end of a child's combined output pipe.
///
/// The write ends live only in the child once spawning is complete, so a
/// zero-length read means every writer has closed.
#[derive(Debug)]
pub struct OutputChannel {
    receiver: pipe::Receiver,
}

impl OutputChannel {
    /// Creates the pipe and returns the registered read end together with
    /// the two write ends destined for the child.
    ///
    /// Both pipe ends are close-on-exec, so sibling children never inherit
    /// them. On error, everything created so far is dropped.
    pub(super) fn open(command: &str) -> Result<(Self, ChildOutput), LaunchError> {
        let (reader, writer) = io::pipe().map_err(|source| LaunchError::Pipe {
            command: command.to_string(),
            source,
        })?;
        let stderr_writer = writer.try_clone().map_err(|source| LaunchError::Duplicate {
            command: command.to_string(),
            source,
        })?;
        let channel = Self::from_reader(reader).map_err(|source| LaunchError::Register {
            command: command.to_string(),
            source,
        })?;

        Ok((
            channel,
            ChildOutput {
                stdout: Stdio::from(writer),
                stderr: Stdio::from(stderr_writer),
            },
        ))
    }

    /// Switches `reader` to non-blocking mode and registers it with the
    /// runtime's I/O driver.
    fn from_reader(reader: PipeReader) -> io::Result<Self> {
        let receiver = pipe::Receiver::from_owned_fd(OwnedFd::from(reader))?;
        Ok(Self { receiver })
    }

    /// Attempts one non-blocking read into `buf`.
    ///
    /// `buf` must not be empty, otherwise a successful read cannot be told
    /// apart from end-of-stream.
    pub(super) fn try_read(&self, buf: &mut [u8]) -> io::Result<ReadOutcome> {
        debug_assert!(!buf.is_empty());
        loop {
            match self.receiver.try_read(buf) {
                Ok(0) => return Ok(ReadOutcome::EndOfStream),
                Ok(n) => return Ok(ReadOutcome::Data(n)),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(ReadOutcome::Pending),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    /// Resolves once a read would not block.
    pub(super) async fn readable(&self) -> io::Result<()> {
        self.receiver.readable().await
    }
}
