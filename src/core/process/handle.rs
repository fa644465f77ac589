// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! One spawned child and its output state.
//!
//! ```text
//! pump(sink)
//!   overflowed           --> PumpError::LineTooLong  (again, every call)
//!   Terminated           --> Terminated(code)       (no-op)
//!   loop try_read:
//!     Data(n)            --> [transcode] --> assemble --> sink(line)...
//!     Pending            --> pending = true          --> Pending
//!     EndOfStream        --> flush carry --> reap --> Terminated(code)
//!     Err                --> PumpError::Read         (still running)
//! ```
//!
//! A line over the limit is fatal to the handle: lines completed before it
//! still reach the sink, then every later pump repeats the error instead of
//! resuming mid-stream.
//!
//! The child and channel live inside `State::Running`; replacing it with
//! `State::Terminated` drops both exactly once, in the same assignment that
//! records the exit code.

use std::fmt;
use std::process::ExitStatus;

use tokio::process::Child;
use tracing::trace;

use super::lines::{Carry, LineAssembler};
use super::{OutputChannel, ReadOutcome};
use crate::error::PumpError;
use crate::utility::encoding::{Encoding, StreamDecoder};

/// Identity of a spawned process, stable for the handle's whole lifetime.
///
/// Serials are assigned by the launcher that spawned the process and are
/// never reused by it, unlike OS process ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessId(u64);

impl ProcessId {
    #[must_use]
    pub const fn new(serial: u64) -> Self {
        Self(serial)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome of a successful [`ProcessHandle::pump`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpStatus {
    /// No more data right now; wait and pump again.
    Pending,
    /// End-of-stream was reached and the child has been reaped.
    Terminated(u32),
}

/// How a handle turns bytes into lines.
#[derive(Debug, Clone, Copy)]
pub(super) struct OutputSettings {
    pub(super) assembler: LineAssembler,
    pub(super) encoding: Encoding,
    pub(super) read_buffer_size: usize,
}

enum State {
    Running { child: Child, channel: OutputChannel },
    Terminated { exit_code: u32 },
}

/// A spawned child process.
///
/// Created by [`ProcessLauncher::spawn`](super::ProcessLauncher::spawn) and
/// mutated only by [`pump`](Self::pump).
pub struct ProcessHandle {
    id: ProcessId,
    pid: Option<u32>,
    command: String,
    state: State,
    pending: bool,
    carry: Carry,
    assembler: LineAssembler,
    transcoder: Option<StreamDecoder>,
    encoding: Encoding,
    buffer: Box<[u8]>,
    /// Limit that was exceeded, once a line has grown too long.
    overflowed: Option<usize>,
}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("id", &self.id)
            .field("pid", &self.pid)
            .field("command", &self.command)
            .field("pending", &self.pending)
            .field("exit_code", &self.exit_code())
            .finish_non_exhaustive()
    }
}

impl ProcessHandle {
    pub(super) fn new(
        id: ProcessId,
        command: String,
        child: Child,
        channel: OutputChannel,
        settings: OutputSettings,
    ) -> Self {
        Self {
            id,
            pid: child.id(),
            command,
            state: State::Running { child, channel },
            pending: false,
            carry: Carry::default(),
            assembler: settings.assembler,
            transcoder: settings.encoding.stream_decoder(),
            encoding: settings.encoding.line_encoding(),
            buffer: vec![0; settings.read_buffer_size.max(1)].into_boxed_slice(),
            overflowed: None,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ProcessId {
        self.id
    }

    /// OS process id, if the OS reported one at spawn time.
    #[must_use]
    pub const fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// The command line this process was spawned with.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// True if the last read found no data available yet.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        matches!(self.state, State::Terminated { .. })
    }

    /// The exit code, available once end-of-stream has been observed.
    #[must_use]
    pub const fn exit_code(&self) -> Option<u32> {
        match self.state {
            State::Terminated { exit_code } => Some(exit_code),
            State::Running { .. } => None,
        }
    }

    pub(super) const fn channel(&self) -> Option<&OutputChannel> {
        match &self.state {
            State::Running { channel, .. } => Some(channel),
            State::Terminated { .. } => None,
        }
    }

    /// Reads whatever output is available without blocking and hands every
    /// complete line to `sink`, in order.
    ///
    /// Only the end-of-stream path awaits: it collects the exit status of a
    /// child that has already closed its output.
    ///
    /// # Errors
    ///
    /// - [`PumpError::Read`] if the output stream fails.
    /// - [`PumpError::LineTooLong`] if a line exceeds the configured maximum.
    /// - [`PumpError::Sink`] if `sink` returns an error.
    /// - [`PumpError::Reap`] if the exit status cannot be collected.
    ///
    /// The handle stays non-terminated in every error case. After
    /// `LineTooLong` it no longer reads; later calls return the same error.
    pub async fn pump<F>(&mut self, mut sink: F) -> Result<PumpStatus, PumpError>
    where
        F: FnMut(&str) -> anyhow::Result<()>,
    {
        if let Some(limit) = self.overflowed {
            return Err(self.line_too_long(limit));
        }

        loop {
            let outcome = match &self.state {
                State::Terminated { exit_code } => return Ok(PumpStatus::Terminated(*exit_code)),
                State::Running { channel, .. } => channel.try_read(&mut self.buffer),
            };

            match outcome.map_err(|source| self.read_error(source))? {
                ReadOutcome::Data(len) => {
                    self.pending = false;
                    self.deliver(len, false, &mut sink)?;
                }
                ReadOutcome::Pending => {
                    self.pending = true;
                    return Ok(PumpStatus::Pending);
                }
                ReadOutcome::EndOfStream => {
                    self.pending = false;
                    return self.finish(&mut sink).await;
                }
            }
        }
    }

    /// Feeds the first `len` buffered bytes through transcoding and line
    /// assembly. `last` flushes whatever the transcoder still holds.
    fn deliver<F>(&mut self, len: usize, last: bool, sink: &mut F) -> Result<(), PumpError>
    where
        F: FnMut(&str) -> anyhow::Result<()>,
    {
        let raw = &self.buffer[..len];
        let chunk = match &mut self.transcoder {
            Some(decoder) => decoder.decode(raw, last),
            None => raw,
        };
        let carry = std::mem::take(&mut self.carry);

        match self.assembler.assemble(chunk, carry) {
            Ok(assembled) => {
                self.carry = assembled.carry;
                for line in &assembled.lines {
                    self.emit(line, sink)?;
                }
                Ok(())
            }
            Err(too_long) => {
                self.overflowed = Some(too_long.limit);
                for line in &too_long.completed {
                    self.emit(line, sink)?;
                }
                Err(self.line_too_long(too_long.limit))
            }
        }
    }

    fn emit<F>(&self, line: &[u8], sink: &mut F) -> Result<(), PumpError>
    where
        F: FnMut(&str) -> anyhow::Result<()>,
    {
        let text = self.encoding.decode(line);
        trace!(process = %self.id, line = %text, "output");
        sink(&text).map_err(|source| PumpError::Sink {
            id: self.id,
            command: self.command.clone(),
            source,
        })
    }

    async fn finish<F>(&mut self, sink: &mut F) -> Result<PumpStatus, PumpError>
    where
        F: FnMut(&str) -> anyhow::Result<()>,
    {
        self.deliver(0, true, sink)?;
        if !self.carry.is_empty() {
            let last = self.carry.take_partial();
            self.emit(&last, sink)?;
        }

        let waited = match &mut self.state {
            State::Running { child, .. } => child.wait().await,
            State::Terminated { exit_code } => return Ok(PumpStatus::Terminated(*exit_code)),
        };
        let status = waited.map_err(|source| PumpError::Reap {
            id: self.id,
            command: self.command.clone(),
            source,
        })?;

        let exit_code = exit_code_of(status);
        self.state = State::Terminated { exit_code };
        trace!(process = %self.id, exit_code, "terminated");
        Ok(PumpStatus::Terminated(exit_code))
    }

    fn line_too_long(&self, limit: usize) -> PumpError {
        PumpError::LineTooLong {
            id: self.id,
            command: self.command.clone(),
            limit,
        }
    }

    fn read_error(&self, source: std::io::Error) -> PumpError {
        PumpError::Read {
            id: self.id,
            command: self.command.clone(),
            source,
        }
    }
}

/// Maps an exit status to a code; a signal `n` is reported as `128 + n`.
#[cfg(unix)]
fn exit_code_of(status: ExitStatus) -> u32 {
    use std::os::unix::process::ExitStatusExt;

    match (status.code(), status.signal()) {
        (Some(code), _) => code.cast_unsigned(),
        (None, Some(signal)) => 128 + signal.cast_unsigned(),
        (None, None) => u32::MAX,
    }
}

#[cfg(windows)]
fn exit_code_of(status: ExitStatus) -> u32 {
    status.code().map_or(u32::MAX, i32::cast_unsigned)
}
