// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and output multiplexing.
//!
//! ```text
//! ProcessLauncher::spawn("cc -c a.c", env)
//!   shell -c "cc -c a.c"   stdin=null  stdout+stderr --> one pipe
//!       --> ProcessHandle { id, OutputChannel, carry, exit_code }
//!
//! driver loop:
//!   wait(&handles)               suspend until any output or EOF is ready
//!   handle.pump(|line| ...)      drain without blocking, emit whole lines
//!       Pending | Terminated(code)
//! ```
//!
//! Everything runs on the caller's (current-thread) Tokio runtime; the
//! engine starts no threads and holds no locks.

#[cfg(unix)]
mod channel;
mod handle;
mod launcher;
pub mod lines;
mod waiter;
#[cfg(windows)]
mod windows;


use std::process::Stdio;

#[cfg(unix)]
use channel::OutputChannel;
#[cfg(windows)]
use windows::OutputChannel;

pub use handle::{ProcessHandle, ProcessId, PumpStatus};
pub use launcher::{DEFAULT_READ_BUFFER_SIZE, ProcessLauncher};
pub use lines::{LineAssembler, LineEndings};
pub use waiter::{wait, wait_timeout};

/// Result of one non-blocking read attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadOutcome {
    Data(usize),
    Pending,
    EndOfStream,
}

/// Write ends of an output channel, handed to the child.
#[derive(Debug)]
struct ChildOutput {
    stdout: Stdio,
    stderr: Stdio,
}
