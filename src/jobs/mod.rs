// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Job runner: drives many commands through the process engine.
//!
//! ```text
//! JobRunner::new(launcher)
//!   .with_env()  .with_slots()  .with_flags()  .with_cancel_token()
//!   .run(&commands, out).await
//!
//!   loop:
//!     launch while slots free        (stop on failure unless KEEP_GOING,
//!                                     or once cancelled)
//!     wait(running) | cancelled
//!     pump every running job         lines --> out
//!     reap terminated jobs           --> JobOutcome
//!   --> RunSummary (in command order)
//! ```
//!
//! Running children are never killed; an interrupt only stops new launches.

use std::collections::{BTreeMap, VecDeque};
use std::io::Write;

use bitflags::bitflags;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::core::env::Env;
use crate::core::process::{ProcessHandle, ProcessId, ProcessLauncher, PumpStatus, wait};
use crate::error::Result;

bitflags! {
    /// Flags controlling how a run treats commands.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RunFlags: u8 {
        /// Keep launching commands after one fails.
        const KEEP_GOING = 0x01;

        /// Do not echo command lines.
        const SILENT = 0x02;

        /// Echo command lines without running them.
        const DRY_RUN = 0x04;
    }
}

/// How a single command ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// The process ran to end-of-stream and exited with this code.
    Exited(u32),
    /// The process could not be started.
    LaunchFailed(String),
    /// Processing its output failed; the process was abandoned.
    PumpFailed(String),
    /// Not started because of an earlier failure or an interrupt.
    Skipped,
    /// Not started because of dry-run mode.
    DryRun,
}

impl JobStatus {
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::Exited(1..) | Self::LaunchFailed(_) | Self::PumpFailed(_)
        )
    }
}

/// Result of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub command: String,
    pub status: JobStatus,
}

/// Outcomes of a whole run, in command order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub outcomes: Vec<JobOutcome>,
}

impl RunSummary {
    /// Number of commands that failed.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status.is_failure())
            .count()
    }

    /// Number of commands that were never started.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status == JobStatus::Skipped)
            .count()
    }

    /// True if every command was run (or dry-run) and exited with 0.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.failures() == 0 && self.skipped() == 0
    }
}

struct Job {
    index: usize,
    handle: ProcessHandle,
}

/// Runs command lines concurrently, bounded by a number of job slots.
pub struct JobRunner {
    launcher: ProcessLauncher,
    env: Option<Env>,
    /// Maximum concurrent jobs; 0 means unlimited.
    slots: usize,
    flags: RunFlags,
    cancel_token: CancellationToken,
}

impl JobRunner {
    /// Creates a runner with one slot and no flags.
    #[must_use]
    pub fn new(launcher: ProcessLauncher) -> Self {
        Self {
            launcher,
            env: None,
            slots: 1,
            flags: RunFlags::empty(),
            cancel_token: CancellationToken::new(),
        }
    }

    /// Sets the environment that replaces the inherited one for every job.
    #[must_use]
    pub fn with_env(mut self, env: Env) -> Self {
        self.env = Some(env);
        self
    }

    #[must_use]
    pub const fn with_slots(mut self, slots: usize) -> Self {
        self.slots = slots;
        self
    }

    #[must_use]
    pub const fn with_flags(mut self, flags: RunFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Returns the cancellation token; cancelling it stops new launches.
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    #[must_use]
    pub const fn flags(&self) -> RunFlags {
        self.flags
    }

    const fn has_free_slot(&self, running: usize) -> bool {
        self.slots == 0 || running < self.slots
    }

    const fn should_stop(&self, failed: bool, interrupted: bool) -> bool {
        interrupted || (failed && !self.flags.contains(RunFlags::KEEP_GOING))
    }

    /// Runs `commands`, writing echoed command lines and all job output to
    /// `out`.
    ///
    /// Job failures are recorded in the summary, not returned as errors.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails or waiting on the running
    /// processes fails.
    pub async fn run<W: Write>(&self, commands: &[String], out: &mut W) -> Result<RunSummary> {
        let mut queue: VecDeque<(usize, &str)> = commands
            .iter()
            .map(String::as_str)
            .enumerate()
            .collect();
        let mut running: BTreeMap<ProcessId, Job> = BTreeMap::new();
        let mut outcomes: Vec<(usize, JobOutcome)> = Vec::with_capacity(commands.len());
        let mut failed = false;
        let mut interrupted = false;

        info!(jobs = commands.len(), slots = self.slots, "Starting run");

        loop {
            interrupted |= self.cancel_token.is_cancelled();

            while !self.should_stop(failed, interrupted) && self.has_free_slot(running.len()) {
                let Some((index, command)) = queue.pop_front() else {
                    break;
                };
                if !self.flags.contains(RunFlags::SILENT) {
                    writeln!(out, "{command}")?;
                }
                if self.flags.contains(RunFlags::DRY_RUN) {
                    outcomes.push((index, outcome(command, JobStatus::DryRun)));
                    continue;
                }

                match self.launcher.spawn(command, self.env.as_ref()) {
                    Ok(handle) => {
                        running.insert(handle.id(), Job { index, handle });
                    }
                    Err(e) => {
                        warn!(cmd = %command, error = %e, "launch failed");
                        let status = JobStatus::LaunchFailed(e.to_string());
                        outcomes.push((index, outcome(command, status)));
                        failed = true;
                    }
                }
            }

            if running.is_empty() {
                break;
            }

            tokio::select! {
                ready = wait(running.values().map(|job| &job.handle)) => ready?,
                () = self.cancel_token.cancelled(), if !interrupted => {
                    info!(running = running.len(), "Interrupted, waiting for running jobs");
                    interrupted = true;
                }
            }

            let mut finished = Vec::new();
            for (id, job) in &mut running {
                let pumped = job
                    .handle
                    .pump(|line| {
                        writeln!(out, "{line}")?;
                        Ok(())
                    })
                    .await;
                match pumped {
                    Ok(PumpStatus::Pending) => {}
                    Ok(PumpStatus::Terminated(code)) => {
                        if code == 0 {
                            debug!(process = %id, "job finished");
                        } else {
                            warn!(process = %id, cmd = %job.handle.command(), exit_code = code, "job failed");
                            failed = true;
                        }
                        finished.push((*id, JobStatus::Exited(code)));
                    }
                    Err(e) => {
                        warn!(process = %id, error = %e, "abandoning job");
                        failed = true;
                        finished.push((*id, JobStatus::PumpFailed(e.to_string())));
                    }
                }
            }

            for (id, status) in finished {
                if let Some(job) = running.remove(&id) {
                    outcomes.push((job.index, outcome(job.handle.command(), status)));
                }
            }
        }

        outcomes.extend(
            queue
                .into_iter()
                .map(|(index, command)| (index, outcome(command, JobStatus::Skipped))),
        );
        outcomes.sort_by_key(|(index, _)| *index);

        let summary = RunSummary {
            outcomes: outcomes.into_iter().map(|(_, outcome)| outcome).collect(),
        };
        info!(
            failures = summary.failures(),
            skipped = summary.skipped(),
            "Run complete"
        );
        Ok(summary)
    }
}

fn outcome(command: &str, status: JobStatus) -> JobOutcome {
    JobOutcome {
        command: command.to_string(),
        status,
    }
}
