// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `run` command.
//!
//! ```text
//! host_env() + NAME=value items --> Env
//! [process] --> ProcessLauncher
//! [jobs] + --dry-run --> JobRunner --> stdout
//! Ctrl+C --> cancel token (no new launches)
//! ```

use anyhow::bail;
use tracing::{info, warn};

use crate::cli::run::RunArgs;
use crate::config::Config;
use crate::core::env::host_env;
use crate::core::process::ProcessLauncher;
use crate::error::Result;
use crate::jobs::{JobRunner, RunFlags};

/// Run flags derived from configuration and the command line.
#[must_use]
pub fn run_flags(config: &Config, dry_run: bool) -> RunFlags {
    let mut flags = RunFlags::empty();
    flags.set(RunFlags::KEEP_GOING, config.jobs.keep_going);
    flags.set(RunFlags::SILENT, config.jobs.silent);
    flags.set(RunFlags::DRY_RUN, dry_run);
    flags
}

/// Runs the commands given on the command line.
///
/// # Errors
///
/// Returns an error if an assignment is malformed, output cannot be written,
/// or any command fails or is skipped.
pub async fn run_run_command(args: &RunArgs, config: &Config) -> Result<()> {
    let mut env = host_env();
    for assignment in args.assignments() {
        env.apply_assignment(assignment)?;
    }

    let commands = args.commands();
    if commands.is_empty() {
        info!("Nothing to run");
        return Ok(());
    }

    let runner = JobRunner::new(ProcessLauncher::from_config(&config.process))
        .with_env(env)
        .with_slots(config.jobs.slots)
        .with_flags(run_flags(config, args.dry_run));

    let cancel_token = runner.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl+C, finishing running commands...");
            cancel_token.cancel();
        }
    });

    let mut out = std::io::stdout().lock();
    let summary = runner.run(&commands, &mut out).await?;

    if !summary.succeeded() {
        bail!(
            "{} of {} commands failed, {} skipped",
            summary.failures(),
            commands.len(),
            summary.skipped()
        );
    }
    Ok(())
}
