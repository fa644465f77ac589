// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for spawning, pumping and scheduling processes.
//!
//! Drives real `/bin/sh` children through the public API only.

#![cfg(unix)]

use std::time::Duration;

use presto_rs::config::Config;
use presto_rs::core::env::{Env, host_env};
use presto_rs::core::process::{
    LineEndings, ProcessHandle, ProcessLauncher, PumpStatus, wait, wait_timeout,
};
use presto_rs::jobs::{JobRunner, JobStatus, RunFlags};

async fn drain(handle: &mut ProcessHandle) -> (Vec<String>, u32) {
    let mut lines = Vec::new();
    loop {
        let status = handle
            .pump(|line| {
                lines.push(line.to_string());
                Ok(())
            })
            .await
            .unwrap();
        match status {
            PumpStatus::Terminated(code) => return (lines, code),
            PumpStatus::Pending => wait([&*handle]).await.unwrap(),
        }
    }
}

// =============================================================================
// Launch and Pump
// =============================================================================

#[tokio::test]
async fn process_from_default_config() {
    let config = Config::parse("").unwrap();
    let launcher = ProcessLauncher::from_config(&config.process);
    let mut handle = launcher.spawn("printf 'one\\rtwo\\r\\nthree'", None).unwrap();

    let (lines, code) = drain(&mut handle).await;

    assert_eq!(lines, ["one", "two", "three"]);
    assert_eq!(code, 0);
    assert_eq!(handle.exit_code(), Some(0));
}

#[tokio::test]
async fn process_default_keeps_bare_lf() {
    let launcher = ProcessLauncher::default();
    let mut handle = launcher.spawn("printf 'a\\nb\\r'", None).unwrap();

    let (lines, _) = drain(&mut handle).await;
    assert_eq!(lines, ["a\nb"]);
}

#[tokio::test]
async fn process_interleaved_stderr_and_exit_code() {
    let launcher = ProcessLauncher::builder()
        .with_line_endings(LineEndings::Any)
        .build();
    let mut handle = launcher
        .spawn("echo out; echo err >&2; exit 5", None)
        .unwrap();

    let (lines, code) = drain(&mut handle).await;

    assert_eq!(lines, ["out", "err"]);
    assert_eq!(code, 5);
}

#[tokio::test]
async fn process_pump_after_termination_is_stable() {
    let launcher = ProcessLauncher::default();
    let mut handle = launcher.spawn("exit 9", None).unwrap();
    drain(&mut handle).await;

    let again = handle.pump(|_| Ok(())).await.unwrap();
    assert_eq!(again, PumpStatus::Terminated(9));
}

#[tokio::test]
async fn process_env_is_exactly_what_was_given() {
    let mut env = Env::new();
    env.set("path", host_env().get("PATH").unwrap_or("/usr/bin:/bin"));
    env.apply_assignment("greeting=hello").unwrap();

    let launcher = ProcessLauncher::builder()
        .with_line_endings(LineEndings::Any)
        .build();
    let mut handle = launcher
        .spawn("echo \"$GREETING ${HOME:-nohome}\"", Some(&env))
        .unwrap();

    let (lines, _) = drain(&mut handle).await;
    assert_eq!(lines, ["hello nohome"]);
}

// =============================================================================
// Waiting
// =============================================================================

#[tokio::test]
async fn process_wait_wakes_for_first_ready() {
    let launcher = ProcessLauncher::default();
    let slow = launcher.spawn("sleep 5", None).unwrap();
    let fast = launcher.spawn("printf 'done\\r'", None).unwrap();

    let woke = wait_timeout([&slow, &fast], Duration::from_secs(3))
        .await
        .unwrap();
    assert!(woke);
}

#[tokio::test]
async fn process_wait_times_out_when_silent() {
    let launcher = ProcessLauncher::default();
    let handle = launcher.spawn("sleep 5", None).unwrap();

    let woke = wait_timeout([&handle], Duration::from_millis(100))
        .await
        .unwrap();
    assert!(!woke);
}

// =============================================================================
// Job Runner
// =============================================================================

#[tokio::test]
async fn jobs_run_with_two_slots() {
    let launcher = ProcessLauncher::builder()
        .with_line_endings(LineEndings::Any)
        .build();
    let commands = vec![
        "echo first".to_string(),
        "exit 4".to_string(),
        "echo third".to_string(),
    ];

    let mut out = Vec::new();
    let summary = JobRunner::new(launcher)
        .with_slots(2)
        .with_flags(RunFlags::KEEP_GOING | RunFlags::SILENT)
        .run(&commands, &mut out)
        .await
        .unwrap();

    let statuses: Vec<_> = summary.outcomes.iter().map(|o| o.status.clone()).collect();
    assert_eq!(
        statuses,
        [JobStatus::Exited(0), JobStatus::Exited(4), JobStatus::Exited(0)]
    );
    assert_eq!(summary.failures(), 1);

    let text = String::from_utf8(out).unwrap();
    let mut printed: Vec<_> = text.lines().collect();
    printed.sort_unstable();
    assert_eq!(printed, ["first", "third"]);
}

#[tokio::test]
async fn jobs_interrupt_skips_queue() {
    let runner = JobRunner::new(ProcessLauncher::default());
    runner.cancel_token().cancel();

    let mut out = Vec::new();
    let summary = runner
        .run(&["echo never".to_string()], &mut out)
        .await
        .unwrap();

    assert_eq!(summary.skipped(), 1);
    assert!(out.is_empty());
}
