// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use clap::Parser;
use presto_rs::cli::run::{LineEndingsArg, RunArgs};
use presto_rs::cli::{Cli, Command};

fn run_args(cli: Cli) -> RunArgs {
    match cli.command {
        Some(Command::Run(args)) => args,
        other => panic!("expected run command, got {other:?}"),
    }
}

// =============================================================================
// Version Command
// =============================================================================

#[test]
fn cli_version_command() {
    let cli = Cli::try_parse_from(["presto", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["presto", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_no_command() {
    let cli = Cli::try_parse_from(["presto"]).unwrap();
    assert!(cli.command.is_none());
}

// =============================================================================
// Run Command
// =============================================================================

#[test]
fn cli_run_splits_assignments_from_commands() {
    let args = run_args(
        Cli::try_parse_from([
            "presto",
            "run",
            "CC=clang",
            "make all",
            "cflags=-O2 -g",
            "make install",
        ])
        .unwrap(),
    );

    assert_eq!(args.assignments().collect::<Vec<_>>(), ["CC=clang", "cflags=-O2 -g"]);
    assert_eq!(args.commands(), ["make all", "make install"]);
}

#[test]
fn cli_run_command_with_equals_is_not_an_assignment() {
    let args = run_args(Cli::try_parse_from(["presto", "run", "make CC=clang", "1X=y"]).unwrap());

    assert_eq!(args.assignments().count(), 0);
    assert_eq!(args.commands(), ["make CC=clang", "1X=y"]);
}

#[test]
fn cli_run_all_flags() {
    let args = run_args(
        Cli::try_parse_from([
            "presto",
            "run",
            "-j",
            "4",
            "-k",
            "-s",
            "-n",
            "--line-endings",
            "any",
            "true",
        ])
        .unwrap(),
    );

    assert_eq!(args.jobs, Some(4));
    assert!(args.keep_going && args.silent && args.dry_run);
    assert_eq!(args.line_endings, Some(LineEndingsArg::Any));
    insta::assert_debug_snapshot!(args.to_config_overrides(), @r#"
    [
        "jobs.slots=4",
        "jobs.keep_going=true",
        "jobs.silent=true",
        "process.line_endings=any",
    ]
    "#);
}

#[test]
fn cli_run_rejects_unknown_line_endings() {
    let result = Cli::try_parse_from(["presto", "run", "--line-endings", "lf", "true"]);
    assert!(result.is_err());
}

#[test]
fn cli_run_rejects_non_numeric_jobs() {
    let result = Cli::try_parse_from(["presto", "run", "-j", "many", "true"]);
    assert!(result.is_err());
}

// =============================================================================
// Global Options
// =============================================================================

#[test]
fn cli_global_options_before_command() {
    let cli = Cli::try_parse_from([
        "presto",
        "-C",
        "/src/project",
        "-i",
        "a.toml",
        "--ini",
        "b.toml",
        "-s",
        "process.shell=bash",
        "-l",
        "4",
        "--no-default-inis",
        "options",
    ])
    .unwrap();

    assert!(matches!(cli.command, Some(Command::Options)));
    assert_eq!(cli.global.directory.as_deref(), Some(std::path::Path::new("/src/project")));
    assert_eq!(cli.global.inis.len(), 2);
    assert!(cli.global.no_default_inis);
    insta::assert_debug_snapshot!(cli.global.to_config_overrides(), @r#"
    [
        "process.shell=bash",
        "global.output_log_level=4",
        "global.file_log_level=4",
    ]
    "#);
}

#[test]
fn cli_log_level_out_of_range_rejected() {
    let result = Cli::try_parse_from(["presto", "-l", "6", "version"]);
    assert!(result.is_err());
}
