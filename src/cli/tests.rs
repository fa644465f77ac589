// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::run::LineEndingsArg;
use crate::cli::{Cli, Command};
use crate::core::process::LineEndings;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["presto", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "presto",
        "-l",
        "4",
        "-C",
        "/tmp/project",
        "-i",
        "a.toml",
        "--ini",
        "b.toml",
        "-s",
        "jobs.slots=3",
        "options",
    ])
    .unwrap();

    assert!(matches!(cli.command, Some(Command::Options)));
    assert_eq!(cli.global.directory, Some(PathBuf::from("/tmp/project")));
    assert_eq!(cli.global.inis, [PathBuf::from("a.toml"), PathBuf::from("b.toml")]);
    insta::assert_debug_snapshot!(cli.global.to_config_overrides(), @r#"
    [
        "jobs.slots=3",
        "global.output_log_level=4",
        "global.file_log_level=4",
    ]
    "#);
}

#[test]
fn test_log_file_options() {
    let cli = Cli::try_parse_from([
        "presto",
        "--file-log-level",
        "2",
        "--log-file",
        "out/presto.log",
        "--log-format",
        "json",
        "version",
    ])
    .unwrap();

    insta::assert_debug_snapshot!(cli.global.to_config_overrides(), @r#"
    [
        "global.file_log_level=2",
        "global.log_file=out/presto.log",
        "global.log_format=json",
    ]
    "#);
    assert!(Cli::try_parse_from(["presto", "--log-format", "xml", "version"]).is_err());
}

#[test]
fn test_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["presto", "-l", "6", "version"]).is_err());
}

#[test]
fn test_parse_run() {
    let cli = Cli::try_parse_from([
        "presto",
        "run",
        "-j",
        "0",
        "-k",
        "-s",
        "-n",
        "--line-endings",
        "any",
        "cc=clang",
        "cc -DX=1 -c a.c",
        "OUT=build",
        "ls",
    ])
    .unwrap();

    let Some(Command::Run(args)) = cli.command else {
        panic!("expected run command");
    };
    assert_eq!(args.jobs, Some(0));
    assert!(args.keep_going && args.silent && args.dry_run);
    assert_eq!(args.line_endings, Some(LineEndingsArg::Any));
    assert_eq!(args.assignments().collect::<Vec<_>>(), ["cc=clang", "OUT=build"]);
    assert_eq!(args.commands(), ["cc -DX=1 -c a.c", "ls"]);
    insta::assert_debug_snapshot!(args.to_config_overrides(), @r#"
    [
        "jobs.slots=0",
        "jobs.keep_going=true",
        "jobs.silent=true",
        "process.line_endings=any",
    ]
    "#);
}

#[test]
fn test_run_defaults_leave_config_alone() {
    let cli = Cli::try_parse_from(["presto", "run", "make"]).unwrap();
    let Some(Command::Run(args)) = cli.command else {
        panic!("expected run command");
    };
    assert!(args.to_config_overrides().is_empty());
    assert_eq!(args.commands(), ["make"]);
}

#[test]
fn test_line_endings_arg_conversion() {
    assert_eq!(LineEndings::from(LineEndingsArg::Cr), LineEndings::CarriageReturn);
    assert_eq!(LineEndings::from(LineEndingsArg::Any), LineEndings::Any);
}
