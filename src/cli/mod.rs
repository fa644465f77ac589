// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for presto-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! presto [global options] <command>
//! version
//! options
//! inis
//! run [-j N] [-k] [-s] [-n] [NAME=value | COMMAND]...
//! ```

pub mod global;
pub mod run;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::run::RunArgs;
use clap::{Parser, Subcommand};

/// Presto Build process engine - Rust Port
///
/// Runs build commands concurrently with multiplexed output.
#[derive(Debug, Parser)]
#[command(
    name = "presto",
    author,
    version,
    about = "Presto Build process engine",
    long_about = "presto-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Runs shell commands as build steps, several at a time, and\n\
                  prints their combined output line by line.\n\n\
                  Invoking `presto run -j 4 CC=clang \"make a\" \"make b\"` runs both\n\
                  commands with CC set, at most four at a time. See\n\
                  `presto <command> --help` for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  By default, presto loads `presto.toml` from the current directory\n\
                  (after -C is applied) if it exists. Additional files can be given\n\
                  with --ini and are loaded after it. PRESTO_SECTION__KEY environment\n\
                  variables and --set section.key=value override every file. Use\n\
                  --no-default-inis to only use --ini."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Prints the effective configuration as JSON.
    Options,

    /// Lists the configuration files used by presto.
    Inis,

    /// Runs commands.
    Run(RunArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
