// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --ini FILE        ← Additional config files (can repeat)
//! --log-level N     ← Console verbosity (0-5)
//! --file-log-level  ← File verbosity (defaults to --log-level)
//! --log-file FILE   ← global.log_file override
//! --log-format FMT  ← text | json lines in the log file
//! -C DIR            ← Change directory first
//! --set KEY=VAL     ← Direct config override
//!
//! Precedence: CLI flags > --set > PRESTO_* > --ini > presto.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'i', long = "ini", value_name = "FILE", action = clap::ArgAction::Append)]
    pub inis: Vec<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Format of the log file.
    #[arg(long = "log-format", value_name = "FORMAT", value_parser = ["text", "json"])]
    pub log_format: Option<String>,

    /// Changes to this directory before doing anything else.
    #[arg(short = 'C', long = "directory", value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Sets an option, such as 'jobs.slots=4' or 'process.shell=bash'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append)]
    pub options: Vec<String>,

    /// Disables auto loading of presto.toml, only uses --ini.
    #[arg(long = "no-default-inis")]
    pub no_default_inis: bool,
}

impl GlobalOptions {
    /// Converts command-line options to `section.key=value` overrides.
    ///
    /// `--set` entries come first so dedicated flags win over them.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let file_level = self.file_log_level.or(self.log_level);
        let log_file = self.log_file.as_ref().map(|path| path.display().to_string());

        let flags = [
            ("global.output_log_level", self.log_level.map(|level| level.to_string())),
            ("global.file_log_level", file_level.map(|level| level.to_string())),
            ("global.log_file", log_file),
            ("global.log_format", self.log_format.clone()),
        ];

        self.options
            .iter()
            .cloned()
            .chain(
                flags
                    .into_iter()
                    .filter_map(|(key, value)| value.map(|value| format!("{key}={value}"))),
            )
            .collect()
    }
}
