// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Run command arguments.
//!
//! ```text
//! presto run -j 4 -k CC=clang "cc -c a.c" "cc -c b.c"
//!            |    |  |         '-- commands, in order
//!            |    |  '-- NAME=value: environment for every command
//!            |    '-- jobs.keep_going
//!            '-- jobs.slots (0 = unlimited)
//! ```

use clap::{Args, ValueEnum};

use crate::core::env::parse_assignment;
use crate::core::process::LineEndings;

/// Line terminators recognized in command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LineEndingsArg {
    /// CR and CR LF only.
    Cr,
    /// CR, CR LF and LF.
    Any,
}

impl From<LineEndingsArg> for LineEndings {
    fn from(arg: LineEndingsArg) -> Self {
        match arg {
            LineEndingsArg::Cr => Self::CarriageReturn,
            LineEndingsArg::Any => Self::Any,
        }
    }
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Maximum number of commands running at once; 0 means unlimited.
    #[arg(short = 'j', long = "jobs", value_name = "N")]
    pub jobs: Option<usize>,

    /// Keeps launching commands after one fails.
    #[arg(short = 'k', long = "keep-going")]
    pub keep_going: bool,

    /// Does not echo commands before running them.
    #[arg(short = 's', long = "silent")]
    pub silent: bool,

    /// Prints commands without running them.
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Which bytes end a line of command output.
    #[arg(long = "line-endings", value_name = "MODE")]
    pub line_endings: Option<LineEndingsArg>,

    /// Environment assignments (NAME=value) and commands to run.
    #[arg(value_name = "NAME=value|COMMAND")]
    pub items: Vec<String>,
}

impl RunArgs {
    /// `NAME=value` items, in order.
    pub fn assignments(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .map(String::as_str)
            .filter(|item| parse_assignment(item).is_some())
    }

    /// Everything that is not an assignment, in order.
    #[must_use]
    pub fn commands(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| parse_assignment(item).is_none())
            .cloned()
            .collect()
    }

    /// Converts run flags to configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = Vec::new();

        if let Some(jobs) = self.jobs {
            overrides.push(format!("jobs.slots={jobs}"));
        }
        if self.keep_going {
            overrides.push("jobs.keep_going=true".to_string());
        }
        if self.silent {
            overrides.push("jobs.silent=true".to_string());
        }
        if let Some(endings) = self.line_endings {
            let name = match endings {
                LineEndingsArg::Cr => "cr",
                LineEndingsArg::Any => "any",
            };
            overrides.push(format!("process.line_endings={name}"));
        }

        overrides
    }
}
