// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for presto-rs.

use crate::config::Config;
use crate::error::Result;

/// Display the effective configuration as JSON.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub fn run_options_command(config: &Config) -> Result<()> {
    println!("{}", config.to_json()?);
    Ok(())
}

/// Display loaded configuration files.
pub fn run_inis_command(config_files: &[String]) {
    if config_files.is_empty() {
        println!("No configuration files loaded");
    } else {
        for line in config_files {
            println!("{line}");
        }
    }
}
