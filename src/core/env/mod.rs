// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment table handed to spawned children.
//!
//! # Architecture
//!
//! ```text
//! host_env()                 captured once, keys uppercased
//!   .apply_assignment("CC=clang")
//!   .set("CFLAGS", "-O2")
//!        |
//!        v
//! ProcessLauncher::spawn(cmd, Some(&env))   replaces the child's environment
//! ```
//!
//! - **Uppercase keys**: `path` and `PATH` name the same variable
//! - **Copy-on-write**: clones share data until modified

pub mod container;

pub use container::{Env, parse_assignment};

#[cfg(test)]
mod tests;

/// Captures the current process environment.
///
/// Variables whose name or value is not valid Unicode are skipped.
#[must_use]
pub fn host_env() -> Env {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}
