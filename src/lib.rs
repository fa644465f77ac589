// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |              options / run
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML, env, --set layers  |
//!              '-------------+-------------'
//!                            |
//!                            v
//!                          jobs
//!              JobRunner: slots, keep-going,
//!              dry-run, Ctrl+C
//!                            |
//!   +------------------------v----------------+
//!   |  core   process: spawn / pump / wait    |
//!   |         env: uppercase COW table        |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod jobs;
pub mod logging;
pub mod utility;
