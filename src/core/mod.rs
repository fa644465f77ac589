// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for process and environment management.
//!
//! ```text
//!              core
//!               |
//!        +------+------+
//!        |             |
//!        v             v
//!       env         process
//!        |             |
//!      Env          Launcher --> Handle --> pump / exit_code
//!      host_env()   LineAssembler
//!                   wait / wait_timeout
//! ```

pub mod env;
pub mod process;
