// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! encoding
//!   Encoding::decode()  UTF-8 / CP1252 / OEM / UTF-16LE --> UTF-8
//! ```

pub mod encoding;
