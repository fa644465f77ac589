// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable struct and copy-on-write implementation.
//!
//! ```text
//! Env { vars: Arc<BTreeMap<UPPERCASE, value>> }
//! clone shares the Arc; Arc::make_mut copies on first write
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::error::ConfigError;

static ASSIGNMENT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)^([A-Za-z_][A-Za-z0-9_]*)=(.*)$").ok());

/// Splits a `NAME=value` assignment, uppercasing the name.
///
/// Returns `None` if `text` is not an assignment, e.g. a command line such as
/// `cc -DX=1 main.c`.
#[must_use]
pub fn parse_assignment(text: &str) -> Option<(String, String)> {
    let captures = ASSIGNMENT.as_ref()?.captures(text)?;
    Some((captures[1].to_uppercase(), captures[2].to_string()))
}

/// A set of environment variables with copy-on-write semantics.
///
/// Keys are stored uppercased; lookups uppercase their argument too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env {
    vars: Arc<BTreeMap<String, String>>,
}

impl Env {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variable, replacing any previous value.
    pub fn set(&mut self, key: impl AsRef<str>, value: impl Into<String>) -> &mut Self {
        Arc::make_mut(&mut self.vars).insert(key.as_ref().to_uppercase(), value.into());
        self
    }

    /// Applies a `NAME=value` assignment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAssignment`] if `assignment` is not of
    /// the form `NAME=value`.
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<&mut Self, ConfigError> {
        let (key, value) = parse_assignment(assignment)
            .ok_or_else(|| ConfigError::InvalidAssignment(assignment.to_string()))?;
        Ok(self.set(key, value))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(&key.to_uppercase()).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> &mut Self {
        let key = key.to_uppercase();
        if self.vars.contains_key(&key) {
            Arc::make_mut(&mut self.vars).remove(&key);
        }
        self
    }

    /// Returns an iterator over variables in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// True if `other` shares this environment's storage.
    #[must_use]
    pub fn shares_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.vars, &other.vars)
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Env {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = BTreeMap::new();
        for (key, value) in iter {
            vars.insert(key.as_ref().to_uppercase(), value.into());
        }
        Self {
            vars: Arc::new(vars),
        }
    }
}
