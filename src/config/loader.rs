// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration loading.
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional("presto.toml")   File { required: false }
//!   .add_toml_file(ini)                      File { required: true }
//!   .add_toml_str(text)                      Inline
//!   .with_env_prefix("PRESTO")               PRESTO_SECTION__KEY
//!   .apply_override("jobs.slots=4")          always wins
//!        |
//!        v
//!    build() --> missing required file? --> NotFound
//!            --> merge --> deserialize --> validate --> Config
//! ```
//!
//! Later sources replace individual keys of earlier ones; overrides beat
//! every source regardless of the order they were added in.

use std::fmt;
use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};

use super::Config;
use crate::error::{ConfigError, Result};

/// One layer fed to the loader, in the order it was added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File { path: PathBuf, required: bool },
    Inline,
}

impl ConfigSource {
    /// Whether this source contributes anything to the merged result.
    fn is_loaded(&self) -> bool {
        match self {
            Self::File { path, required } => *required || path.is_file(),
            Self::Inline => true,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File { path, .. } => write!(f, "{}", path.display()),
            Self::Inline => f.write_str("<inline>"),
        }
    }
}

/// Collects configuration layers and merges them into a [`Config`].
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    sources: Vec<ConfigSource>,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            sources: Vec::new(),
            env_prefix: None,
        }
    }

    /// Adds a TOML file that must exist when [`build`](Self::build) runs.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_file(path.as_ref(), true)
    }

    /// Adds a TOML file that is skipped if it does not exist.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_file(path.as_ref(), false)
    }

    fn add_file(mut self, path: &Path, required: bool) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        self.sources.push(ConfigSource::File {
            path: path.to_path_buf(),
            required,
        });
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources.push(ConfigSource::Inline);
        self
    }

    /// Reads `PREFIX_SECTION__KEY` variables, e.g. `PRESTO_JOBS__SLOTS=4`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Applies a `section.key=value` override as given on the command line.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidOverride` if `assignment` has no `=` or
    /// no `section.` part.
    pub fn apply_override(mut self, assignment: &str) -> Result<Self> {
        let (key, value) = assignment
            .split_once('=')
            .map(|(key, value)| (key.trim(), value.trim()))
            .filter(|(key, _)| {
                key.split_once('.')
                    .is_some_and(|(section, name)| !section.is_empty() && !name.is_empty())
            })
            .ok_or_else(|| ConfigError::InvalidOverride(assignment.to_string()))?;

        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| anyhow::anyhow!("cannot apply override '{assignment}': {e}"))?;
        Ok(self)
    }

    /// Merges every layer and validates the result.
    ///
    /// # Errors
    ///
    /// - `ConfigError::NotFound` if a required file is missing.
    /// - A `config` error for malformed TOML or unparsable environment values.
    /// - A deserialization error for unknown keys or mistyped values.
    /// - `ConfigError::InvalidValue` if validation fails.
    pub fn build(self) -> Result<Config> {
        if let Some(ConfigSource::File { path, .. }) = self
            .sources
            .iter()
            .find(|source| matches!(source, ConfigSource::File { path, required: true } if !path.is_file()))
        {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// All sources added so far, in order.
    #[must_use]
    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// Files that take part in the merge; missing optional files are left out.
    #[must_use]
    pub fn loaded_files(&self) -> Vec<&Path> {
        self.sources
            .iter()
            .filter(|source| source.is_loaded())
            .filter_map(|source| match source {
                ConfigSource::File { path, .. } => Some(path.as_path()),
                ConfigSource::Inline => None,
            })
            .collect()
    }

    /// Numbered listing of the sources that take part in the merge.
    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.sources
            .iter()
            .filter(|source| source.is_loaded())
            .enumerate()
            .map(|(i, source)| format!("{}. {source}", i + 1))
            .collect()
    }
}
