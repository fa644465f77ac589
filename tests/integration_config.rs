// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use std::fs;

use presto_rs::config::loader::ConfigLoader;
use presto_rs::config::{CONFIG_FILE_NAME, Config};
use presto_rs::core::process::LineEndings;
use presto_rs::logging::LogLevel;
use tempfile::TempDir;

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_empty_uses_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config.jobs.slots, 1);
    assert!(!config.jobs.keep_going);
    assert_eq!(config.process.line_endings, LineEndings::CarriageReturn);
    assert_eq!(config.process.read_buffer_size, 1024);
    assert_eq!(config.process.max_line_length, 64 * 1024);
}

#[test]
fn config_parse_all_sections() {
    let toml = r#"
[global]
output_log_level = 2
log_file = "presto.log"

[jobs]
slots = 0
keep_going = true

[process]
shell = "bash"
shell_args = ["-e", "-c"]
line_endings = "any"
"#;
    let config = Config::parse(toml).unwrap();

    assert_eq!(config.global.output_log_level, LogLevel::WARN);
    assert_eq!(config.jobs.slots, 0);
    assert!(config.jobs.keep_going);
    assert_eq!(config.process.shell, "bash");
    assert_eq!(config.process.shell_args, ["-e", "-c"]);
    assert_eq!(config.process.line_endings, LineEndings::Any);

    let log = config.log_config();
    assert_eq!(log.log_file(), Some(std::path::Path::new("presto.log")));
}

#[test]
fn config_parse_rejects_zero_buffer() {
    let err = Config::parse("[process]\nread_buffer_size = 0\n").unwrap_err();
    assert!(format!("{err:#}").contains("read_buffer_size"));
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn config_later_files_override_earlier() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join(CONFIG_FILE_NAME);
    let extra = dir.path().join("ci.toml");
    fs::write(&base, "[jobs]\nslots = 2\nsilent = true\n").unwrap();
    fs::write(&extra, "[jobs]\nslots = 8\n").unwrap();

    let config = ConfigLoader::new()
        .add_toml_file(&base)
        .add_toml_file(&extra)
        .build()
        .unwrap();

    assert_eq!(config.jobs.slots, 8);
    assert!(config.jobs.silent);
}

#[test]
fn config_override_beats_files() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&base, "[process]\nline_endings = \"any\"\n").unwrap();

    let config = ConfigLoader::new()
        .add_toml_file(&base)
        .apply_override("process.line_endings=cr")
        .unwrap()
        .apply_override("jobs.slots=3")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.process.line_endings, LineEndings::CarriageReturn);
    assert_eq!(config.jobs.slots, 3);
}

#[test]
fn config_missing_optional_file_is_skipped() {
    let dir = TempDir::new().unwrap();
    let loader = ConfigLoader::new().add_toml_file_optional(dir.path().join(CONFIG_FILE_NAME));

    assert!(loader.loaded_files().is_empty());
    assert_eq!(loader.build().unwrap().jobs.slots, 1);
}

#[test]
fn config_missing_required_file_fails() {
    let dir = TempDir::new().unwrap();
    let result = ConfigLoader::new()
        .add_toml_file(dir.path().join("absent.toml"))
        .build();
    assert!(result.is_err());
}

#[test]
fn config_unknown_key_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "[jobs]\nparallel = 4\n").unwrap();

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn config_to_json_round_trips_slots() {
    let config = Config::parse("[jobs]\nslots = 6\n").unwrap();
    let json: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();

    assert_eq!(json["jobs"]["slots"], 6);
    assert_eq!(json["process"]["line_endings"], "cr");
}
