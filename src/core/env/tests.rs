// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for the environment module.

use super::{Env, host_env, parse_assignment};

#[test]
fn test_env_keys_are_uppercased() {
    let mut env = Env::new();
    env.set("cflags", "-O2");

    assert_eq!(env.get("CFLAGS"), Some("-O2"));
    assert_eq!(env.get("cflags"), Some("-O2"));
    assert_eq!(env.iter().collect::<Vec<_>>(), [("CFLAGS", "-O2")]);
}

#[test]
fn test_env_set_replaces() {
    let mut env = Env::new();
    env.set("CC", "gcc").set("cc", "clang");

    assert_eq!(env.len(), 1);
    assert_eq!(env.get("CC"), Some("clang"));
}

#[test]
fn test_env_remove() {
    let mut env: Env = [("A", "1"), ("B", "2")].into_iter().collect();
    env.remove("a").remove("missing");

    assert_eq!(env.get("A"), None);
    assert_eq!(env.len(), 1);
}

#[test]
fn test_env_copy_on_write() {
    let original: Env = [("PATH", "/usr/bin")].into_iter().collect();
    let mut copy = original.clone();
    assert!(copy.shares_with(&original));

    copy.set("PATH", "/opt/bin");

    assert!(!copy.shares_with(&original));
    assert_eq!(original.get("PATH"), Some("/usr/bin"));
    assert_eq!(copy.get("PATH"), Some("/opt/bin"));
}

#[test]
fn test_parse_assignment() {
    assert_eq!(
        parse_assignment("cc=clang -m64"),
        Some(("CC".to_string(), "clang -m64".to_string()))
    );
    assert_eq!(
        parse_assignment("EMPTY="),
        Some(("EMPTY".to_string(), String::new()))
    );
    assert_eq!(parse_assignment("cc -DX=1 main.c"), None);
    assert_eq!(parse_assignment("=value"), None);
    assert_eq!(parse_assignment("1X=2"), None);
}

#[test]
fn test_apply_assignment() {
    let mut env = Env::new();
    env.apply_assignment("Out_Dir=build/x64").unwrap();
    assert_eq!(env.get("OUT_DIR"), Some("build/x64"));

    let err = env.apply_assignment("not an assignment").unwrap_err();
    insta::assert_snapshot!(err, @"invalid assignment 'not an assignment', expected 'NAME=value'");
}

#[test]
fn test_host_env_has_uppercase_keys() {
    let env = host_env();
    assert!(!env.is_empty());
    assert!(env.iter().all(|(key, _)| key == key.to_uppercase()));
}
