// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for how template settings reach the spawned process.

use std::sync::{Arc, Mutex};

use super::script;
use crate::{sh, ClearEnv, Env, Opts};

// ---------------------------------------------------------------------------
// Working directory
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cwd_changes_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    // Canonicalize to resolve symlinks (e.g., /var -> /private/var on macOS)
    let canonical = dir.path().canonicalize().unwrap();

    let out = sh("pwd")
        .bake_opts([Opts::new().cwd(dir.path())])
        .output()
        .await
        .unwrap();
    assert_eq!(out.trim(), canonical.to_str().unwrap());
}

// ---------------------------------------------------------------------------
// Environment variables
// ---------------------------------------------------------------------------

#[tokio::test]
async fn env_passes_variable_to_process() {
    let out = script("echo $BAKE_TEST_VAR")
        .bake_env(Env::new().set("BAKE_TEST_VAR", "hello"))
        .output()
        .await
        .unwrap();
    assert_eq!(out, "hello\n");
}

#[tokio::test]
async fn empty_value_deletes_variable() {
    let base = script("echo \"[$BAKE_TEST_VAR]\"").bake_env(Env::new().set("BAKE_TEST_VAR", "x"));
    let unset = base.bake_env(Env::from([("BAKE_TEST_VAR", "")]));
    assert_eq!(base.output().await.unwrap(), "[x]\n");
    assert_eq!(unset.output().await.unwrap(), "[]\n");
}

#[tokio::test]
async fn clear_env_leaves_only_baked_variables() {
    let out = sh("/usr/bin/env")
        .with(ClearEnv)
        .bake_env(Env::new().set("ONLY", "this"))
        .output()
        .await
        .unwrap();
    assert_eq!(out, "ONLY=this\n");
}

#[tokio::test]
async fn ambient_environment_is_inherited() {
    let path = std::env::var("PATH").unwrap_or_default();
    let out = script("echo $PATH").output().await.unwrap();
    assert_eq!(out.trim_end(), path);
}

#[cfg(unix)]
#[tokio::test]
#[serial_test::serial(process_env)]
async fn non_utf8_ambient_variable_reaches_the_child() {
    use std::os::unix::ffi::OsStrExt;

    let raw = std::ffi::OsStr::from_bytes(b"a\xffb");
    std::env::set_var("BAKE_RAW_ENV_TEST", raw);
    let cmd = sh("/usr/bin/env");
    std::env::remove_var("BAKE_RAW_ENV_TEST");

    assert_eq!(cmd.template().env_var("BAKE_RAW_ENV_TEST"), Some(raw));
    let out = cmd.output().await.unwrap();
    assert!(
        out.lines().any(|line| line == "BAKE_RAW_ENV_TEST=a\u{FFFD}b"),
        "variable missing from child environment: {out}"
    );
}

// ---------------------------------------------------------------------------
// Debug hook
// ---------------------------------------------------------------------------

#[tokio::test]
async fn debug_hook_sees_resolved_args() {
    let seen: Arc<Mutex<Vec<Vec<String>>>> = Arc::default();
    let record = Arc::clone(&seen);
    let base = sh("echo").on_debug(move |template| {
        record.lock().unwrap().push(template.args().to_vec());
    });

    base.with("one").output().await.unwrap();
    base.bake_args(["two", "three"]).output().await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(*seen, vec![vec!["one".to_string()], vec!["two".into(), "three".into()]]);
}

#[tokio::test]
async fn debug_hook_fires_once_per_spawn() {
    let count = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&count);
    let cmd = sh("true").on_debug(move |_| *counter.lock().unwrap() += 1);
    cmd.run().await.unwrap();
    cmd.run().await.unwrap();
    assert_eq!(*count.lock().unwrap(), 2);
}
