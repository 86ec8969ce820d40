// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::ffi::OsStr;

use super::*;

#[test]
#[serial_test::serial(process_env)]
fn ambient_reflects_process_environment() {
    std::env::set_var("BAKE_ENV_SNAPSHOT_TEST", "present");
    let env = ambient();
    std::env::remove_var("BAKE_ENV_SNAPSHOT_TEST");
    assert_eq!(
        env.get(OsStr::new("BAKE_ENV_SNAPSHOT_TEST")),
        Some(&OsString::from("present"))
    );
}

#[test]
#[serial_test::serial(process_env)]
fn ambient_is_a_snapshot() {
    let env = ambient();
    std::env::set_var("BAKE_ENV_LATE_TEST", "late");
    assert!(!env.contains_key(OsStr::new("BAKE_ENV_LATE_TEST")));
    std::env::remove_var("BAKE_ENV_LATE_TEST");
}

#[cfg(unix)]
#[test]
#[serial_test::serial(process_env)]
fn ambient_keeps_non_utf8_values() {
    use std::os::unix::ffi::OsStrExt;

    let raw = OsStr::from_bytes(b"a\xffb");
    std::env::set_var("BAKE_ENV_RAW_TEST", raw);
    let env = ambient();
    std::env::remove_var("BAKE_ENV_RAW_TEST");
    assert_eq!(
        env.get(OsStr::new("BAKE_ENV_RAW_TEST")).map(OsString::as_os_str),
        Some(raw)
    );
}
