// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn test_exit_code_display() {
    let error = ShellError::UnacceptableExitCode {
        program: "bash".to_string(),
        exit_code: 14,
    };
    assert_eq!(
        error.to_string(),
        "command `bash` exited with unexpected status 14"
    );
    assert_eq!(error.exit_code(), Some(14));
}

#[test]
fn test_incomprehensible_modifier_names_type() {
    let error = ShellError::IncomprehensibleModifier { type_name: "f64" };
    assert!(error.to_string().contains("`f64`"));
    assert_eq!(error.exit_code(), None);
}

#[yare::parameterized(
    unwritable = { EndpointError::Unwritable { kind: "u8" }, Side::Write },
    unreadable = { EndpointError::Unreadable { kind: "u8" }, Side::Read },
)]
fn test_endpoint_side(source: EndpointError, side: Side) {
    let error = ShellError::from(source);
    assert!(error.is_endpoint_on(side));
    let other = match side {
        Side::Read => Side::Write,
        Side::Write => Side::Read,
    };
    assert!(!error.is_endpoint_on(other));
}

#[test]
fn test_pipeline_display() {
    let error = ShellError::UnsupportedPipeline {
        program: "cat".to_string(),
    };
    assert!(error.to_string().contains("not implemented"));
}
