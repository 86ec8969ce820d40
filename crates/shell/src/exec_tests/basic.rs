// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for running commands, exit codes, and captured output.

use super::{run_async, script, trace};
use crate::{sh, Opts, ShellError};

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_true_succeeds() {
    trace();
    sh("true").run().await.unwrap();
}

#[yare::parameterized(
    default_rejects_14 = { "exit 14", None, Some(14) },
    accepted_14 = { "exit 14", Some(vec![14]), None },
    zero_outside_set = { "exit 0", Some(vec![14]), Some(0) },
    zero_by_default = { "exit 0", None, None },
    one_of_several = { "exit 3", Some(vec![0, 3]), None },
)]
fn exit_code_acceptance(body: &str, ok_exit: Option<Vec<i32>>, rejected: Option<i32>) {
    run_async(async {
        let mut cmd = script(body);
        if let Some(codes) = ok_exit {
            cmd = cmd.bake_opts([Opts::new().ok_exit(codes)]);
        }
        let result = cmd.run().await;
        match rejected {
            None => result.unwrap(),
            Some(code) => match result.unwrap_err() {
                ShellError::UnacceptableExitCode { program, exit_code } => {
                    assert_eq!(program, "sh");
                    assert_eq!(exit_code, code);
                }
                other => panic!("expected UnacceptableExitCode, got: {other:?}"),
            },
        }
    });
}

#[tokio::test]
async fn exit_code_waits_for_the_process() {
    let mut running = script("sleep 0.1; exit 3").start().unwrap();
    assert_eq!(running.try_exit_code(), None);
    assert_eq!(running.exit_code().await.unwrap(), 3);
    assert_eq!(running.try_exit_code(), Some(3));
    assert!(running.duration().is_some());
}

#[tokio::test]
async fn wait_is_idempotent() {
    let mut running = script("exit 5").start().unwrap();
    assert_eq!(running.wait().await.unwrap(), 5);
    assert_eq!(running.wait().await.unwrap(), 5);
    assert_eq!(running.exit_code().await.unwrap(), 5);
}

#[cfg(unix)]
#[tokio::test]
async fn killed_process_reports_minus_one() {
    let mut running = script("kill -9 $$").start().unwrap();
    assert_eq!(running.wait().await.unwrap(), -1);
}

#[tokio::test]
async fn running_command_reports_program_and_pid() {
    let mut running = sh("sleep").with("0.1").start().unwrap();
    assert_eq!(running.program(), "sleep");
    assert!(running.id().is_some());
    running.wait().await.unwrap();
    assert!(running.id().is_none());
}

// ---------------------------------------------------------------------------
// Output capture
// ---------------------------------------------------------------------------

#[tokio::test]
async fn output_captures_stdout_only() {
    let out = script("echo out; echo err 1>&2").output().await.unwrap();
    assert_eq!(out, "out\n");
}

#[tokio::test]
async fn combined_output_keeps_emission_order() {
    trace();
    let out = script("echo out; echo err 1>&2; echo again")
        .combined_output()
        .await
        .unwrap();
    assert_eq!(out, "out\nerr\nagain\n");
}

#[tokio::test]
async fn output_fails_on_unacceptable_exit() {
    let err = script("echo partial; exit 2").output().await.unwrap_err();
    assert_eq!(err.exit_code(), Some(2));
}

#[tokio::test]
async fn commands_can_run_repeatedly() {
    let echo = sh("echo").with("again");
    for _ in 0..3 {
        assert_eq!(echo.output().await.unwrap(), "again\n");
    }
}

#[tokio::test]
async fn concurrent_runs_of_one_command() {
    let echo = sh("echo").with("wat");
    let (a, b) = tokio::join!(echo.output(), echo.output());
    assert_eq!(a.unwrap(), "wat\n");
    assert_eq!(b.unwrap(), "wat\n");
}
