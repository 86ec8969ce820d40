// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for execution failures.

use crate::{sh, Opts, ShellError};

#[tokio::test]
async fn missing_program_fails_to_spawn() {
    let err = sh("bake-definitely-not-a-program").run().await.unwrap_err();
    match err {
        ShellError::SpawnFailed { program, source } => {
            assert_eq!(program, "bake-definitely-not-a-program");
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected SpawnFailed, got: {other:?}"),
    }
}

#[tokio::test]
async fn command_as_stdin_is_unsupported() {
    let producer = sh("echo").with("wat");
    let err = sh("cat")
        .bake_opts([Opts::new().stdin(producer)])
        .run()
        .await
        .unwrap_err();
    assert!(
        matches!(err, ShellError::UnsupportedPipeline { ref program } if program == "cat"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn pipeline_is_rejected_before_spawn() {
    let fired = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let seen = std::sync::Arc::clone(&fired);
    let result = sh("cat")
        .on_debug(move |_| seen.store(true, std::sync::atomic::Ordering::SeqCst))
        .bake_opts([Opts::new().stdin(sh("echo"))])
        .start();
    assert!(matches!(result, Err(ShellError::UnsupportedPipeline { .. })));
    assert!(fired.load(std::sync::atomic::Ordering::SeqCst));
}

#[tokio::test]
async fn bad_cwd_fails_to_spawn() {
    let err = sh("true")
        .bake_opts([Opts::new().cwd("/bake/does/not/exist")])
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, ShellError::SpawnFailed { .. }), "unexpected error: {err:?}");
}
