//! Specs for accepted exit codes.

use crate::prelude::*;

/// By default only 0 is accepted.
#[tokio::test]
async fn exit_14_fails_by_default() {
    let err = script("exit 14").run().await.unwrap_err();
    assert_eq!(err.exit_code(), Some(14));
}

#[tokio::test]
async fn exit_14_passes_when_accepted() {
    script("exit 14")
        .bake_opts([Opts::new().ok_exit([14])])
        .run()
        .await
        .unwrap();
}

#[tokio::test]
async fn exit_0_fails_when_not_accepted() {
    let err = script("exit 0")
        .bake_opts([Opts::new().ok_exit([14])])
        .run()
        .await
        .unwrap_err();
    assert_eq!(err.exit_code(), Some(0));
}

/// Asking a started command for its exit code waits for it.
#[tokio::test]
async fn exit_code_waits() {
    let mut running = script("sleep 0.1; exit 7").start().unwrap();
    assert_eq!(running.exit_code().await.unwrap(), 7);
}
