//! Specs for streaming through a running process.

use crate::prelude::*;

/// Values sent into stdin come back out of stdout, one by one, in order.
#[tokio::test]
async fn streaming_through_cat() {
    let (in_tx, in_rx) = mpsc::channel::<String>(1);
    let (out_tx, mut out_rx) = mpsc::channel::<String>(1);
    let mut running = sh("cat")
        .bake_opts([Opts::new().stdin(in_rx).stdout(out_tx)])
        .start()
        .unwrap();

    in_tx.send("one\n".to_string()).await.unwrap();
    assert_eq!(out_rx.recv().await.as_deref(), Some("one\n"));
    in_tx.send("two\n".to_string()).await.unwrap();
    assert_eq!(out_rx.recv().await.as_deref(), Some("two\n"));

    drop(in_tx);
    assert_eq!(running.exit_code().await.unwrap(), 0);
    assert_eq!(out_rx.recv().await, None);
}

/// A consumer that went away does not fail the run.
#[tokio::test]
async fn closed_consumer_is_not_an_error() {
    let (tx, rx) = mpsc::channel::<String>(1);
    drop(rx);
    sh("echo")
        .with("wat")
        .bake_opts([Opts::new().stdout(tx)])
        .run()
        .await
        .unwrap();
}
