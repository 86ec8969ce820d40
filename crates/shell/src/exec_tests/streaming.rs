// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for channel-backed streaming while a process runs.

use std::time::Duration;

use tokio::sync::mpsc;

use super::trace;
use crate::{sh, Endpoint, Opts};

#[tokio::test]
async fn cat_streams_between_channels() {
    trace();
    let (in_tx, in_rx) = mpsc::channel::<String>(4);
    let (out_tx, mut out_rx) = mpsc::channel::<String>(4);
    let mut running = sh("cat")
        .bake_opts([Opts::new().stdin(in_rx).stdout(out_tx)])
        .start()
        .unwrap();

    in_tx.send("one\n".to_string()).await.unwrap();
    assert_eq!(out_rx.recv().await.as_deref(), Some("one\n"));
    in_tx.send("two\n".to_string()).await.unwrap();
    assert_eq!(out_rx.recv().await.as_deref(), Some("two\n"));

    drop(in_tx);
    assert_eq!(running.wait().await.unwrap(), 0);
    assert_eq!(out_rx.recv().await, None);
}

#[tokio::test]
async fn process_blocks_until_input_channel_closes() {
    let (in_tx, in_rx) = mpsc::channel::<Vec<u8>>(1);
    let mut running = sh("cat")
        .bake_opts([Opts::new().stdin(in_rx).stdout(crate::Buffer::new())])
        .start()
        .unwrap();

    let early = tokio::time::timeout(Duration::from_millis(100), running.wait()).await;
    assert!(early.is_err(), "cat exited before its input closed");

    drop(in_tx);
    assert_eq!(running.wait().await.unwrap(), 0);
}

#[tokio::test]
async fn closed_consumer_is_end_of_stream() {
    let (tx, rx) = mpsc::channel::<String>(1);
    drop(rx);
    sh("echo")
        .with("wat")
        .bake_opts([Opts::new().stdout(tx)])
        .run()
        .await
        .unwrap();
}

#[tokio::test]
async fn channel_sink_is_consumed_by_first_run() {
    let (tx, mut rx) = mpsc::channel::<String>(4);
    let echo = sh("echo")
        .with("wat")
        .bake_opts([Opts::new().stdout(tx)]);

    echo.run().await.unwrap();
    assert_eq!(rx.recv().await.as_deref(), Some("wat\n"));
    assert_eq!(rx.recv().await, None);

    echo.run().await.unwrap();
    assert_eq!(rx.try_recv().ok(), None);
}

#[tokio::test]
async fn input_relay_stops_when_process_exits() {
    let (in_tx, in_rx) = mpsc::channel::<String>(1);
    sh("true")
        .bake_opts([Opts::new().stdin(in_rx)])
        .run()
        .await
        .unwrap();
    assert!(in_tx.send("late".to_string()).await.is_err());
}

#[tokio::test]
async fn shared_endpoint_between_derived_commands() {
    let (tx, mut rx) = mpsc::channel::<String>(4);
    let sink = Endpoint::new(tx);
    let base = sh("echo").bake_opts([Opts::new().stdout(sink)]);
    let first = base.with("first");
    let second = base.with("second");

    first.run().await.unwrap();
    assert_eq!(rx.recv().await.as_deref(), Some("first\n"));
    second.run().await.unwrap();
    assert_eq!(rx.recv().await, None);
}
