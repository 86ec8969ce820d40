// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for binding stdio endpoints.

use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;

use super::{run_async, script};
use crate::{sh, Buffer, Endpoint, Opts, ReadHandle, Side, WriteHandle};

fn echo_wat() -> crate::Command {
    sh("echo").with("wat")
}

// ---------------------------------------------------------------------------
// Output sinks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stdout_into_buffer() {
    let buffer = Buffer::new();
    echo_wat()
        .bake_opts([Opts::new().stdout(buffer.clone())])
        .run()
        .await
        .unwrap();
    assert_eq!(buffer.to_string_lossy(), "wat\n");
}

#[tokio::test]
async fn stdout_into_text_channel() {
    let (tx, mut rx) = mpsc::channel::<String>(4);
    echo_wat()
        .bake_opts([Opts::new().stdout(tx)])
        .run()
        .await
        .unwrap();
    assert_eq!(rx.recv().await.as_deref(), Some("wat\n"));
    assert_eq!(rx.recv().await, None);
}

#[tokio::test]
async fn stdout_into_byte_channel() {
    let (tx, mut rx) = mpsc::channel::<Vec<u8>>(4);
    echo_wat()
        .bake_opts([Opts::new().stdout(tx)])
        .run()
        .await
        .unwrap();
    assert_eq!(rx.recv().await, Some(b"wat\n".to_vec()));
    assert_eq!(rx.recv().await, None);
}

#[tokio::test]
async fn stdout_into_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let file = std::fs::File::create(&path).unwrap();
    echo_wat()
        .bake_opts([Opts::new().stdout(file)])
        .run()
        .await
        .unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "wat\n");
}

#[tokio::test]
async fn stdout_into_write_handle() {
    let (writer, mut reader) = tokio::io::duplex(64);
    echo_wat()
        .bake_opts([Opts::new().stdout(WriteHandle::new(writer))])
        .run()
        .await
        .unwrap();
    let mut got = [0u8; 4];
    reader.read_exact(&mut got).await.unwrap();
    assert_eq!(&got, b"wat\n");
}

#[tokio::test]
async fn stderr_into_its_own_buffer() {
    let out = Buffer::new();
    let err = Buffer::new();
    script("echo out; echo err 1>&2")
        .bake_opts([Opts::new().stdout(out.clone()).stderr(err.clone())])
        .run()
        .await
        .unwrap();
    assert_eq!(out.to_string_lossy(), "out\n");
    assert_eq!(err.to_string_lossy(), "err\n");
}

#[tokio::test]
async fn same_file_for_both_streams() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("both.txt");
    let sink = Endpoint::new(std::fs::File::create(&path).unwrap());
    script("echo out; echo err 1>&2")
        .bake_opts([Opts::new().stdout(sink.clone()).stderr(sink)])
        .run()
        .await
        .unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "out\nerr\n");
}

#[tokio::test]
async fn same_channel_for_both_streams_closes_once() {
    let (tx, mut rx) = mpsc::channel::<String>(16);
    let sink = Endpoint::new(tx);
    script("echo out; echo err 1>&2")
        .bake_opts([Opts::new().stdout(sink.clone()).stderr(sink)])
        .run()
        .await
        .unwrap();
    let mut text = String::new();
    while let Some(chunk) = rx.recv().await {
        text.push_str(&chunk);
    }
    assert_eq!(text, "out\nerr\n");
}

#[tokio::test]
async fn cloned_senders_for_both_streams_close_the_channel() {
    let (tx, mut rx) = mpsc::channel::<String>(16);
    let cmd = script("echo out; echo err 1>&2")
        .bake_opts([Opts::new().stdout(tx.clone()).stderr(tx)]);
    cmd.run().await.unwrap();

    let drained = tokio::time::timeout(Duration::from_secs(2), async {
        let mut text = String::new();
        while let Some(chunk) = rx.recv().await {
            text.push_str(&chunk);
        }
        text
    })
    .await
    .expect("channel never closed after run");
    assert_eq!(drained, "out\nerr\n");
}

// ---------------------------------------------------------------------------
// Input sources
// ---------------------------------------------------------------------------

#[yare::parameterized(
    str_literal = { Endpoint::new("bees") },
    string_literal = { Endpoint::new("bees".to_string()) },
    byte_literal = { Endpoint::new(b"bees".to_vec()) },
    byte_slice_literal = { Endpoint::new(&b"bees"[..]) },
    buffer = { Endpoint::new(Buffer::from("bees")) },
    read_handle = { Endpoint::new(ReadHandle::new(std::io::Cursor::new(b"bees".to_vec()))) },
)]
fn cat_reproduces_input(source: Endpoint) {
    run_async(async {
        let out = sh("cat")
            .bake_opts([Opts::new().stdin(source)])
            .output()
            .await
            .unwrap();
        assert_eq!(out, "bees");
    });
}

#[tokio::test]
async fn cat_reads_closed_text_channel() {
    let (tx, rx) = mpsc::channel::<String>(4);
    tx.send("bees".to_string()).await.unwrap();
    drop(tx);
    let out = sh("cat")
        .bake_opts([Opts::new().stdin(rx)])
        .output()
        .await
        .unwrap();
    assert_eq!(out, "bees");
}

#[tokio::test]
async fn cat_reads_closed_byte_channel() {
    let (tx, rx) = mpsc::channel::<Vec<u8>>(4);
    tx.send(b"be".to_vec()).await.unwrap();
    tx.send(b"es".to_vec()).await.unwrap();
    drop(tx);
    let out = sh("cat")
        .bake_opts([Opts::new().stdin(rx)])
        .output()
        .await
        .unwrap();
    assert_eq!(out, "bees");
}

#[tokio::test]
async fn cat_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.txt");
    std::fs::write(&path, "bees").unwrap();
    let out = sh("cat")
        .bake_opts([Opts::new().stdin(std::fs::File::open(&path).unwrap())])
        .output()
        .await
        .unwrap();
    assert_eq!(out, "bees");
}

#[tokio::test]
async fn literal_input_is_reread_each_run() {
    let cat = sh("cat").bake_opts([Opts::new().stdin("bees")]);
    assert_eq!(cat.output().await.unwrap(), "bees");
    assert_eq!(cat.output().await.unwrap(), "bees");
}

#[tokio::test]
async fn buffer_input_is_drained() {
    let input = Buffer::from("bees");
    let cat = sh("cat").bake_opts([Opts::new().stdin(input.clone())]);
    assert_eq!(cat.output().await.unwrap(), "bees");
    assert!(input.is_empty());
    assert_eq!(cat.output().await.unwrap(), "");
}

// ---------------------------------------------------------------------------
// Unresolvable endpoints
// ---------------------------------------------------------------------------

#[yare::parameterized(
    stdout_number = { Opts::new().stdout(42u32), Side::Write },
    stdout_receiver = { Opts::new().stdout(mpsc::channel::<String>(1).1), Side::Write },
    stdout_literal = { Opts::new().stdout("bees"), Side::Write },
    stderr_number = { Opts::new().stderr(42u32), Side::Write },
    stdin_number = { Opts::new().stdin(42u32), Side::Read },
    stdin_sender = { Opts::new().stdin(mpsc::channel::<String>(1).0), Side::Read },
)]
fn unresolvable_endpoint_fails_on_its_side(opts: Opts, side: Side) {
    run_async(async {
        let err = sh("true").bake_opts([opts]).run().await.unwrap_err();
        assert!(err.is_endpoint_on(side), "unexpected error: {err:?}");
    });
}

#[tokio::test]
async fn failed_resolution_leaves_channels_bound() {
    let (tx, mut rx) = mpsc::channel::<String>(1);
    let cmd = echo_wat().bake_opts([Opts::new().stdout(tx).stderr(42u32)]);

    let err = cmd.run().await.unwrap_err();
    assert!(err.is_endpoint_on(Side::Write));
    // The template still holds the sender, so the channel is open and empty.
    assert!(matches!(
        rx.try_recv(),
        Err(mpsc::error::TryRecvError::Empty)
    ));
}

#[tokio::test]
async fn failed_output_resolution_leaves_stdin_channel_bound() {
    let (tx, rx) = mpsc::channel::<String>(1);
    let cmd = sh("cat").bake_opts([Opts::new().stdin(rx).stdout(42u32)]);

    let err = cmd.run().await.unwrap_err();
    assert!(err.is_endpoint_on(Side::Write));
    tx.try_send("still open".to_string()).unwrap();
}
