//! Specs for capturing output into buffers and channels.

use crate::prelude::*;

#[tokio::test]
async fn echo_into_buffer() {
    let buffer = Buffer::new();
    sh("echo")
        .with("wat")
        .bake_opts([Opts::new().stdout(buffer.clone())])
        .run()
        .await
        .unwrap();
    assert_eq!(buffer.to_string_lossy(), "wat\n");
}

/// A text channel receives exactly one value.
#[tokio::test]
async fn echo_into_text_channel() {
    let (tx, mut rx) = mpsc::channel::<String>(4);
    sh("echo")
        .with("wat")
        .bake_opts([Opts::new().stdout(tx)])
        .run()
        .await
        .unwrap();
    assert_eq!(rx.recv().await.as_deref(), Some("wat\n"));
    assert_eq!(rx.recv().await, None);
}

#[tokio::test]
async fn echo_into_byte_channel() {
    let (tx, mut rx) = mpsc::channel::<Vec<u8>>(4);
    sh("echo")
        .with("wat")
        .bake_opts([Opts::new().stdout(tx)])
        .run()
        .await
        .unwrap();
    assert_eq!(rx.recv().await, Some(b"wat\n".to_vec()));
}

#[tokio::test]
async fn output_is_stdout_only() {
    let out = script("echo out; echo err 1>&2").output().await.unwrap();
    similar_asserts::assert_eq!(out.as_str(), "out\n");
}

/// Combined output preserves the order the process wrote in.
#[tokio::test]
async fn combined_output_interleaves() {
    let out = script("echo out; echo err 1>&2").combined_output().await.unwrap();
    similar_asserts::assert_eq!(out.as_str(), "out\nerr\n");
}

/// A shared channel for stdout and stderr sees both, in order, then closes.
#[tokio::test]
async fn combined_into_channel() {
    let (tx, mut rx) = mpsc::channel::<String>(8);
    let sink = Endpoint::new(tx);
    script("echo out; echo err 1>&2")
        .bake_opts([Opts::new().stdout(sink.clone()).stderr(sink)])
        .run()
        .await
        .unwrap();
    similar_asserts::assert_eq!(drain(&mut rx).await.as_str(), "out\nerr\n");
}
