//! Specs for endpoints that cannot serve the side they are bound to.

use crate::prelude::*;

#[tokio::test]
async fn unwritable_stdout() {
    let err = sh("true")
        .bake_opts([Opts::new().stdout(17u8)])
        .run()
        .await
        .unwrap_err();
    assert!(err.is_endpoint_on(Side::Write));
    assert!(err.to_string().contains("u8"));
}

#[tokio::test]
async fn unwritable_stderr() {
    let (_tx, rx) = mpsc::channel::<String>(1);
    let err = sh("true")
        .bake_opts([Opts::new().stderr(rx)])
        .run()
        .await
        .unwrap_err();
    assert!(err.is_endpoint_on(Side::Write));
}

#[tokio::test]
async fn unreadable_stdin() {
    let (tx, _rx) = mpsc::channel::<String>(1);
    let err = sh("true")
        .bake_opts([Opts::new().stdin(tx)])
        .run()
        .await
        .unwrap_err();
    assert!(err.is_endpoint_on(Side::Read));
}

/// Writing into a channel whose consumer is gone reports end of stream.
#[tokio::test]
async fn closed_channel_is_end_of_stream() {
    use tokio::io::AsyncWriteExt;

    let (tx, rx) = mpsc::channel::<String>(1);
    drop(rx);
    let mut writer = bake_iox::ChannelWriter::new(tx);
    let err = writer.write_all(b"wat").await.unwrap_err();
    assert!(bake_iox::is_end_of_stream(&err));
}
