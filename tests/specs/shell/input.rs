//! Specs for feeding input to a process.

use crate::prelude::*;

async fn cat(source: Endpoint) -> String {
    sh("cat")
        .bake_opts([Opts::new().stdin(source)])
        .output()
        .await
        .unwrap()
}

#[tokio::test]
async fn cat_bees_from_literals() {
    assert_eq!(cat(Endpoint::new("bees")).await, "bees");
    assert_eq!(cat(Endpoint::new("bees".to_string())).await, "bees");
    assert_eq!(cat(Endpoint::new(b"bees".to_vec())).await, "bees");
}

#[tokio::test]
async fn cat_bees_from_buffer() {
    assert_eq!(cat(Endpoint::new(Buffer::from("bees"))).await, "bees");
}

#[tokio::test]
async fn cat_bees_from_channel() {
    let (tx, rx) = mpsc::channel::<String>(1);
    tx.send("bees".to_string()).await.unwrap();
    drop(tx);
    assert_eq!(cat(Endpoint::new(rx)).await, "bees");
}

#[tokio::test]
async fn cat_bees_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bees");
    std::fs::write(&path, "bees").unwrap();
    let file = std::fs::File::open(&path).unwrap();
    assert_eq!(cat(Endpoint::new(file)).await, "bees");
}

/// Binding one command as another's stdin is refused.
#[tokio::test]
async fn piping_commands_is_unsupported() {
    let err = sh("cat")
        .bake_opts([Opts::new().stdin(sh("echo").with("wat"))])
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, ShellError::UnsupportedPipeline { .. }));
}
