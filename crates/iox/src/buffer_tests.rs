// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

#[test]
fn clones_share_storage() {
    let buf = Buffer::new();
    let alias = buf.clone();
    alias.extend_from_slice(b"wat\n");
    assert_eq!(buf.to_string_lossy(), "wat\n");
    assert!(buf.ptr_eq(&alias));
    assert!(!buf.ptr_eq(&Buffer::new()));
}

#[test]
fn std_write_appends() {
    let mut buf = Buffer::from("a");
    write!(buf, "b{}", 1).unwrap();
    assert_eq!(buf.bytes(), b"ab1");
    assert_eq!(buf.len(), 3);
}

#[test]
fn take_empties_the_buffer() {
    let buf = Buffer::from("bees");
    assert_eq!(buf.take(), b"bees");
    assert!(buf.is_empty());
}

#[tokio::test]
async fn writer_appends_to_shared_buffer() {
    let buf = Buffer::new();
    let mut writer = buf.writer();
    writer.write_all(b"out\n").await.unwrap();
    writer.write_all(b"err\n").await.unwrap();
    writer.shutdown().await.unwrap();
    assert_eq!(buf.to_string_lossy(), "out\nerr\n");
}

#[tokio::test]
async fn reader_drains_from_the_front() {
    let buf = Buffer::from("knees");
    let mut reader = buf.reader();
    let mut first = [0u8; 2];
    reader.read_exact(&mut first).await.unwrap();
    assert_eq!(&first, b"kn");
    assert_eq!(buf.to_string_lossy(), "ees");

    let mut rest = String::new();
    reader.read_to_string(&mut rest).await.unwrap();
    assert_eq!(rest, "ees");
    assert!(buf.is_empty());
}

#[test]
fn debug_shows_length_only() {
    let buf = Buffer::from("abc");
    assert_eq!(format!("{buf:?}"), "Buffer { len: 3 }");
}
