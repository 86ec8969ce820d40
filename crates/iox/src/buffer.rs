// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared in-memory byte buffer.

use std::fmt;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use parking_lot::Mutex;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

/// A growable byte buffer shared by reference.
///
/// Clones point at the same storage, so a buffer bound as a command's output
/// can be inspected by the caller after the command exits.
#[derive(Clone, Default)]
pub struct Buffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current contents.
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.lock().clone()
    }

    /// Current contents decoded as UTF-8, replacing invalid sequences.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }

    /// Remove and return the current contents.
    pub fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.inner.lock())
    }

    pub fn extend_from_slice(&self, data: &[u8]) {
        self.inner.lock().extend_from_slice(data);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// True if both buffers share the same storage.
    pub fn ptr_eq(&self, other: &Buffer) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn writer(&self) -> BufferWriter {
        BufferWriter(self.clone())
    }

    pub(crate) fn reader(&self) -> BufferReader {
        BufferReader(self.clone())
    }
}

impl From<&str> for Buffer {
    fn from(s: &str) -> Self {
        Buffer::from(s.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(bytes)),
        }
    }
}

impl io::Write for Buffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer").field("len", &self.len()).finish()
    }
}

/// Appends every write to the shared buffer.
pub(crate) struct BufferWriter(Buffer);

impl AsyncWrite for BufferWriter {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        data: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.0.extend_from_slice(data);
        Poll::Ready(Ok(data.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

/// Consumes bytes from the front of the shared buffer.
pub(crate) struct BufferReader(Buffer);

impl AsyncRead for BufferReader {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let mut data = self.0.inner.lock();
        let n = buf.remaining().min(data.len());
        buf.put_slice(&data[..n]);
        data.drain(..n);
        Poll::Ready(Ok(()))
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
