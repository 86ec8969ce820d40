// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared async stream handles.
//!
//! A handle is a cheaply cloneable reference to one underlying stream. Relay
//! tasks lock the handle per chunk, so two relays (stdout and stderr) can
//! share a single sink.

use std::fmt;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::{Mutex, MutexGuard};

pub type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;
pub type BoxedReader = Box<dyn AsyncRead + Send + Unpin>;

/// A shared, writable stream.
#[derive(Clone)]
pub struct WriteHandle {
    inner: Arc<Mutex<BoxedWriter>>,
}

impl WriteHandle {
    pub fn new<W>(writer: W) -> Self
    where
        W: AsyncWrite + Send + Unpin + 'static,
    {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Lock the underlying writer for exclusive use.
    pub async fn lock(&self) -> MutexGuard<'_, BoxedWriter> {
        self.inner.lock().await
    }

    /// True if both handles refer to the same stream.
    pub fn ptr_eq(&self, other: &WriteHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for WriteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteHandle").finish_non_exhaustive()
    }
}

/// A shared, readable stream.
#[derive(Clone)]
pub struct ReadHandle {
    inner: Arc<Mutex<BoxedReader>>,
}

impl ReadHandle {
    pub fn new<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        Self {
            inner: Arc::new(Mutex::new(Box::new(reader))),
        }
    }

    /// Lock the underlying reader for exclusive use.
    pub async fn lock(&self) -> MutexGuard<'_, BoxedReader> {
        self.inner.lock().await
    }

    /// True if both handles refer to the same stream.
    pub fn ptr_eq(&self, other: &ReadHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ReadHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadHandle").finish_non_exhaustive()
    }
}
