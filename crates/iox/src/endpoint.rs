// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Classification and resolution of stdio endpoints.
//!
//! [`Endpoint::new`] accepts any value and sorts it, once, into a closed set
//! of bindings. Resolution then asks a binding for a sink ([`Endpoint::writer`])
//! or a source ([`Endpoint::reader`]); a binding that cannot serve the
//! requested side fails with the side-specific [`EndpointError`].

use std::any::{Any, TypeId};
use std::fmt;
use std::fs::File;
use std::io::Cursor;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc::{Receiver, Sender};

use crate::buffer::Buffer;
use crate::channel::{ChannelItem, ChannelReader, ChannelWriter};
use crate::error::{EndpointError, Side};
use crate::handle::{ReadHandle, WriteHandle};

/// Channel halves are owned by whichever execution resolves them first.
type Slot<T> = Arc<Mutex<Option<T>>>;

#[derive(Clone)]
enum Binding {
    Writer(WriteHandle),
    Reader(ReadHandle),
    File(Arc<File>),
    Buffer(Buffer),
    TextSender(Slot<Sender<String>>),
    ByteSender(Slot<Sender<Vec<u8>>>),
    TextReceiver(Slot<Receiver<String>>),
    ByteReceiver(Slot<Receiver<Vec<u8>>>),
    Literal(Arc<[u8]>),
    Opaque,
}

/// A caller-supplied source or sink for one of a child's standard streams.
///
/// Cloning an endpoint shares the underlying resource.
#[derive(Clone)]
pub struct Endpoint {
    binding: Binding,
    kind: &'static str,
    type_id: TypeId,
}

/// A resolved sink for child output.
#[derive(Debug)]
pub enum Writable {
    /// Hand the file to the child as its descriptor.
    File(File),
    /// Relay the child's output into an async writer.
    Stream {
        handle: WriteHandle,
        /// Shut the writer down once the child's output is drained. Set for
        /// channel adapters so the consumer observes the channel closing.
        close_when_done: bool,
    },
}

/// A resolved source for child input.
#[derive(Debug)]
pub enum Readable {
    /// Hand the file to the child as its descriptor.
    File(File),
    /// Relay an async reader into the child's stdin.
    Stream(ReadHandle),
}

fn peel<T, F>(value: Box<dyn Any + Send>, bind: F) -> Result<Binding, Box<dyn Any + Send>>
where
    T: Any,
    F: FnOnce(T) -> Binding,
{
    value.downcast::<T>().map(|inner| bind(*inner))
}

fn slot<T>(value: T) -> Slot<T> {
    Arc::new(Mutex::new(Some(value)))
}

impl Endpoint {
    /// Classify `value`.
    ///
    /// Recognized kinds, in priority order: stream handles ([`WriteHandle`],
    /// [`ReadHandle`], [`File`]), [`Buffer`], channel halves carrying
    /// `String` or `Vec<u8>`, then literal input (`String`, `&'static str`,
    /// `Vec<u8>`, `&'static [u8]`). An `Endpoint` passes through unchanged.
    /// Anything else is accepted here and rejected at resolution time.
    pub fn new<T: Any + Send>(value: T) -> Self {
        let kind = std::any::type_name::<T>();
        let type_id = TypeId::of::<T>();
        let value: Box<dyn Any + Send> = Box::new(value);
        let value = match value.downcast::<Endpoint>() {
            Ok(endpoint) => return *endpoint,
            Err(value) => value,
        };

        let binding = peel::<WriteHandle, _>(value, Binding::Writer)
            .or_else(|v| peel::<ReadHandle, _>(v, Binding::Reader))
            .or_else(|v| peel::<File, _>(v, |f| Binding::File(Arc::new(f))))
            .or_else(|v| peel::<Buffer, _>(v, Binding::Buffer))
            .or_else(|v| peel::<Sender<String>, _>(v, |tx| Binding::TextSender(slot(tx))))
            .or_else(|v| peel::<Sender<Vec<u8>>, _>(v, |tx| Binding::ByteSender(slot(tx))))
            .or_else(|v| peel::<Receiver<String>, _>(v, |rx| Binding::TextReceiver(slot(rx))))
            .or_else(|v| peel::<Receiver<Vec<u8>>, _>(v, |rx| Binding::ByteReceiver(slot(rx))))
            .or_else(|v| peel::<String, _>(v, |s| Binding::Literal(Arc::from(s.into_bytes()))))
            .or_else(|v| peel::<&'static str, _>(v, |s| Binding::Literal(Arc::from(s.as_bytes()))))
            .or_else(|v| peel::<Vec<u8>, _>(v, |b| Binding::Literal(Arc::from(b))))
            .or_else(|v| peel::<&'static [u8], _>(v, |b| Binding::Literal(Arc::from(b))))
            .unwrap_or(Binding::Opaque);

        Self {
            binding,
            kind,
            type_id,
        }
    }

    /// Type name of the value this endpoint was built from.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// True if this endpoint was built from a value of type `T`.
    pub fn holds<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Resolve this endpoint as a sink for child output.
    pub fn writer(&self) -> Result<Writable, EndpointError> {
        match &self.binding {
            Binding::Writer(handle) => Ok(Writable::Stream {
                handle: handle.clone(),
                close_when_done: false,
            }),
            Binding::File(file) => self.duplicate(file, Side::Write).map(Writable::File),
            Binding::Buffer(buffer) => Ok(Writable::Stream {
                handle: WriteHandle::new(buffer.writer()),
                close_when_done: false,
            }),
            Binding::TextSender(slot) => Ok(channel_sink(slot)),
            Binding::ByteSender(slot) => Ok(channel_sink(slot)),
            Binding::Reader(_)
            | Binding::TextReceiver(_)
            | Binding::ByteReceiver(_)
            | Binding::Literal(_)
            | Binding::Opaque => Err(EndpointError::Unwritable { kind: self.kind }),
        }
    }

    /// Resolve this endpoint as a source for child input.
    pub fn reader(&self) -> Result<Readable, EndpointError> {
        match &self.binding {
            Binding::Reader(handle) => Ok(Readable::Stream(handle.clone())),
            Binding::File(file) => self.duplicate(file, Side::Read).map(Readable::File),
            Binding::Buffer(buffer) => Ok(Readable::Stream(ReadHandle::new(buffer.reader()))),
            Binding::TextReceiver(slot) => Ok(channel_source(slot)),
            Binding::ByteReceiver(slot) => Ok(channel_source(slot)),
            Binding::Literal(bytes) => Ok(Readable::Stream(ReadHandle::new(Cursor::new(
                Arc::clone(bytes),
            )))),
            Binding::Writer(_)
            | Binding::TextSender(_)
            | Binding::ByteSender(_)
            | Binding::Opaque => Err(EndpointError::Unreadable { kind: self.kind }),
        }
    }

    /// Fail the way [`writer`](Self::writer) would, without taking anything.
    ///
    /// Resolving a channel sender consumes it, so callers binding several
    /// streams check them all first.
    pub fn check_writable(&self) -> Result<(), EndpointError> {
        match self.binding {
            Binding::Writer(_)
            | Binding::File(_)
            | Binding::Buffer(_)
            | Binding::TextSender(_)
            | Binding::ByteSender(_) => Ok(()),
            _ => Err(EndpointError::Unwritable { kind: self.kind }),
        }
    }

    /// Fail the way [`reader`](Self::reader) would, without taking anything.
    pub fn check_readable(&self) -> Result<(), EndpointError> {
        match self.binding {
            Binding::Reader(_)
            | Binding::File(_)
            | Binding::Buffer(_)
            | Binding::TextReceiver(_)
            | Binding::ByteReceiver(_)
            | Binding::Literal(_) => Ok(()),
            _ => Err(EndpointError::Unreadable { kind: self.kind }),
        }
    }

    /// True if both endpoints name the same underlying resource.
    pub fn same_target(&self, other: &Endpoint) -> bool {
        match (&self.binding, &other.binding) {
            (Binding::Writer(a), Binding::Writer(b)) => a.ptr_eq(b),
            (Binding::Reader(a), Binding::Reader(b)) => a.ptr_eq(b),
            (Binding::File(a), Binding::File(b)) => Arc::ptr_eq(a, b),
            (Binding::Buffer(a), Binding::Buffer(b)) => a.ptr_eq(b),
            (Binding::TextSender(a), Binding::TextSender(b)) => same_sender(a, b),
            (Binding::ByteSender(a), Binding::ByteSender(b)) => same_sender(a, b),
            (Binding::TextReceiver(a), Binding::TextReceiver(b)) => Arc::ptr_eq(a, b),
            (Binding::ByteReceiver(a), Binding::ByteReceiver(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    fn duplicate(&self, file: &File, side: Side) -> Result<File, EndpointError> {
        file.try_clone().map_err(|source| EndpointError::Duplicate {
            kind: self.kind,
            side,
            source,
        })
    }
}

fn channel_sink<T: ChannelItem>(slot: &Slot<Sender<T>>) -> Writable {
    let sender = slot.lock().take();
    Writable::Stream {
        handle: WriteHandle::new(ChannelWriter::from_slot(sender)),
        close_when_done: true,
    }
}

fn channel_source<T: ChannelItem>(slot: &Slot<Receiver<T>>) -> Readable {
    let receiver = slot.lock().take();
    Readable::Stream(ReadHandle::new(ChannelReader::from_slot(receiver)))
}

fn same_sender<T>(a: &Slot<Sender<T>>, b: &Slot<Sender<T>>) -> bool {
    if Arc::ptr_eq(a, b) {
        return true;
    }
    // Never hold both locks at once.
    let Some(a) = a.lock().clone() else {
        return false;
    };
    let guard = b.lock();
    guard.as_ref().is_some_and(|b| a.same_channel(b))
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint").field("kind", &self.kind).finish()
    }
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod tests;
