// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stream adapters over bounded tokio channels.
//!
//! Writers forward each write as one channel message; readers yield each
//! received message as a run of bytes. Both directions apply the channel's
//! backpressure to the relay that drives them.

use std::io;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::sync::mpsc::{Receiver, Sender};
use tokio_util::sync::PollSender;

/// Element types a channel endpoint can carry.
pub trait ChannelItem: Send + 'static {
    /// Build one message from a chunk of process output.
    fn from_chunk(chunk: &[u8]) -> Self;

    /// Flatten one message into process input.
    fn into_chunk(self) -> Vec<u8>;
}

/// Text messages. Chunks are decoded lossily; a multi-byte character split
/// across two writes decodes as replacement characters.
impl ChannelItem for String {
    fn from_chunk(chunk: &[u8]) -> Self {
        String::from_utf8_lossy(chunk).into_owned()
    }

    fn into_chunk(self) -> Vec<u8> {
        self.into_bytes()
    }
}

impl ChannelItem for Vec<u8> {
    fn from_chunk(chunk: &[u8]) -> Self {
        chunk.to_vec()
    }

    fn into_chunk(self) -> Vec<u8> {
        self
    }
}

/// Returns true if `err` is the end-of-stream condition reported by a
/// [`ChannelWriter`] whose consumer has gone away.
pub fn is_end_of_stream(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::BrokenPipe
}

fn end_of_stream() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "channel closed by consumer")
}

/// Writes into a channel, one message per write.
///
/// Once the receiving side is dropped every write fails with an
/// end-of-stream error (see [`is_end_of_stream`]). Shutting the writer down
/// drops its sender, closing the channel once no other senders remain.
pub struct ChannelWriter<T: ChannelItem> {
    sender: Option<PollSender<T>>,
}

impl<T: ChannelItem> Unpin for ChannelWriter<T> {}

impl<T: ChannelItem> ChannelWriter<T> {
    pub fn new(sender: Sender<T>) -> Self {
        Self::from_slot(Some(sender))
    }

    /// A writer whose sender was already taken behaves as a closed channel.
    pub(crate) fn from_slot(sender: Option<Sender<T>>) -> Self {
        Self {
            sender: sender.map(PollSender::new),
        }
    }
}

impl<T: ChannelItem> AsyncWrite for ChannelWriter<T> {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        let Some(sender) = this.sender.as_mut() else {
            return Poll::Ready(Err(end_of_stream()));
        };
        if buf.is_empty() {
            return Poll::Ready(Ok(0));
        }
        if ready!(sender.poll_reserve(cx)).is_err() {
            this.sender = None;
            return Poll::Ready(Err(end_of_stream()));
        }
        match sender.send_item(T::from_chunk(buf)) {
            Ok(()) => Poll::Ready(Ok(buf.len())),
            Err(_) => {
                this.sender = None;
                Poll::Ready(Err(end_of_stream()))
            }
        }
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        self.get_mut().sender = None;
        Poll::Ready(Ok(()))
    }
}

/// Reads from a channel; a closed channel is end-of-input.
pub struct ChannelReader<T: ChannelItem> {
    receiver: Option<Receiver<T>>,
    pending: Vec<u8>,
    offset: usize,
}

impl<T: ChannelItem> Unpin for ChannelReader<T> {}

impl<T: ChannelItem> ChannelReader<T> {
    pub fn new(receiver: Receiver<T>) -> Self {
        Self::from_slot(Some(receiver))
    }

    pub(crate) fn from_slot(receiver: Option<Receiver<T>>) -> Self {
        Self {
            receiver,
            pending: Vec::new(),
            offset: 0,
        }
    }
}

impl<T: ChannelItem> AsyncRead for ChannelReader<T> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        loop {
            if this.offset < this.pending.len() {
                let n = buf.remaining().min(this.pending.len() - this.offset);
                buf.put_slice(&this.pending[this.offset..this.offset + n]);
                this.offset += n;
                return Poll::Ready(Ok(()));
            }
            let Some(receiver) = this.receiver.as_mut() else {
                return Poll::Ready(Ok(()));
            };
            match ready!(receiver.poll_recv(cx)) {
                Some(item) => {
                    this.pending = item.into_chunk();
                    this.offset = 0;
                }
                None => {
                    this.receiver = None;
                    return Poll::Ready(Ok(()));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
