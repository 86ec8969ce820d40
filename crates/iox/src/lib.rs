// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bake-iox: adapters that bind a child process's standard streams to
//! caller-owned buffers, channels, files and async stream handles.

mod buffer;
mod channel;
mod endpoint;
mod error;
mod handle;

pub use buffer::Buffer;
pub use channel::{is_end_of_stream, ChannelItem, ChannelReader, ChannelWriter};
pub use endpoint::{Endpoint, Readable, Writable};
pub use error::{EndpointError, Side};
pub use handle::{BoxedReader, BoxedWriter, ReadHandle, WriteHandle};
