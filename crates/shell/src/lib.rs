// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Immutable command templates for spawning processes.
//!
//! A [`Command`] is a value: deriving from it with arguments, environment
//! changes or stdio bindings yields a new command and leaves the original
//! untouched. Stdio endpoints accept files, buffers, async streams, channels
//! and literals; see [`Endpoint`].

mod command;
pub mod env;
mod error;
mod exec;
mod macros;
mod modifier;
mod template;

pub use bake_iox::{Buffer, Endpoint, EndpointError, ReadHandle, Side, WriteHandle};
pub use command::{sh, Command};
pub use error::ShellError;
pub use exec::RunningCommand;
pub use modifier::{ClearEnv, DebugHook, Env, Modifier, Opts};
pub use template::CommandTemplate;
