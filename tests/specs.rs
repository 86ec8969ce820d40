//! Workspace-level behavioral specs for command templates and stdio endpoints.
//!
//! Each spec drives the public API of `bake-shell` against real processes.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/shell/mod.rs"]
mod shell;
