// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process spawning and stdio relaying.

mod redirect;
mod run;

pub use run::RunningCommand;

pub(crate) use run::start;

#[cfg(test)]
#[path = "../exec_tests/mod.rs"]
mod tests;
