// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized access to the ambient process environment.

use std::ffi::OsString;

use indexmap::IndexMap;

/// Bytes moved per relay read between a child pipe and an endpoint.
pub(crate) const RELAY_CHUNK_SIZE: usize = 8 * 1024;

/// Snapshot of the calling process's environment, in the order the platform
/// reports it. Entries are kept as raw OS strings, valid UTF-8 or not.
pub fn ambient() -> IndexMap<OsString, OsString> {
    std::env::vars_os().collect()
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
