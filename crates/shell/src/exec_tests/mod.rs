// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for spawning commands and relaying their stdio.

use crate::{sh, Command};

mod basic;
mod builder;
mod errors;
mod io;
mod streaming;

/// A command running `script` under `sh -c`.
pub(crate) fn script(script: &str) -> Command {
    sh("sh").bake_args(["-c", script])
}

/// Route tracing output through the test harness. Set `RUST_LOG` to see it.
pub(crate) fn trace() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Sync wrapper for async execution in parameterized tests.
pub(crate) fn run_async<F: std::future::Future>(f: F) -> F::Output {
    tokio::runtime::Runtime::new().unwrap().block_on(f)
}
