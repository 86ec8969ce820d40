// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawning a template and tracking the resulting process.

use std::fmt;
use std::time::{Duration, Instant};

use tokio::process::Child;

use crate::error::ShellError;
use crate::template::CommandTemplate;

use super::redirect::{self, Relays};

/// Spawn the process described by `template`.
///
/// Endpoint resolution happens here, so configuration errors surface before
/// anything is spawned.
pub(crate) fn start(template: &CommandTemplate) -> Result<RunningCommand, ShellError> {
    if let Some(hook) = template.debug_hook() {
        hook(template);
    }

    let span = tracing::info_span!(
        "shell.cmd",
        cmd = %template.program(),
        args = ?template.args(),
        exit_code = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    );

    let mut process = tokio::process::Command::new(template.program());
    process
        .args(template.args())
        .env_clear()
        .envs(template.env());
    if let Some(cwd) = template.cwd() {
        process.current_dir(cwd);
    }
    let applied = redirect::apply_stdio(&mut process, template)?;

    let started = Instant::now();
    let mut child = process.spawn().map_err(|source| ShellError::SpawnFailed {
        program: template.program().to_string(),
        source,
    })?;
    // Closes the parent's copies of any descriptors handed to the child.
    drop(process);

    tracing::debug!(parent: &span, pid = ?child.id(), "spawned");
    let relays = applied.attach(&mut child, &span);

    Ok(RunningCommand {
        program: template.program().to_string(),
        child,
        relays,
        started,
        span,
        exit: None,
    })
}

#[derive(Debug, Clone, Copy)]
struct Exit {
    code: i32,
    duration: Duration,
}

/// A spawned process.
///
/// Dropping a `RunningCommand` without waiting leaves the process running
/// and detaches its relays.
pub struct RunningCommand {
    program: String,
    child: Child,
    relays: Relays,
    started: Instant,
    span: tracing::Span,
    exit: Option<Exit>,
}

impl RunningCommand {
    pub fn program(&self) -> &str {
        &self.program
    }

    /// OS process id, while the process is still running.
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Wait for the process to exit and for all of its output to be
    /// delivered. Channel endpoints are closed before this returns.
    ///
    /// Waiting again returns the recorded exit code. A process killed by a
    /// signal reports `-1`.
    pub async fn wait(&mut self) -> Result<i32, ShellError> {
        if let Some(exit) = self.exit {
            return Ok(exit.code);
        }

        let status = self
            .child
            .wait()
            .await
            .map_err(|source| ShellError::WaitFailed {
                program: self.program.clone(),
                source,
            })?;
        self.relays.finish().await;

        let code = status.code().unwrap_or(-1);
        let duration = self.started.elapsed();
        self.span.record("exit_code", code);
        self.span.record("duration_ms", duration.as_millis() as u64);
        tracing::debug!(parent: &self.span, exit_code = code, "exited");

        self.exit = Some(Exit { code, duration });
        Ok(code)
    }

    /// The exit code, waiting for the process first if needed.
    pub async fn exit_code(&mut self) -> Result<i32, ShellError> {
        self.wait().await
    }

    /// The exit code if the process has already been waited on.
    pub fn try_exit_code(&self) -> Option<i32> {
        self.exit.map(|exit| exit.code)
    }

    /// Time from spawn until exit, once waited on.
    pub fn duration(&self) -> Option<Duration> {
        self.exit.map(|exit| exit.duration)
    }
}

impl fmt::Debug for RunningCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunningCommand")
            .field("program", &self.program)
            .field("pid", &self.child.id())
            .field("exit", &self.exit)
            .finish_non_exhaustive()
    }
}
