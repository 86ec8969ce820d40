// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The plain data describing one process invocation.

use std::collections::BTreeSet;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use bake_iox::Endpoint;
use indexmap::IndexMap;

use crate::env;
use crate::modifier::{DebugHook, Env, Modifier, Opts};

/// Everything needed to spawn a process.
///
/// Templates are only mutated while a new [`Command`](crate::Command) is
/// being derived. Once wrapped they are read-only.
#[derive(Clone)]
pub struct CommandTemplate {
    program: String,
    args: Vec<String>,
    env: IndexMap<OsString, OsString>,
    cwd: Option<PathBuf>,
    stdin: Option<Endpoint>,
    stdout: Option<Endpoint>,
    stderr: Option<Endpoint>,
    ok_exit: BTreeSet<i32>,
    debug: Option<DebugHook>,
}

impl CommandTemplate {
    /// A template for `program` that inherits the ambient environment and
    /// accepts only exit code 0.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: env::ambient(),
            cwd: None,
            stdin: None,
            stdout: None,
            stderr: None,
            ok_exit: BTreeSet::from([0]),
            debug: None,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn env(&self) -> &IndexMap<OsString, OsString> {
        &self.env
    }

    /// Value of one environment variable, if set.
    pub fn env_var(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.env.get(key.as_ref()).map(OsString::as_os_str)
    }

    /// The environment as `KEY=VALUE` strings, in insertion order. Non-UTF-8
    /// bytes are replaced.
    pub fn env_list(&self) -> Vec<String> {
        self.env
            .iter()
            .map(|(k, v)| format!("{}={}", k.to_string_lossy(), v.to_string_lossy()))
            .collect()
    }

    /// Working directory, or `None` to inherit the caller's.
    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    pub fn stdin(&self) -> Option<&Endpoint> {
        self.stdin.as_ref()
    }

    pub fn stdout(&self) -> Option<&Endpoint> {
        self.stdout.as_ref()
    }

    pub fn stderr(&self) -> Option<&Endpoint> {
        self.stderr.as_ref()
    }

    pub fn ok_exit(&self) -> &BTreeSet<i32> {
        &self.ok_exit
    }

    /// True if `exit_code` counts as success.
    pub fn accepts(&self, exit_code: i32) -> bool {
        self.ok_exit.contains(&exit_code)
    }

    pub(crate) fn debug_hook(&self) -> Option<&DebugHook> {
        self.debug.as_ref()
    }

    // -----------------------------------------------------------------------
    // Baking
    // -----------------------------------------------------------------------

    pub(crate) fn bake(&mut self, modifier: Modifier) {
        match modifier {
            Modifier::Args(args) => self.bake_args(args),
            Modifier::Env(env) => self.bake_env(env),
            Modifier::ClearEnv => self.env.clear(),
            Modifier::Opts(opts) => self.bake_opts(opts),
            Modifier::Debug(hook) => self.debug = Some(hook),
        }
    }

    pub(crate) fn bake_args<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
    }

    pub(crate) fn bake_env(&mut self, env: Env) {
        for (key, value) in env.into_inner() {
            if value.is_empty() {
                self.env.shift_remove(OsStr::new(&key));
            } else {
                self.env.insert(key.into(), value.into());
            }
        }
    }

    pub(crate) fn bake_opts(&mut self, opts: Opts) {
        if let Some(cwd) = opts.cwd {
            self.cwd = Some(cwd);
        }
        if let Some(stdin) = opts.stdin {
            self.stdin = Some(stdin);
        }
        if let Some(stdout) = opts.stdout {
            self.stdout = Some(stdout);
        }
        if let Some(stderr) = opts.stderr {
            self.stderr = Some(stderr);
        }
        if let Some(ok_exit) = opts.ok_exit {
            self.ok_exit = ok_exit;
        }
    }
}

impl fmt::Debug for CommandTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandTemplate")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("env", &self.env.len())
            .field("cwd", &self.cwd)
            .field("stdin", &self.stdin)
            .field("stdout", &self.stdout)
            .field("stderr", &self.stderr)
            .field("ok_exit", &self.ok_exit)
            .field("debug", &self.debug.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
