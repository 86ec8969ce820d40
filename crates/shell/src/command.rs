// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Immutable command values and their derivation operations.

use std::fmt;
use std::sync::Arc;

use bake_iox::{Buffer, Endpoint};

use crate::error::ShellError;
use crate::exec::{self, RunningCommand};
use crate::modifier::{Env, Modifier, Opts};
use crate::template::CommandTemplate;

/// Shorthand for [`Command::new`].
pub fn sh(program: impl Into<String>) -> Command {
    Command::new(program)
}

/// An immutable, shareable command template.
///
/// Every derivation copies the template, applies the changes to the copy and
/// wraps it in a new `Command`. The receiver is never changed, so a base
/// command can be refined along many independent branches and run any number
/// of times, from any task.
#[derive(Clone)]
pub struct Command {
    template: Arc<CommandTemplate>,
}

impl Command {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            template: Arc::new(CommandTemplate::new(program)),
        }
    }

    pub fn template(&self) -> &CommandTemplate {
        &self.template
    }

    fn derive(&self, change: impl FnOnce(&mut CommandTemplate)) -> Command {
        let mut template = CommandTemplate::clone(&self.template);
        change(&mut template);
        Command {
            template: Arc::new(template),
        }
    }

    /// Apply modifiers in order to a copy of this command.
    pub fn apply<I>(&self, modifiers: I) -> Command
    where
        I: IntoIterator,
        I::Item: Into<Modifier>,
    {
        self.derive(|template| {
            for modifier in modifiers {
                template.bake(modifier.into());
            }
        })
    }

    /// Apply a single modifier.
    pub fn with(&self, modifier: impl Into<Modifier>) -> Command {
        self.derive(|template| template.bake(modifier.into()))
    }

    pub fn bake_args<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.derive(|template| template.bake_args(args))
    }

    pub fn bake_env(&self, env: impl Into<Env>) -> Command {
        self.derive(|template| template.bake_env(env.into()))
    }

    pub fn clear_env(&self) -> Command {
        self.derive(|template| template.bake(Modifier::ClearEnv))
    }

    /// Merge option bundles in order; later bundles win field by field.
    pub fn bake_opts<I>(&self, opts: I) -> Command
    where
        I: IntoIterator<Item = Opts>,
    {
        self.derive(|template| {
            for bundle in opts {
                template.bake_opts(bundle);
            }
        })
    }

    /// Register a hook that sees the template right before each spawn.
    pub fn on_debug<F>(&self, hook: F) -> Command
    where
        F: Fn(&CommandTemplate) + Send + Sync + 'static,
    {
        self.derive(|template| template.bake(Modifier::Debug(Arc::new(hook))))
    }

    // -----------------------------------------------------------------------
    // Execution
    // -----------------------------------------------------------------------

    /// Spawn the process without waiting for it.
    ///
    /// Must be called from within a tokio runtime; relays between the child
    /// and any stream endpoints run as tasks on it.
    pub fn start(&self) -> Result<RunningCommand, ShellError> {
        exec::start(&self.template)
    }

    /// Spawn, wait, and check the exit code against the accepted set.
    pub async fn run(&self) -> Result<(), ShellError> {
        let mut running = self.start()?;
        let exit_code = running.exit_code().await?;
        if self.template.accepts(exit_code) {
            Ok(())
        } else {
            Err(ShellError::UnacceptableExitCode {
                program: self.template.program().to_string(),
                exit_code,
            })
        }
    }

    /// Run with stdout captured and return it as text. Invalid UTF-8 is
    /// replaced rather than rejected.
    pub async fn output(&self) -> Result<String, ShellError> {
        let buffer = Buffer::new();
        self.bake_opts([Opts::new().stdout(buffer.clone())])
            .run()
            .await?;
        Ok(buffer.to_string_lossy())
    }

    /// Run with stdout and stderr interleaved into one capture.
    pub async fn combined_output(&self) -> Result<String, ShellError> {
        let buffer = Buffer::new();
        let sink = Endpoint::new(buffer.clone());
        self.bake_opts([Opts::new().stdout(sink.clone()).stderr(sink)])
            .run()
            .await?;
        Ok(buffer.to_string_lossy())
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Command").field(&self.template).finish()
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
