// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for building and executing commands.

use bake_iox::{EndpointError, Side};

/// Errors surfaced by [`Command`](crate::Command) construction and execution.
///
/// Configuration mistakes and process failures share this one type, so a
/// caller can handle "bad modifier" and "bad exit code" on the same path.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// A modifier of a type outside the recognized set was passed.
    #[error("incomprehensible command modifier: do not want type `{type_name}`")]
    IncomprehensibleModifier {
        /// Type name of the rejected value.
        type_name: &'static str,
    },

    /// A stdio binding could not be turned into a stream.
    #[error("cannot bind stdio endpoint: {0}")]
    Endpoint(#[from] EndpointError),

    /// One command was bound as another command's stdin.
    #[error("piping command output into `{program}` is not implemented")]
    UnsupportedPipeline { program: String },

    /// The process exited with a code outside the accepted set.
    #[error("command `{program}` exited with unexpected status {exit_code}")]
    UnacceptableExitCode { program: String, exit_code: i32 },

    /// The program could not be spawned.
    #[error("failed to spawn `{program}`: {source}")]
    SpawnFailed {
        program: String,
        source: std::io::Error,
    },

    /// Waiting on the process failed.
    #[error("failed to wait on `{program}`: {source}")]
    WaitFailed {
        program: String,
        source: std::io::Error,
    },

    /// The shared stdout/stderr pipe could not be created.
    #[error("failed to create output pipe for `{program}`: {source}")]
    Pipe {
        program: String,
        source: std::io::Error,
    },
}

impl ShellError {
    /// True if this is an endpoint resolution failure on `side`.
    pub fn is_endpoint_on(&self, side: Side) -> bool {
        matches!(self, ShellError::Endpoint(e) if e.side() == side)
    }

    /// Exit code carried by an [`UnacceptableExitCode`](Self::UnacceptableExitCode) error.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ShellError::UnacceptableExitCode { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
