// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Endpoint resolution errors.

use thiserror::Error;

/// The direction an endpoint was being resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The endpoint feeds a child's stdin.
    Read,
    /// The endpoint receives a child's stdout or stderr.
    Write,
}

/// Errors that can occur while turning an [`Endpoint`](crate::Endpoint) into a stream.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The bound value cannot act as a data sink.
    #[error("cannot write process output into a value of type `{kind}`")]
    Unwritable {
        /// Type name of the rejected value.
        kind: &'static str,
    },

    /// The bound value cannot act as a data source.
    #[error("cannot read process input from a value of type `{kind}`")]
    Unreadable {
        /// Type name of the rejected value.
        kind: &'static str,
    },

    /// A bound file handle could not be duplicated for the child.
    #[error("cannot duplicate file handle `{kind}`: {source}")]
    Duplicate {
        /// Type name of the bound value.
        kind: &'static str,
        /// Direction the handle was resolved for.
        side: Side,
        source: std::io::Error,
    },
}

impl EndpointError {
    /// Returns the side that failed to resolve.
    pub fn side(&self) -> Side {
        match self {
            EndpointError::Unwritable { .. } => Side::Write,
            EndpointError::Unreadable { .. } => Side::Read,
            EndpointError::Duplicate { side, .. } => *side,
        }
    }

    /// Returns the type name of the value that failed to resolve.
    pub fn kind(&self) -> &'static str {
        match self {
            EndpointError::Unwritable { kind }
            | EndpointError::Unreadable { kind }
            | EndpointError::Duplicate { kind, .. } => kind,
        }
    }
}
