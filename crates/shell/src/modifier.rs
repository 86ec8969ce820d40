// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Modifiers accepted when deriving a [`Command`](crate::Command).

use std::any::Any;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use bake_iox::Endpoint;
use indexmap::IndexMap;

use crate::error::ShellError;
use crate::template::CommandTemplate;

/// Callback observing the fully resolved template just before spawn.
pub type DebugHook = Arc<dyn Fn(&CommandTemplate) + Send + Sync>;

/// Environment changes merged into a template.
///
/// An empty value deletes the variable instead of setting it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env(IndexMap<String, String>);

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Remove `key` from the template's environment.
    pub fn unset(self, key: impl Into<String>) -> Self {
        self.set(key, "")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn into_inner(self) -> IndexMap<String, String> {
        self.0
    }
}

impl<K, V> FromIterator<(K, V)> for Env
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Env(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Env
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Marker that replaces the template's environment with an empty one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearEnv;

/// A bundle of optional overrides. Only fields that were set take effect,
/// so several partial bundles compose without clobbering each other.
#[derive(Debug, Clone, Default)]
pub struct Opts {
    pub(crate) cwd: Option<PathBuf>,
    pub(crate) stdin: Option<Endpoint>,
    pub(crate) stdout: Option<Endpoint>,
    pub(crate) stderr: Option<Endpoint>,
    pub(crate) ok_exit: Option<BTreeSet<i32>>,
}

impl Opts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Bind stdin. See [`Endpoint::new`] for the accepted source kinds.
    pub fn stdin<T: Any + Send>(mut self, source: T) -> Self {
        self.stdin = Some(Endpoint::new(source));
        self
    }

    /// Bind stdout. See [`Endpoint::new`] for the accepted sink kinds.
    pub fn stdout<T: Any + Send>(mut self, sink: T) -> Self {
        self.stdout = Some(Endpoint::new(sink));
        self
    }

    /// Bind stderr. Binding the same target as stdout gives the child one
    /// shared stream for both.
    pub fn stderr<T: Any + Send>(mut self, sink: T) -> Self {
        self.stderr = Some(Endpoint::new(sink));
        self
    }

    /// Replace the set of exit codes treated as success.
    pub fn ok_exit(mut self, codes: impl IntoIterator<Item = i32>) -> Self {
        self.ok_exit = Some(codes.into_iter().collect());
        self
    }
}

/// One derivation step.
#[derive(Clone)]
pub enum Modifier {
    /// Append arguments.
    Args(Vec<String>),
    /// Merge into the environment; empty values delete.
    Env(Env),
    /// Replace the environment with an empty one.
    ClearEnv,
    /// Override the fields set in the bundle.
    Opts(Opts),
    /// Register a debug hook.
    Debug(DebugHook),
}

fn peel<T, F>(value: Box<dyn Any + Send>, wrap: F) -> Result<Modifier, Box<dyn Any + Send>>
where
    T: Any,
    F: FnOnce(T) -> Modifier,
{
    value.downcast::<T>().map(|inner| wrap(*inner))
}

impl Modifier {
    /// Interpret an arbitrary value as a modifier.
    ///
    /// Accepts `&'static str`, `String`, `Vec<String>`, [`Env`], [`ClearEnv`],
    /// [`Opts`], [`DebugHook`] and `Modifier` itself. Anything else fails with
    /// [`ShellError::IncomprehensibleModifier`].
    pub fn from_value<T: Any + Send>(value: T) -> Result<Self, ShellError> {
        let value: Box<dyn Any + Send> = Box::new(value);
        peel::<Modifier, _>(value, |modifier| modifier)
            .or_else(|v| peel::<&'static str, _>(v, Modifier::from))
            .or_else(|v| peel::<String, _>(v, Modifier::from))
            .or_else(|v| peel::<Vec<String>, _>(v, Modifier::Args))
            .or_else(|v| peel::<Env, _>(v, Modifier::Env))
            .or_else(|v| peel::<ClearEnv, _>(v, |_| Modifier::ClearEnv))
            .or_else(|v| peel::<Opts, _>(v, Modifier::Opts))
            .or_else(|v| peel::<DebugHook, _>(v, Modifier::Debug))
            .map_err(|_| ShellError::IncomprehensibleModifier {
                type_name: std::any::type_name::<T>(),
            })
    }
}

impl From<&str> for Modifier {
    fn from(arg: &str) -> Self {
        Modifier::Args(vec![arg.to_string()])
    }
}

impl From<String> for Modifier {
    fn from(arg: String) -> Self {
        Modifier::Args(vec![arg])
    }
}

impl From<Vec<String>> for Modifier {
    fn from(args: Vec<String>) -> Self {
        Modifier::Args(args)
    }
}

impl From<Env> for Modifier {
    fn from(env: Env) -> Self {
        Modifier::Env(env)
    }
}

impl From<ClearEnv> for Modifier {
    fn from(_: ClearEnv) -> Self {
        Modifier::ClearEnv
    }
}

impl From<Opts> for Modifier {
    fn from(opts: Opts) -> Self {
        Modifier::Opts(opts)
    }
}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Args(args) => f.debug_tuple("Args").field(args).finish(),
            Modifier::Env(env) => f.debug_tuple("Env").field(env).finish(),
            Modifier::ClearEnv => f.write_str("ClearEnv"),
            Modifier::Opts(opts) => f.debug_tuple("Opts").field(opts).finish(),
            Modifier::Debug(_) => f.write_str("Debug(..)"),
        }
    }
}

#[cfg(test)]
#[path = "modifier_tests.rs"]
mod tests;
