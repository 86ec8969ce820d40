// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stdio wiring between a child process and its bound endpoints.
//!
//! Files are handed to the child directly. Every other endpoint gets a pipe
//! and a relay task that copies between the pipe and the endpoint's stream.

use std::fs::File;
use std::process::Stdio;

use bake_iox::{
    is_end_of_stream, Endpoint, EndpointError, ReadHandle, Readable, Side, Writable, WriteHandle,
};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdin};
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::command::Command;
use crate::env::RELAY_CHUNK_SIZE;
use crate::error::ShellError;
use crate::template::CommandTemplate;

/// Stream endpoints that need a relay once the child is spawned.
#[derive(Default)]
pub(crate) struct AppliedStdio {
    stdin: Option<ReadHandle>,
    stdout: Option<Sink>,
    stderr: Option<Sink>,
    /// Read end of the pipe shared by stdout and stderr.
    shared: Option<(File, Sink)>,
}

struct Sink {
    handle: WriteHandle,
    close_when_done: bool,
}

/// Relay tasks attached to a running child.
#[derive(Default)]
pub(crate) struct Relays {
    input: Option<JoinHandle<()>>,
    outputs: Vec<JoinHandle<()>>,
    /// Distinct sinks to shut down after the outputs drain.
    closers: Vec<WriteHandle>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Resolve the template's endpoints and configure the child's stdio.
///
/// Unbound streams are inherited from the caller. When stdout and stderr name
/// the same target the child gets a single stream for both, so their
/// relative order survives.
pub(crate) fn apply_stdio(
    cmd: &mut tokio::process::Command,
    template: &CommandTemplate,
) -> Result<AppliedStdio, ShellError> {
    if template.stdin().is_some_and(|e| e.holds::<Command>()) {
        return Err(ShellError::UnsupportedPipeline {
            program: template.program().to_string(),
        });
    }
    // Resolving a channel takes it out of the template, so nothing is
    // resolved until every side is known to be usable.
    if let Some(endpoint) = template.stdin() {
        endpoint.check_readable()?;
    }
    for endpoint in [template.stdout(), template.stderr()].into_iter().flatten() {
        endpoint.check_writable()?;
    }

    let mut applied = AppliedStdio::default();

    match template.stdin() {
        None => {
            cmd.stdin(Stdio::inherit());
        }
        Some(endpoint) => match endpoint.reader()? {
            Readable::File(file) => {
                cmd.stdin(Stdio::from(file));
            }
            Readable::Stream(handle) => {
                cmd.stdin(Stdio::piped());
                applied.stdin = Some(handle);
            }
        },
    }

    match (template.stdout(), template.stderr()) {
        (Some(out), Some(err)) if out.same_target(err) => {
            applied.shared = apply_shared_output(cmd, out, template.program())?;
            // Equal targets can still be distinct endpoints, e.g. two clones
            // of one sender. Release stderr's copy so the channel can close.
            drop(err.writer()?);
        }
        (out, err) => {
            applied.stdout = apply_output(cmd, 1, out)?;
            applied.stderr = apply_output(cmd, 2, err)?;
        }
    }

    Ok(applied)
}

impl AppliedStdio {
    /// Spawn relay tasks for the stream endpoints of a freshly spawned child.
    pub(crate) fn attach(self, child: &mut Child, span: &tracing::Span) -> Relays {
        let mut relays = Relays::default();

        if let (Some(source), Some(stdin)) = (self.stdin, child.stdin.take()) {
            relays.input = Some(tokio::spawn(
                relay_input(source, stdin).instrument(span.clone()),
            ));
        }
        if let (Some(sink), Some(stdout)) = (self.stdout, child.stdout.take()) {
            relays.push_output(stdout, sink, "stdout", span);
        }
        if let (Some(sink), Some(stderr)) = (self.stderr, child.stderr.take()) {
            relays.push_output(stderr, sink, "stderr", span);
        }
        if let Some((reader, sink)) = self.shared {
            relays.push_output(tokio::fs::File::from_std(reader), sink, "stdout+stderr", span);
        }

        relays
    }
}

impl Relays {
    fn push_output<R>(&mut self, from: R, sink: Sink, stream: &'static str, span: &tracing::Span)
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        let task = relay_output(from, sink.handle.clone(), stream).instrument(span.clone());
        self.outputs.push(tokio::spawn(task));
        if sink.close_when_done && !self.closers.iter().any(|h| h.ptr_eq(&sink.handle)) {
            self.closers.push(sink.handle);
        }
    }

    /// Drain output relays and release the endpoints. Call once the child
    /// has exited.
    pub(crate) async fn finish(&mut self) {
        for task in self.outputs.drain(..) {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "output relay task failed");
            }
        }
        for sink in self.closers.drain(..) {
            if let Err(e) = sink.lock().await.shutdown().await {
                tracing::debug!(error = %e, "closing output sink failed");
            }
        }
        // A source that never ends would keep this relay alive forever.
        if let Some(input) = self.input.take() {
            input.abort();
            if let Err(e) = input.await {
                if !e.is_cancelled() {
                    tracing::warn!(error = %e, "input relay task failed");
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn apply_output(
    cmd: &mut tokio::process::Command,
    fd: u32,
    endpoint: Option<&Endpoint>,
) -> Result<Option<Sink>, ShellError> {
    let (stdio, sink) = match endpoint {
        None => (Stdio::inherit(), None),
        Some(endpoint) => match endpoint.writer()? {
            Writable::File(file) => (Stdio::from(file), None),
            Writable::Stream {
                handle,
                close_when_done,
            } => (
                Stdio::piped(),
                Some(Sink {
                    handle,
                    close_when_done,
                }),
            ),
        },
    };
    match fd {
        1 => {
            cmd.stdout(stdio);
        }
        2 => {
            cmd.stderr(stdio);
        }
        _ => {}
    }
    Ok(sink)
}

fn apply_shared_output(
    cmd: &mut tokio::process::Command,
    endpoint: &Endpoint,
    program: &str,
) -> Result<Option<(File, Sink)>, ShellError> {
    match endpoint.writer()? {
        Writable::File(file) => {
            let file_clone = file
                .try_clone()
                .map_err(|source| EndpointError::Duplicate {
                    kind: endpoint.kind(),
                    side: Side::Write,
                    source,
                })?;
            cmd.stdout(Stdio::from(file));
            cmd.stderr(Stdio::from(file_clone));
            Ok(None)
        }
        Writable::Stream {
            handle,
            close_when_done,
        } => {
            let pipe_error = |source: std::io::Error| ShellError::Pipe {
                program: program.to_string(),
                source,
            };
            let (reader, writer) = std::io::pipe().map_err(pipe_error)?;
            let writer_clone = writer.try_clone().map_err(pipe_error)?;
            cmd.stdout(Stdio::from(writer));
            cmd.stderr(Stdio::from(writer_clone));
            Ok(Some((
                pipe_file(reader),
                Sink {
                    handle,
                    close_when_done,
                },
            )))
        }
    }
}

#[cfg(unix)]
fn pipe_file(reader: std::io::PipeReader) -> File {
    File::from(std::os::fd::OwnedFd::from(reader))
}

#[cfg(windows)]
fn pipe_file(reader: std::io::PipeReader) -> File {
    File::from(std::os::windows::io::OwnedHandle::from(reader))
}

async fn relay_input(source: ReadHandle, mut stdin: ChildStdin) {
    let mut reader = source.lock().await;
    let mut chunk = vec![0u8; RELAY_CHUNK_SIZE];
    loop {
        let n = match reader.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(error = %e, "reading stdin source failed");
                break;
            }
        };
        let written = match stdin.write_all(&chunk[..n]).await {
            Ok(()) => stdin.flush().await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            if is_end_of_stream(&e) {
                tracing::debug!("child closed stdin early");
            } else {
                tracing::warn!(error = %e, "writing child stdin failed");
            }
            return;
        }
    }
    if let Err(e) = stdin.shutdown().await {
        tracing::debug!(error = %e, "closing child stdin failed");
    }
}

async fn relay_output<R>(mut from: R, sink: WriteHandle, stream: &'static str)
where
    R: AsyncRead + Unpin,
{
    let mut chunk = vec![0u8; RELAY_CHUNK_SIZE];
    // Once the sink fails, keep draining so the child never blocks on a full pipe.
    let mut sink_open = true;
    loop {
        let n = match from.read(&mut chunk).await {
            Ok(0) => return,
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(stream, error = %e, "reading child output failed");
                return;
            }
        };
        if !sink_open {
            continue;
        }
        let mut writer = sink.lock().await;
        let written = match writer.write_all(&chunk[..n]).await {
            Ok(()) => writer.flush().await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            if is_end_of_stream(&e) {
                tracing::debug!(stream, "output consumer went away; discarding");
            } else {
                tracing::warn!(stream, error = %e, "writing child output failed");
            }
            sink_open = false;
        }
    }
}
