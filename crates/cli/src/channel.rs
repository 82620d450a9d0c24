// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command channel to the archiver server.
//!
//! Provides a trait-based channel layer that enables:
//! - A TCP line channel for production
//! - Scripted channels for unit testing
//!
//! Every command yields a [`CommandStream`] of result lines followed by one
//! completion carrying the server's error code.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use barctl_core::scan::Format;
use barctl_core::{Command, ErrorCode};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Error type for channel operations.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// Connection failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Connection closed while a command was running.
    #[error("connection closed")]
    ConnectionClosed,

    /// Send failed.
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// Result type for channel operations.
pub type ChannelResult<T> = Result<T, ChannelError>;

/// Final status of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub code: ErrorCode,
    /// Server-supplied error text; empty on success.
    pub text: String,
}

impl Completion {
    pub fn ok() -> Self {
        Completion {
            code: ErrorCode::NONE,
            text: String::new(),
        }
    }

    pub fn error(code: ErrorCode, text: impl Into<String>) -> Self {
        Completion {
            code,
            text: text.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code.is_ok()
    }
}

/// One step of a command's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A result line, still escaped as sent by the server.
    Line(String),
    /// Nothing arrived within the wait; the command is still running.
    Timeout,
    /// The command finished.
    Done(Completion),
}

/// Channel over which commands are sent to the server.
///
/// Implementations must allow concurrent use from several tasks.
pub trait CommandChannel: Send + Sync {
    /// Send a command and return the stream of its replies.
    fn execute(
        &self,
        command: &Command,
    ) -> Pin<Box<dyn Future<Output = ChannelResult<Box<dyn CommandStream>>> + Send + '_>>;
}

/// Replies of one running command.
pub trait CommandStream: Send {
    /// Wait up to `wait` for the next reply.
    ///
    /// After [`Reply::Done`] every further call returns the same completion.
    fn next_reply(
        &mut self,
        wait: Duration,
    ) -> Pin<Box<dyn Future<Output = ChannelResult<Reply>> + Send + '_>>;

    /// Ask the server to abort the command.
    fn abort(&mut self) -> Pin<Box<dyn Future<Output = ChannelResult<()>> + Send + '_>>;
}

/// Collected output of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub lines: Vec<String>,
    pub completion: Completion,
}

/// Run `command` to completion, collecting its result lines.
pub async fn run_command(
    channel: &dyn CommandChannel,
    command: &Command,
    wait: Duration,
) -> ChannelResult<CommandOutput> {
    let mut stream = channel.execute(command).await?;
    let mut lines = Vec::new();
    loop {
        match stream.next_reply(wait).await? {
            Reply::Line(line) => lines.push(line),
            Reply::Timeout => continue,
            Reply::Done(completion) => return Ok(CommandOutput { lines, completion }),
        }
    }
}

type ReplySender = mpsc::UnboundedSender<Reply>;

/// Reply routes of the commands still running on a connection.
#[derive(Default)]
struct Routes {
    senders: HashMap<u64, ReplySender>,
    /// Set once the reader task has exited; no reply can arrive after that.
    closed: bool,
}

impl Routes {
    fn register(&mut self, id: u64, tx: ReplySender) -> ChannelResult<()> {
        if self.closed {
            return Err(ChannelError::ConnectionClosed);
        }
        self.senders.insert(id, tx);
        Ok(())
    }

    fn close(&mut self) {
        self.closed = true;
        // Dropping the senders ends every open stream with ConnectionClosed.
        self.senders.clear();
    }
}

type PendingMap = Arc<Mutex<Routes>>;

fn lock_pending(pending: &PendingMap) -> std::sync::MutexGuard<'_, Routes> {
    pending.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Line channel over TCP.
///
/// The client writes `<id> <command>` lines; the server answers with
/// `<id> <completed> <error code> <data>` lines. A reader task routes each
/// answer to the stream of the command with that id.
pub struct TcpChannel {
    writer: Arc<tokio::sync::Mutex<OwnedWriteHalf>>,
    pending: PendingMap,
    next_id: Arc<AtomicU64>,
    reader: JoinHandle<()>,
}

impl TcpChannel {
    /// Connect to `address` (`host:port`).
    pub async fn connect(address: &str) -> ChannelResult<Self> {
        let stream = TcpStream::connect(address)
            .await
            .map_err(|e| ChannelError::ConnectionFailed(format!("{address}: {e}")))?;
        let (read_half, write_half) = stream.into_split();
        let pending: PendingMap = Arc::new(Mutex::new(Routes::default()));
        let reader = tokio::spawn(read_replies(read_half, Arc::clone(&pending)));
        tracing::info!(address, "connected to server");

        Ok(TcpChannel {
            writer: Arc::new(tokio::sync::Mutex::new(write_half)),
            pending,
            next_id: Arc::new(AtomicU64::new(1)),
            reader,
        })
    }

    async fn send(&self, command: &Command) -> ChannelResult<TcpCommandStream> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        lock_pending(&self.pending).register(id, tx)?;

        tracing::debug!(id, command = %command, "sending command");
        if let Err(e) = write_line(&self.writer, id, &command.to_line()).await {
            lock_pending(&self.pending).senders.remove(&id);
            return Err(e);
        }

        Ok(TcpCommandStream {
            id,
            replies: rx,
            finished: None,
            writer: Arc::clone(&self.writer),
            pending: Arc::clone(&self.pending),
            next_id: Arc::clone(&self.next_id),
        })
    }
}

impl Drop for TcpChannel {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

impl CommandChannel for TcpChannel {
    fn execute(
        &self,
        command: &Command,
    ) -> Pin<Box<dyn Future<Output = ChannelResult<Box<dyn CommandStream>>> + Send + '_>> {
        let command = command.clone();
        Box::pin(async move {
            let stream = self.send(&command).await?;
            Ok(Box::new(stream) as Box<dyn CommandStream>)
        })
    }
}

async fn write_line(
    writer: &tokio::sync::Mutex<OwnedWriteHalf>,
    id: u64,
    line: &str,
) -> ChannelResult<()> {
    let mut writer = writer.lock().await;
    writer
        .write_all(format!("{id} {line}\n").as_bytes())
        .await
        .map_err(|e| ChannelError::SendFailed(e.to_string()))?;
    writer
        .flush()
        .await
        .map_err(|e| ChannelError::SendFailed(e.to_string()))
}

/// Routes server answers to the waiting command streams.
async fn read_replies(read_half: OwnedReadHalf, pending: PendingMap) {
    let format = match Format::compile("%lu %y %u %*s") {
        Ok(format) => format,
        Err(e) => {
            tracing::error!(error = %e, "invalid reply format");
            return;
        }
    };
    let mut lines = BufReader::new(read_half).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                tracing::info!("server closed the connection");
                break;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read from server");
                break;
            }
        };

        let (id, completed, code, data) = match parse_reply(&format, &line) {
            Ok(parts) => parts,
            Err(e) => {
                tracing::warn!(line = %line, error = %e, "dropping malformed reply");
                continue;
            }
        };

        let mut routes = lock_pending(&pending);
        let Some(tx) = routes.senders.get(&id) else {
            tracing::debug!(id, "dropping reply for unknown command");
            continue;
        };

        let mut replies = Vec::with_capacity(2);
        if completed {
            if code.is_ok() {
                if !data.is_empty() {
                    replies.push(Reply::Line(data));
                }
                replies.push(Reply::Done(Completion::ok()));
            } else {
                replies.push(Reply::Done(Completion::error(code, data)));
            }
        } else {
            replies.push(Reply::Line(data));
        }

        let delivered = replies.into_iter().all(|reply| tx.send(reply).is_ok());
        if completed || !delivered {
            routes.senders.remove(&id);
        }
    }

    lock_pending(&pending).close();
}

fn parse_reply(format: &Format, line: &str) -> barctl_core::Result<(u64, bool, ErrorCode, String)> {
    let fields = format.parse(line)?;
    let mut r = fields.reader();
    Ok((
        r.ulong()?,
        r.boolean()?,
        ErrorCode(r.uint()?),
        r.string()?,
    ))
}

struct TcpCommandStream {
    id: u64,
    replies: mpsc::UnboundedReceiver<Reply>,
    finished: Option<Completion>,
    writer: Arc<tokio::sync::Mutex<OwnedWriteHalf>>,
    pending: PendingMap,
    next_id: Arc<AtomicU64>,
}

impl CommandStream for TcpCommandStream {
    fn next_reply(
        &mut self,
        wait: Duration,
    ) -> Pin<Box<dyn Future<Output = ChannelResult<Reply>> + Send + '_>> {
        Box::pin(async move {
            if let Some(completion) = &self.finished {
                return Ok(Reply::Done(completion.clone()));
            }
            match tokio::time::timeout(wait, self.replies.recv()).await {
                Err(_) => Ok(Reply::Timeout),
                Ok(None) => Err(ChannelError::ConnectionClosed),
                Ok(Some(reply)) => {
                    if let Reply::Done(completion) = &reply {
                        self.finished = Some(completion.clone());
                    }
                    Ok(reply)
                }
            }
        })
    }

    fn abort(&mut self) -> Pin<Box<dyn Future<Output = ChannelResult<()>> + Send + '_>> {
        Box::pin(async move {
            if self.finished.is_some() {
                return Ok(());
            }
            let abort = Command::Abort {
                command_id: self.id,
            };
            // The abort's own answer has no reader; register a closed sender
            // so the reply is consumed quietly.
            let abort_id = self.next_id.fetch_add(1, Ordering::Relaxed);
            let (tx, _) = mpsc::unbounded_channel();
            lock_pending(&self.pending).register(abort_id, tx)?;
            tracing::debug!(id = self.id, abort_id, "aborting command");
            let result = write_line(&self.writer, abort_id, &abort.to_line()).await;
            if result.is_err() {
                lock_pending(&self.pending).senders.remove(&abort_id);
            }
            result
        })
    }
}

impl Drop for TcpCommandStream {
    fn drop(&mut self) {
        if self.finished.is_none() {
            lock_pending(&self.pending).senders.remove(&self.id);
        }
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
