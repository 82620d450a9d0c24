// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers: a scripted command channel and recording views.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use barctl_core::{Command, ErrorCode, RestoreProgress};
use tokio_util::sync::CancellationToken;

use crate::cache::CachedRecord;
use crate::channel::{ChannelError, ChannelResult, CommandChannel, CommandStream, Completion, Reply};
use crate::commands::Session;
use crate::config::Config;
use crate::restore::PasswordProvider;
use crate::ui::{CollectionView, ProgressView, UiContext, UiThread};

/// Code the mock reports for an aborted command.
pub const ABORTED: ErrorCode = ErrorCode(9);

/// Session over `channel` with the default config and a fresh UI thread.
pub fn session(channel: &MockChannel) -> (Session, UiThread) {
    let (ui, ui_thread) = UiContext::spawn().unwrap();
    let session = Session {
        config: Config::default(),
        channel: Arc::new(channel.clone()),
        ui,
    };
    (session, ui_thread)
}

/// Scripted answer to one command.
enum Script {
    Replies(Vec<Reply>),
    /// Lines, then timeouts until aborted.
    Hang(Vec<String>),
    /// Lines, then the connection drops.
    Drop(Vec<String>),
    /// `execute` itself fails.
    Broken,
}

/// Command channel answering from a queue of scripts. Commands beyond the
/// queue complete successfully with no lines.
#[derive(Clone, Default)]
pub struct MockChannel {
    scripts: Arc<Mutex<VecDeque<Script>>>,
    sent: Arc<Mutex<Vec<Command>>>,
    aborts: Arc<AtomicUsize>,
}

impl MockChannel {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, script: Script) {
        self.scripts.lock().unwrap().push_back(script);
    }

    /// Answer with `lines` and a successful completion.
    pub fn push_ok(&self, lines: &[&str]) {
        let mut replies: Vec<Reply> = lines.iter().map(|l| Reply::Line(l.to_string())).collect();
        replies.push(Reply::Done(Completion::ok()));
        self.push(Script::Replies(replies));
    }

    /// Answer with `lines` and an error completion.
    pub fn push_lines_then_error(&self, lines: &[&str], code: ErrorCode, text: &str) {
        let mut replies: Vec<Reply> = lines.iter().map(|l| Reply::Line(l.to_string())).collect();
        replies.push(Reply::Done(Completion::error(code, text)));
        self.push(Script::Replies(replies));
    }

    pub fn push_error(&self, code: ErrorCode, text: &str) {
        self.push_lines_then_error(&[], code, text);
    }

    pub fn push_hang(&self, lines: &[&str]) {
        self.push(Script::Hang(lines.iter().map(|l| l.to_string()).collect()));
    }

    pub fn push_drop(&self, lines: &[&str]) {
        self.push(Script::Drop(lines.iter().map(|l| l.to_string()).collect()));
    }

    pub fn push_broken(&self) {
        self.push(Script::Broken);
    }

    /// Every command executed so far.
    pub fn sent(&self) -> Vec<Command> {
        self.sent.lock().unwrap().clone()
    }

    /// Keywords of every command executed so far.
    pub fn sent_names(&self) -> Vec<&'static str> {
        self.sent().iter().map(Command::name).collect()
    }

    pub fn aborts(&self) -> usize {
        self.aborts.load(Ordering::SeqCst)
    }

    /// Wait until `n` commands were executed.
    pub async fn wait_for_sent(&self, n: usize) {
        while self.sent.lock().unwrap().len() < n {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

impl CommandChannel for MockChannel {
    fn execute(
        &self,
        command: &Command,
    ) -> Pin<Box<dyn Future<Output = ChannelResult<Box<dyn CommandStream>>> + Send + '_>> {
        let command = command.clone();
        Box::pin(async move {
            self.sent.lock().unwrap().push(command);
            let script = self
                .scripts
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Script::Replies(vec![Reply::Done(Completion::ok())]));

            let stream = match script {
                Script::Broken => {
                    return Err(ChannelError::ConnectionFailed("mock failure".into()))
                }
                Script::Replies(replies) => MockStream::new(replies, Tail::Finished, &self.aborts),
                Script::Hang(lines) => MockStream::new(lines_of(lines), Tail::Hang, &self.aborts),
                Script::Drop(lines) => MockStream::new(lines_of(lines), Tail::Closed, &self.aborts),
            };
            Ok(Box::new(stream) as Box<dyn CommandStream>)
        })
    }
}

fn lines_of(lines: Vec<String>) -> Vec<Reply> {
    lines.into_iter().map(Reply::Line).collect()
}

enum Tail {
    Finished,
    Hang,
    Closed,
}

struct MockStream {
    replies: VecDeque<Reply>,
    tail: Tail,
    finished: Option<Completion>,
    aborted: bool,
    aborts: Arc<AtomicUsize>,
}

impl MockStream {
    fn new(replies: Vec<Reply>, tail: Tail, aborts: &Arc<AtomicUsize>) -> Self {
        MockStream {
            replies: replies.into(),
            tail,
            finished: None,
            aborted: false,
            aborts: Arc::clone(aborts),
        }
    }
}

impl CommandStream for MockStream {
    fn next_reply(
        &mut self,
        wait: Duration,
    ) -> Pin<Box<dyn Future<Output = ChannelResult<Reply>> + Send + '_>> {
        Box::pin(async move {
            if let Some(completion) = &self.finished {
                return Ok(Reply::Done(completion.clone()));
            }
            if self.aborted {
                let completion = Completion::error(ABORTED, "aborted");
                self.finished = Some(completion.clone());
                return Ok(Reply::Done(completion));
            }
            if let Some(reply) = self.replies.pop_front() {
                if let Reply::Done(completion) = &reply {
                    self.finished = Some(completion.clone());
                }
                return Ok(reply);
            }
            match self.tail {
                Tail::Hang => {
                    tokio::time::sleep(wait).await;
                    Ok(Reply::Timeout)
                }
                Tail::Closed => Err(ChannelError::ConnectionClosed),
                Tail::Finished => Ok(Reply::Done(Completion::ok())),
            }
        })
    }

    fn abort(&mut self) -> Pin<Box<dyn Future<Output = ChannelResult<()>> + Send + '_>> {
        Box::pin(async move {
            self.aborts.fetch_add(1, Ordering::SeqCst);
            self.aborted = true;
            Ok(())
        })
    }
}

/// Collection view recording everything it is shown.
pub struct RecordingView<R> {
    shows: Mutex<Vec<Vec<CachedRecord<R>>>>,
    busy: Mutex<Vec<bool>>,
}

impl<R: Clone> RecordingView<R> {
    pub fn new() -> Arc<Self> {
        Arc::new(RecordingView {
            shows: Mutex::new(Vec::new()),
            busy: Mutex::new(Vec::new()),
        })
    }

    pub fn shows(&self) -> Vec<Vec<CachedRecord<R>>> {
        self.shows.lock().unwrap().clone()
    }

    pub fn busy(&self) -> Vec<bool> {
        self.busy.lock().unwrap().clone()
    }
}

impl<R: Send> CollectionView<R> for RecordingView<R> {
    fn show(&self, records: Vec<CachedRecord<R>>) {
        self.shows.lock().unwrap().push(records);
    }

    fn set_busy(&self, busy: bool) {
        self.busy.lock().unwrap().push(busy);
    }
}

/// One progress view callback.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Started(usize, usize, String),
    Progress(String, f64),
    Failed(String, Option<ErrorCode>, String),
    Finished(String),
}

/// Progress view recording its callbacks. Optionally cancels a token once a
/// given number of items finished.
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<ProgressEvent>>,
    cancel_after: Option<(usize, CancellationToken)>,
}

impl RecordingProgress {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn cancelling_after(finished: usize, cancel: CancellationToken) -> Arc<Self> {
        Arc::new(RecordingProgress {
            events: Mutex::new(Vec::new()),
            cancel_after: Some((finished, cancel)),
        })
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn failures(&self) -> Vec<ProgressEvent> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, ProgressEvent::Failed(..)))
            .collect()
    }
}

impl ProgressView for RecordingProgress {
    fn item_started(&self, index: usize, count: usize, label: &str) {
        self.events
            .lock()
            .unwrap()
            .push(ProgressEvent::Started(index, count, label.to_string()));
    }

    fn progress(&self, progress: &RestoreProgress) {
        self.events
            .lock()
            .unwrap()
            .push(ProgressEvent::Progress(progress.name.clone(), progress.fraction()));
    }

    fn item_failed(&self, label: &str, code: Option<ErrorCode>, text: &str) {
        self.events.lock().unwrap().push(ProgressEvent::Failed(
            label.to_string(),
            code,
            text.to_string(),
        ));
    }

    fn item_finished(&self, label: &str) {
        let mut events = self.events.lock().unwrap();
        events.push(ProgressEvent::Finished(label.to_string()));
        if let Some((after, cancel)) = &self.cancel_after {
            let finished = events
                .iter()
                .filter(|e| matches!(e, ProgressEvent::Finished(_)))
                .count();
            if finished >= *after {
                cancel.cancel();
            }
        }
    }
}

/// Password provider answering from a script and recording each prompt.
#[derive(Default)]
pub struct ScriptedPasswords {
    answers: Mutex<VecDeque<Option<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedPasswords {
    pub fn answering(answers: &[Option<&str>]) -> Arc<Self> {
        Arc::new(ScriptedPasswords {
            answers: Mutex::new(answers.iter().map(|a| a.map(str::to_string)).collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl PasswordProvider for ScriptedPasswords {
    fn prompt(&self, target: &str) -> Option<String> {
        self.prompts.lock().unwrap().push(target.to_string());
        self.answers.lock().unwrap().pop_front().flatten()
    }
}
