//! Stdio host bridge.
//!
//! The editor panel and the router speak newline-delimited JSON over
//! this process's stdin/stdout. Three tasks keep the session live:
//! a reader (stdin lines to commands, with `promptReply` lines routed
//! to the pending name prompt), the router loop (one command at a
//! time; awaiting a prompt suspends only the current command), and a
//! writer draining pushes to stdout. A hanging send never stalls the
//! loop because the router spawns sends onto their own tasks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, oneshot};

use nectar_application::ports::{CollectionStorage, HttpClient, NamePrompt, ViewSink};
use nectar_application::{Command, Router, ViewPush};

/// Wire tag of an inbound prompt answer.
const PROMPT_REPLY_COMMAND: &str = "promptReply";

/// Shared handle on the outbound line channel.
#[derive(Clone)]
struct Outbound {
    tx: mpsc::UnboundedSender<String>,
}

impl Outbound {
    fn send_json<T: Serialize>(&self, message: &T) {
        match serde_json::to_string(message) {
            Ok(line) => {
                let _ = self.tx.send(line);
            }
            Err(error) => tracing::error!(%error, "failed to serialize outbound message"),
        }
    }
}

/// View sink writing pushes as JSON lines on stdout.
struct StdoutView {
    out: Outbound,
}

impl ViewSink for StdoutView {
    async fn push(&self, push: ViewPush) {
        self.out.send_json(&push);
    }
}

#[derive(Serialize)]
struct PromptMessage<'a> {
    command: &'static str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a str>,
}

/// Name prompting over the host protocol.
///
/// A prompt emits a `promptName` line and suspends until the matching
/// `promptReply` arrives. At most one prompt is outstanding, since the
/// router handles one command at a time. When stdin closes, the
/// pending prompt (and every later one) resolves as cancelled so the
/// session can drain.
#[derive(Clone)]
struct HostPrompt {
    inner: Arc<PromptInner>,
}

struct PromptInner {
    out: Outbound,
    pending: Mutex<Option<oneshot::Sender<Option<String>>>>,
    closed: AtomicBool,
}

impl HostPrompt {
    fn new(out: Outbound) -> Self {
        Self {
            inner: Arc::new(PromptInner {
                out,
                pending: Mutex::new(None),
                closed: AtomicBool::new(false),
            }),
        }
    }

    fn resolve(&self, value: Option<String>) {
        let sender = self
            .inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match sender {
            Some(sender) => {
                let _ = sender.send(value);
            }
            None => tracing::warn!("unsolicited prompt reply"),
        }
    }

    /// Marks the host closed and cancels the pending prompt, if any.
    fn close(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);
        let pending = self
            .inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(sender) = pending {
            let _ = sender.send(None);
        }
    }
}

impl NamePrompt for HostPrompt {
    async fn request_name(&self, prompt: &str, initial: Option<&str>) -> Option<String> {
        if self.inner.closed.load(Ordering::SeqCst) {
            return None;
        }
        let (tx, rx) = oneshot::channel();
        let abandoned = {
            let mut pending = self
                .inner
                .pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            pending.replace(tx)
        };
        if abandoned.is_some() {
            tracing::warn!("abandoning unanswered prompt");
        }
        self.inner.out.send_json(&PromptMessage {
            command: "promptName",
            message: prompt,
            value: initial,
        });
        rx.await.ok().flatten()
    }
}

enum Inbound {
    Reply(Option<String>),
    Command(Command),
}

fn parse_line(line: &str) -> Option<Inbound> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value: serde_json::Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(%error, "malformed host line");
            return None;
        }
    };
    if value.get("command").and_then(serde_json::Value::as_str) == Some(PROMPT_REPLY_COMMAND) {
        let reply = value
            .get("value")
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string);
        return Some(Inbound::Reply(reply));
    }
    match Command::deserialize(value) {
        Ok(command) => Some(Inbound::Command(command)),
        Err(error) => {
            tracing::warn!(%error, "unrecognized host command");
            None
        }
    }
}

async fn read_lines(commands: mpsc::UnboundedSender<Command>, prompt: HostPrompt) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match parse_line(&line) {
                Some(Inbound::Reply(value)) => prompt.resolve(value),
                Some(Inbound::Command(command)) => {
                    if commands.send(command).is_err() {
                        break;
                    }
                }
                None => {}
            },
            Ok(None) => break,
            Err(error) => {
                tracing::warn!(%error, "stdin read failed");
                break;
            }
        }
    }
    prompt.close();
}

async fn write_lines(mut lines: mpsc::UnboundedReceiver<String>) {
    let mut stdout = tokio::io::stdout();
    while let Some(mut line) = lines.recv().await {
        line.push('\n');
        if let Err(error) = stdout.write_all(line.as_bytes()).await {
            tracing::warn!(%error, "stdout write failed");
            return;
        }
        if let Err(error) = stdout.flush().await {
            tracing::warn!(%error, "stdout flush failed");
            return;
        }
    }
}

/// Serves the host session until stdin closes.
pub async fn run<S, C>(storage: S, client: C)
where
    S: CollectionStorage,
    C: HttpClient + 'static,
{
    let (out_tx, out_rx) = mpsc::unbounded_channel();
    let outbound = Outbound { tx: out_tx };
    let view = Arc::new(StdoutView {
        out: outbound.clone(),
    });
    let prompt = HostPrompt::new(outbound);

    let writer = tokio::spawn(write_lines(out_rx));
    let (command_tx, mut command_rx) = mpsc::unbounded_channel();
    let reader = tokio::spawn(read_lines(command_tx, prompt.clone()));

    let mut router = Router::new(storage, client, prompt, view);
    while let Some(command) = command_rx.recv().await {
        if let Err(error) = router.handle(command).await {
            tracing::warn!(%error, "command failed");
        }
    }

    // Stdin is gone; let queued output flush before exiting.
    drop(router);
    let _ = reader.await;
    let _ = writer.await;
}
