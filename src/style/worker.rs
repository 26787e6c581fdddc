//! Background worker task for style linting.
//!
//! The worker owns its [`StyleLintSession`] and processes messages strictly one
//! at a time, in the order they were sent. A `lint` sent while another is still
//! running waits in the channel; there is no cancellation, so superseded
//! requests still produce (stale) responses.
//!
//! Posting never waits: the request channel is unbounded. Only the response
//! channel is bounded, so a caller that stops reading holds the worker back
//! without ever blocking itself.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::protocol::{WorkerMessage, WorkerResponse};
use super::session::StyleLintSession;
use crate::error::{LintError, LintResult};

/// Default bound for the response channel.
pub const DEFAULT_QUEUE_CAPACITY: usize = 32;

pub struct StyleLintWorker {
    session: StyleLintSession,
    rx: mpsc::UnboundedReceiver<WorkerMessage>,
    tx: mpsc::Sender<WorkerResponse>,
}

impl StyleLintWorker {
    /// Spawn the worker on the current tokio runtime and return the caller's
    /// end of the channel pair.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(session: StyleLintSession, capacity: usize) -> StyleWorkerHandle {
        let capacity = capacity.max(1);
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let (response_tx, response_rx) = mpsc::channel(capacity);
        let worker = StyleLintWorker {
            session,
            rx: message_rx,
            tx: response_tx,
        };
        let task = tokio::spawn(worker.run());
        StyleWorkerHandle {
            tx: message_tx,
            rx: response_rx,
            task,
        }
    }

    /// Run the worker event loop until the request channel closes or the
    /// response receiver is dropped.
    pub async fn run(mut self) {
        log::info!("{} worker started", self.session.source_label());

        while let Some(message) = self.rx.recv().await {
            let Some(response) = self.session.handle(message).await else {
                continue;
            };
            if self.tx.send(response).await.is_err() {
                log::debug!("response receiver dropped");
                break;
            }
        }

        log::info!("{} worker shutting down", self.session.source_label());
    }
}

/// The editor-side end of a running worker.
pub struct StyleWorkerHandle {
    tx: mpsc::UnboundedSender<WorkerMessage>,
    rx: mpsc::Receiver<WorkerResponse>,
    task: JoinHandle<()>,
}

impl StyleWorkerHandle {
    /// Queue a message for the worker without waiting.
    ///
    /// The worker pauses once its response channel is full, until responses
    /// are read with [`recv`](Self::recv).
    pub fn post_message(&self, message: WorkerMessage) -> LintResult<()> {
        self.tx.send(message).map_err(|_| LintError::WorkerGone)
    }

    /// Decode a JSON message and queue it.
    pub fn post_json(&self, json: &str) -> LintResult<()> {
        let message = WorkerMessage::from_json(json)?;
        self.post_message(message)
    }

    /// Next response in completion order, or `None` once the worker has exited
    /// and all responses were read.
    pub async fn recv(&mut self) -> Option<WorkerResponse> {
        self.rx.recv().await
    }

    /// Non-blocking variant of [`recv`](Self::recv).
    pub fn try_recv(&mut self) -> Option<WorkerResponse> {
        self.rx.try_recv().ok()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Close both channels and wait for the worker to exit.
    ///
    /// A lint already in progress runs to completion first; its response is
    /// discarded.
    pub async fn shutdown(self) {
        let StyleWorkerHandle { tx, rx, task } = self;
        drop(tx);
        drop(rx);
        if let Err(e) = task.await {
            log::error!("style lint worker terminated abnormally: {e}");
        }
    }
}
