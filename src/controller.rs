//! Owns a `SessionState` and runs its deferred work on the tokio runtime.
//!
//! Simulator tasks never touch the state. They send a `SessionEvent` back and the
//! controller applies it in `next_event`, so all mutation happens in one place. Every
//! task watches the session's cancellation token and drops its result once the
//! session is shut down.

use crate::assistant::{CannedResponder, Responder, simulate_reply, simulate_upload};
use crate::config::Config;
use crate::session::{SessionState, UploadError};
use crate::types::{Notice, UploadFile};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Completion of a deferred simulator task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    ReplyReady(String),
    UploadProcessed(Vec<String>),
}

pub struct SessionController {
    state: SessionState,
    config: Config,
    responder: Arc<dyn Responder>,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    cancel: CancellationToken,
    pending: usize,
}

impl SessionController {
    pub fn new(config: Config) -> Self {
        Self::with_responder(config, Arc::new(CannedResponder))
    }

    pub fn with_responder(config: Config, responder: Arc<dyn Responder>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: SessionState::new(),
            config,
            responder,
            events_tx,
            events_rx,
            cancel: CancellationToken::new(),
            pending: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Number of simulator tasks whose result has not been applied yet.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Returns false when the text was ignored (blank, or a reply is still pending).
    pub fn submit(&mut self, text: &str) -> bool {
        let Some(request) = self.state.submit_user_message(text) else {
            return false;
        };

        let responder = Arc::clone(&self.responder);
        let latency = self.config.reply_delay;
        self.spawn_deferred(async move {
            let reply = simulate_reply(responder.as_ref(), request, latency).await;
            SessionEvent::ReplyReady(reply)
        });
        true
    }

    pub fn start_upload(&mut self, files: Vec<UploadFile>) -> Result<(), UploadError> {
        let request = self.state.start_upload(files)?;
        let latency = self.config.upload_delay;
        self.spawn_deferred(async move {
            SessionEvent::UploadProcessed(simulate_upload(request, latency).await)
        });
        Ok(())
    }

    pub fn clear_conversation(&mut self) {
        self.state.clear_conversation();
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.set_input(text);
    }

    pub fn open_upload_dialog(&mut self) {
        self.state.open_upload_dialog();
    }

    /// Returns false while an upload is processing.
    pub fn close_upload_dialog(&mut self) -> bool {
        self.state.close_upload_dialog()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.state.take_notices()
    }

    /// Waits for the next simulator completion and applies it. Returns `None` when
    /// nothing is pending or the session has been shut down.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        if self.pending == 0 || self.cancel.is_cancelled() {
            return None;
        }

        let event = tokio::select! {
            _ = self.cancel.cancelled() => return None,
            event = self.events_rx.recv() => event?,
        };
        self.pending -= 1;
        self.apply(event.clone());
        Some(event)
    }

    /// Applies every pending completion, in the order the tasks finished.
    pub async fn settle(&mut self) {
        while self.next_event().await.is_some() {}
    }

    /// Cancels all pending simulator work. Later completions are discarded.
    pub fn shutdown(&mut self) {
        if !self.cancel.is_cancelled() {
            tracing::debug!(pending = self.pending, "session shutting down");
            self.cancel.cancel();
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::ReplyReady(reply) => self.state.receive_bot_reply(reply),
            SessionEvent::UploadProcessed(names) => self.state.complete_upload(names),
        }
    }

    fn spawn_deferred<F>(&mut self, work: F)
    where
        F: std::future::Future<Output = SessionEvent> + Send + 'static,
    {
        let tx = self.events_tx.clone();
        let cancel = self.cancel.child_token();
        self.pending += 1;
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("deferred task cancelled");
                }
                event = work => {
                    let _ = tx.send(event);
                }
            }
        });
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::{
        NO_KNOWLEDGE_BASE_FALLBACK, ReplyError, ReplyRequest, ReplyResult, canned_answer,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FailingResponder;

    #[async_trait]
    impl Responder for FailingResponder {
        async fn answer(&self, _request: &ReplyRequest) -> ReplyResult<String> {
            Err(ReplyError::Failed("index unavailable".into()))
        }
    }

    /// Counts how many questions actually reached the responder.
    #[derive(Default)]
    struct CountingResponder {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Responder for CountingResponder {
        async fn answer(&self, _request: &ReplyRequest) -> ReplyResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("counted".into())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_then_reply() {
        let mut controller = SessionController::new(Config::default());
        assert!(controller.submit("What is RAG?"));
        assert!(controller.state().is_sending());
        assert_eq!(controller.pending(), 1);

        let event = controller.next_event().await.unwrap();
        assert_eq!(
            event,
            SessionEvent::ReplyReady(canned_answer("What is RAG?").unwrap().to_string())
        );
        assert!(!controller.state().is_sending());
        assert_eq!(controller.state().messages().len(), 3);
        assert_eq!(controller.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_submit_spawns_nothing() {
        let mut controller = SessionController::new(Config::default());
        assert!(!controller.submit("   "));
        assert_eq!(controller.pending(), 0);
        assert!(controller.next_event().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_arrives_after_delay() {
        let mut controller = SessionController::new(Config::default());
        let start = tokio::time::Instant::now();
        controller.submit("hello there");
        controller.next_event().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(2000));
        assert_eq!(
            controller.state().messages().last().unwrap().content,
            NO_KNOWLEDGE_BASE_FALLBACK
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_drops_pending_work() {
        let mut controller = SessionController::new(Config::default());
        controller.submit("What is Python?");
        controller
            .start_upload(vec![UploadFile::new("a.txt", 10)])
            .unwrap();
        controller.shutdown();

        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert!(controller.next_event().await.is_none());
        assert_eq!(controller.state().messages().len(), 2);
        assert!(controller.state().documents().is_empty());
        assert!(controller.is_shut_down());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_upload_spawns_nothing() {
        let mut controller = SessionController::new(Config::default());
        assert_eq!(
            controller.start_upload(Vec::new()),
            Err(UploadError::NoFilesSelected)
        );
        assert_eq!(controller.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_responder_failure_becomes_reply() {
        let mut controller =
            SessionController::with_responder(Config::default(), Arc::new(FailingResponder));
        assert!(controller.submit("What is RAG?"));
        controller.settle().await;

        let last = controller.state().messages().last().unwrap();
        assert!(last.is_bot());
        assert_eq!(last.content, "error: responder failed: index unavailable");
        assert!(!controller.state().is_sending());
        assert!(controller.submit("What is Python?"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_accepted_submits_always_have_a_pending_task() {
        let mut controller = SessionController::new(Config::default());
        controller.set_input("What is RAG?");
        controller.open_upload_dialog();
        assert!(controller.close_upload_dialog());
        assert!(controller.take_notices().is_empty());
        assert!(!controller.state().is_sending());
        assert_eq!(controller.pending(), 0);

        assert!(controller.submit("What is RAG?"));
        assert!(controller.state().is_sending());
        assert_eq!(controller.pending(), 1);
        controller.settle().await;
        assert!(!controller.state().is_sending());

        controller.start_upload(vec![UploadFile::new("a.txt", 10)]).unwrap();
        assert!(controller.state().is_uploading());
        assert!(!controller.close_upload_dialog());
        assert_eq!(controller.pending(), 1);
        controller.settle().await;
        assert!(!controller.state().is_uploading());
        assert_eq!(controller.take_notices().len(), 1);
        assert!(controller.submit("What is Python?"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_reply() {
        let responder = Arc::new(CountingResponder::default());
        let mut controller = SessionController::with_responder(
            Config::default(),
            Arc::clone(&responder) as Arc<dyn Responder>,
        );
        assert!(controller.submit("What is RAG?"));
        drop(controller);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(responder.calls.load(Ordering::SeqCst), 0);
    }
}
