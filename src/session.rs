//! Session state for one running chat front-end.
//!
//! `SessionState` is plain data changed only through the operations below. The
//! deferred halves of "send" and "upload" are returned as requests; whoever owns the
//! state runs them (see `controller`) and feeds the results back in.

use crate::assistant::{ReplyRequest, UploadRequest};
use crate::display::format_message_timestamp;
use crate::types::{ChatMessage, Notice, Role, UploadFile};
use serde::Serialize;
use time::OffsetDateTime;

pub const GREETING: &str = "Hello! I'm your RAG-powered chatbot. I can answer questions based on the uploaded documents. Try uploading some documents and ask me about their content.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("no files selected")]
    NoFilesSelected,

    #[error("an upload is already being processed")]
    InProgress,
}

#[derive(Clone, Debug)]
pub struct SessionState {
    messages: Vec<ChatMessage>,
    documents: Vec<String>,
    input: String,
    sending: bool,
    uploading: bool,
    upload_dialog_open: bool,
    notices: Vec<Notice>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            messages: vec![greeting_message()],
            documents: Vec::new(),
            input: String::new(),
            sending: false,
            uploading: false,
            upload_dialog_open: false,
            notices: Vec::new(),
        }
    }

    // ---------------
    // Chat
    // ---------------

    /// Appends the user's question and returns the reply to simulate.
    /// Blank text, or a send already in flight, is ignored.
    pub fn submit_user_message(&mut self, text: &str) -> Option<ReplyRequest> {
        if text.trim().is_empty() || self.sending {
            return None;
        }

        self.push_message(Role::User, text.to_string());
        self.input.clear();
        self.sending = true;
        tracing::debug!(messages = self.messages.len(), "question submitted");

        Some(ReplyRequest::new(text, self.documents.len()))
    }

    pub fn receive_bot_reply(&mut self, text: impl Into<String>) {
        self.push_message(Role::Assistant, text.into());
        self.sending = false;
    }

    pub fn clear_conversation(&mut self) {
        self.messages = vec![greeting_message()];
        tracing::debug!("conversation cleared");
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    // ---------------
    // Uploads
    // ---------------

    pub fn start_upload(&mut self, files: Vec<UploadFile>) -> Result<UploadRequest, UploadError> {
        if files.is_empty() {
            self.notices.push(Notice::destructive(
                "No files selected",
                "Please select at least one file to upload.",
            ));
            tracing::warn!("upload rejected: no files selected");
            return Err(UploadError::NoFilesSelected);
        }
        if self.uploading {
            tracing::warn!("upload rejected: another upload is in progress");
            return Err(UploadError::InProgress);
        }

        self.uploading = true;
        tracing::debug!(files = files.len(), "upload started");
        Ok(UploadRequest { files })
    }

    pub fn complete_upload(&mut self, names: Vec<String>) {
        let count = names.len();
        self.documents.extend(names);
        self.uploading = false;
        self.upload_dialog_open = false;

        self.notices.push(Notice::success(
            "Documents uploaded successfully",
            format!("{count} document(s) have been added to the knowledge base."),
        ));
        self.push_message(
            Role::Assistant,
            format!(
                "{count} document(s) have been uploaded and processed. You can now ask questions about their content."
            ),
        );
        tracing::info!(count, total = self.documents.len(), "upload processed");
    }

    pub fn open_upload_dialog(&mut self) {
        self.upload_dialog_open = true;
    }

    /// Returns false when the dialog has to stay open because an upload is running.
    pub fn close_upload_dialog(&mut self) -> bool {
        if self.uploading {
            return false;
        }
        self.upload_dialog_open = false;
        true
    }

    // ---------------
    // Accessors
    // ---------------

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn is_upload_dialog_open(&self) -> bool {
        self.upload_dialog_open
    }

    pub fn has_notices(&self) -> bool {
        !self.notices.is_empty()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            messages: self
                .messages
                .iter()
                .map(|msg| MessageView {
                    id: msg.id,
                    role: msg.role,
                    content: msg.content.clone(),
                    time: format_message_timestamp(msg.timestamp),
                })
                .collect(),
            documents: self.documents.clone(),
            input: self.input.clone(),
            sending: self.sending,
            uploading: self.uploading,
            upload_dialog_open: self.upload_dialog_open,
        }
    }

    fn push_message(&mut self, role: Role, content: String) {
        let id = self.messages.len();
        self.messages.push(ChatMessage {
            id,
            role,
            content,
            timestamp: OffsetDateTime::now_utc(),
        });
    }
}

fn greeting_message() -> ChatMessage {
    ChatMessage {
        id: 0,
        role: Role::Assistant,
        content: GREETING.to_string(),
        timestamp: OffsetDateTime::now_utc(),
    }
}

/// Read-only view of the session handed to front-ends.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub messages: Vec<MessageView>,
    pub documents: Vec<String>,
    pub input: String,
    pub sending: bool,
    pub uploading: bool,
    pub upload_dialog_open: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MessageView {
    pub id: usize,
    pub role: Role,
    pub content: String,
    pub time: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NoticeKind;

    fn files(names: &[&str]) -> Vec<UploadFile> {
        names.iter().map(|n| UploadFile::new(*n, 2048)).collect()
    }

    #[test]
    fn test_new_session_starts_with_greeting() {
        let state = SessionState::new();
        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.messages()[0].content, GREETING);
        assert!(state.messages()[0].is_bot());
        assert!(state.documents().is_empty());
    }

    #[test]
    fn test_blank_submit_is_ignored() {
        let mut state = SessionState::new();
        for text in ["", "   ", "\n\t "] {
            assert!(state.submit_user_message(text).is_none());
        }
        assert_eq!(state.messages().len(), 1);
        assert!(!state.is_sending());
    }

    #[test]
    fn test_submit_appends_user_message_and_sets_sending() {
        let mut state = SessionState::new();
        state.set_input("  What is RAG? ");
        let request = state.submit_user_message("  What is RAG? ").unwrap();

        assert_eq!(request.question, "What is RAG?");
        assert_eq!(request.document_count, 0);
        assert!(state.is_sending());
        assert_eq!(state.input(), "");

        let last = state.messages().last().unwrap();
        assert_eq!(last.id, 1);
        assert_eq!(last.role, Role::User);
        assert_eq!(last.content, "  What is RAG? ");
    }

    #[test]
    fn test_submit_while_sending_is_ignored() {
        let mut state = SessionState::new();
        assert!(state.submit_user_message("first").is_some());
        assert!(state.submit_user_message("second").is_none());
        assert_eq!(state.messages().len(), 2);
    }

    #[test]
    fn test_reply_clears_sending() {
        let mut state = SessionState::new();
        state.submit_user_message("hello");
        state.receive_bot_reply("hi");
        assert!(!state.is_sending());
        let last = state.messages().last().unwrap();
        assert_eq!(last.id, 2);
        assert!(last.is_bot());
        assert_eq!(last.content, "hi");
    }

    #[test]
    fn test_request_snapshots_document_count() {
        let mut state = SessionState::new();
        let request = state.start_upload(files(&["a.txt", "b.pdf"])).unwrap();
        state.complete_upload(request.files.into_iter().map(|f| f.name).collect());

        let reply = state.submit_user_message("anything").unwrap();
        assert_eq!(reply.document_count, 2);
    }

    #[test]
    fn test_clear_conversation_resets_to_greeting() {
        let mut state = SessionState::new();
        state.submit_user_message("one");
        state.receive_bot_reply("two");
        state.clear_conversation();

        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.messages()[0].id, 0);
        assert_eq!(state.messages()[0].content, GREETING);
    }

    #[test]
    fn test_empty_upload_is_rejected_with_notice() {
        let mut state = SessionState::new();
        state.open_upload_dialog();

        assert_eq!(state.start_upload(Vec::new()), Err(UploadError::NoFilesSelected));
        assert!(!state.is_uploading());
        assert!(state.documents().is_empty());
        assert!(state.is_upload_dialog_open());
        assert_eq!(state.messages().len(), 1);

        let notices = state.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Destructive);
        assert_eq!(notices[0].title, "No files selected");
        assert!(!state.has_notices());
    }

    #[test]
    fn test_second_upload_while_processing_is_rejected() {
        let mut state = SessionState::new();
        state.start_upload(files(&["a.txt"])).unwrap();
        assert_eq!(
            state.start_upload(files(&["b.txt"])),
            Err(UploadError::InProgress)
        );
        assert!(state.take_notices().is_empty());
    }

    #[test]
    fn test_complete_upload_appends_names_and_summary() {
        let mut state = SessionState::new();
        state.open_upload_dialog();
        state.start_upload(files(&["a.txt", "b.pdf", "a.txt"])).unwrap();
        assert!(state.is_uploading());

        state.complete_upload(vec!["a.txt".into(), "b.pdf".into(), "a.txt".into()]);

        assert_eq!(state.documents(), ["a.txt", "b.pdf", "a.txt"]);
        assert!(!state.is_uploading());
        assert!(!state.is_upload_dialog_open());

        let last = state.messages().last().unwrap();
        assert!(last.is_bot());
        assert_eq!(
            last.content,
            "3 document(s) have been uploaded and processed. You can now ask questions about their content."
        );

        let notices = state.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Success);
        assert_eq!(
            notices[0].description,
            "3 document(s) have been added to the knowledge base."
        );
        assert!(state.take_notices().is_empty());
    }

    #[test]
    fn test_dialog_stays_open_while_uploading() {
        let mut state = SessionState::new();
        state.open_upload_dialog();
        state.start_upload(files(&["a.txt"])).unwrap();
        assert!(!state.close_upload_dialog());
        assert!(state.is_upload_dialog_open());

        state.complete_upload(vec!["a.txt".into()]);
        state.open_upload_dialog();
        assert!(state.close_upload_dialog());
        assert!(!state.is_upload_dialog_open());
    }

    #[test]
    fn test_ids_match_log_positions() {
        let mut state = SessionState::new();
        state.submit_user_message("q1");
        state.receive_bot_reply("a1");
        state.start_upload(files(&["x.csv"])).unwrap();
        state.complete_upload(vec!["x.csv".into()]);
        state.submit_user_message("q2");
        state.receive_bot_reply("a2");

        for (position, msg) in state.messages().iter().enumerate() {
            assert_eq!(msg.id, position);
        }
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = SessionState::new();
        state.submit_user_message("What is RAG?");
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "What is RAG?");
        assert_eq!(json["sending"], true);
        assert!(json["documents"].as_array().unwrap().is_empty());
    }
}
