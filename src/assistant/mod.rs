/// Simulated assistant for ragchat
///
/// Nothing here retrieves, embeds or generates anything. Replies come from a fixed
/// table of canned answers and uploads only keep the file names, both after a fixed
/// delay that stands in for the work a real pipeline would do.
///
/// # Architecture
///
/// - `reply` - `Responder` seam plus the delayed reply simulation
/// - `canned` - the canned answer table and its `Responder`
/// - `ingest` - the delayed upload simulation
///
/// # Usage
///
/// ```rust,no_run
/// use ragchat::assistant::{CannedResponder, ReplyRequest, simulate_reply};
/// use std::time::Duration;
///
/// # async fn example() {
/// let request = ReplyRequest::new("What is RAG?", 0);
/// let _reply = simulate_reply(&CannedResponder, request, Duration::from_millis(2000)).await;
/// # }
/// ```
mod canned;
mod ingest;
mod reply;

// Re-export main types
pub use canned::{
    ANALYZE_DOCUMENTS_FALLBACK, CannedResponder, NO_KNOWLEDGE_BASE_FALLBACK, canned_answer,
    canned_questions,
};
pub use ingest::{UploadRequest, simulate_upload};
pub use reply::{ReplyError, ReplyRequest, ReplyResult, Responder, simulate_reply};
