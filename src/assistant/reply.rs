use async_trait::async_trait;
use std::time::Duration;

// ============================================
// Error Types
// ============================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum ReplyError {
    #[error("responder failed: {0}")]
    Failed(String),
}

pub type ReplyResult<T> = Result<T, ReplyError>;

// ============================================
// Request / Responder seam
// ============================================

/// What the reply simulator needs to answer one submitted question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplyRequest {
    /// The question with surrounding whitespace removed.
    pub question: String,
    /// Size of the document list when the question was submitted.
    pub document_count: usize,
}

impl ReplyRequest {
    pub fn new(question: &str, document_count: usize) -> Self {
        Self {
            question: question.trim().to_string(),
            document_count,
        }
    }
}

/// Produces the answer for a question. A real retrieval pipeline would plug in here.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn answer(&self, request: &ReplyRequest) -> ReplyResult<String>;
}

/// Waits out the reply latency, then asks the responder. Always yields exactly one
/// reply text; a responder failure becomes the reply.
pub async fn simulate_reply<R>(responder: &R, request: ReplyRequest, latency: Duration) -> String
where
    R: Responder + ?Sized,
{
    tokio::time::sleep(latency).await;
    match responder.answer(&request).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!(error = %err, "responder failed");
            format!("error: {}", err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingResponder;

    #[async_trait]
    impl Responder for FailingResponder {
        async fn answer(&self, _request: &ReplyRequest) -> ReplyResult<String> {
            Err(ReplyError::Failed("offline".into()))
        }
    }

    #[test]
    fn test_request_trims_question() {
        let request = ReplyRequest::new("  What is RAG?\n", 2);
        assert_eq!(request.question, "What is RAG?");
        assert_eq!(request.document_count, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_becomes_reply_text() {
        let reply = simulate_reply(
            &FailingResponder,
            ReplyRequest::new("anything", 0),
            Duration::from_millis(2000),
        )
        .await;
        assert_eq!(reply, "error: responder failed: offline");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_waits_for_latency() {
        let start = tokio::time::Instant::now();
        simulate_reply(
            &FailingResponder,
            ReplyRequest::new("anything", 0),
            Duration::from_millis(2000),
        )
        .await;
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }
}
