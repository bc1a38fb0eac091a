use super::reply::{ReplyRequest, ReplyResult, Responder};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const NO_KNOWLEDGE_BASE_FALLBACK: &str = "I don't have any documents in my knowledge base yet. Please upload some documents so I can provide better answers.";

pub const ANALYZE_DOCUMENTS_FALLBACK: &str = "Based on the documents you've uploaded, I would analyze the content and provide a contextually relevant answer. In a real implementation, this would use a RAG pipeline to retrieve relevant information from the documents and generate a response.";

const CANNED_PAIRS: &[(&str, &str)] = &[
    (
        "What is RAG?",
        "RAG (Retrieval-Augmented Generation) is a technique that enhances large language models by retrieving relevant information from external knowledge sources before generating a response. This allows the model to provide more accurate, up-to-date, and contextually relevant answers.",
    ),
    (
        "How does LangChain work?",
        "LangChain is a framework designed to simplify the development of applications using large language models. It provides a standard interface for chains, lots of integrations with other tools, and end-to-end chains for common applications. LangChain helps developers build applications that are context-aware and can reason about their specific data.",
    ),
    (
        "What is Python?",
        "Python is a high-level, interpreted programming language known for its readability and simplicity. It supports multiple programming paradigms and has a comprehensive standard library. Python is widely used in various domains including web development, data analysis, artificial intelligence, scientific computing, and automation.",
    ),
];

static CANNED_RESPONSES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| CANNED_PAIRS.iter().copied().collect());

/// Exact, case-sensitive lookup of a trimmed question.
pub fn canned_answer(question: &str) -> Option<&'static str> {
    CANNED_RESPONSES.get(question.trim()).copied()
}

/// The questions the table answers, in display order.
pub fn canned_questions() -> impl Iterator<Item = &'static str> {
    CANNED_PAIRS.iter().map(|(question, _)| *question)
}

/// Answers from the canned table, falling back on whether any documents exist.
#[derive(Clone, Copy, Debug, Default)]
pub struct CannedResponder;

impl CannedResponder {
    pub fn reply_for(request: &ReplyRequest) -> &'static str {
        if let Some(answer) = canned_answer(&request.question) {
            answer
        } else if request.document_count == 0 {
            NO_KNOWLEDGE_BASE_FALLBACK
        } else {
            ANALYZE_DOCUMENTS_FALLBACK
        }
    }
}

#[async_trait]
impl Responder for CannedResponder {
    async fn answer(&self, request: &ReplyRequest) -> ReplyResult<String> {
        Ok(Self::reply_for(request).to_string())
    }
}
