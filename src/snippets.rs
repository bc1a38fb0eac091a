//! Static "RAG Implementation" snippets shown beside the chat.
//!
//! Each tab holds a short Python listing. They are display material only; none of it
//! runs.

use comrak::plugins::syntect::SyntectAdapter;
use comrak::{ComrakOptions, ComrakPlugins, markdown_to_html_with_plugins};
use once_cell::sync::Lazy;

static MARKDOWN_OPTIONS: Lazy<ComrakOptions> = Lazy::new(|| {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SnippetTab {
    #[default]
    DataLoading,
    LangChain,
    Chatbot,
}

impl SnippetTab {
    pub const ALL: [SnippetTab; 3] = [
        SnippetTab::DataLoading,
        SnippetTab::LangChain,
        SnippetTab::Chatbot,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SnippetTab::DataLoading => "Data Loading",
            SnippetTab::LangChain => "LangChain",
            SnippetTab::Chatbot => "Chatbot",
        }
    }

    /// Stable identifier used for tab values and console commands.
    pub fn slug(self) -> &'static str {
        match self {
            SnippetTab::DataLoading => "data-loading",
            SnippetTab::LangChain => "langchain",
            SnippetTab::Chatbot => "chatbot",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.slug().eq_ignore_ascii_case(slug.trim()))
    }

    pub fn code(self) -> &'static str {
        match self {
            SnippetTab::DataLoading => DATA_LOADING,
            SnippetTab::LangChain => LANGCHAIN,
            SnippetTab::Chatbot => CHATBOT,
        }
    }
}

pub fn markdown_to_html(md: &str) -> String {
    let adapter = SyntectAdapter::new(Some("base16-ocean.dark"));
    let mut plugins = ComrakPlugins::default();
    plugins.render.codefence_syntax_highlighter = Some(&adapter);
    markdown_to_html_with_plugins(md, &MARKDOWN_OPTIONS, &plugins)
}

/// Highlighted HTML for one tab's listing.
pub fn render_snippet_html(tab: SnippetTab) -> String {
    let fenced = format!("```python\n{}\n```\n", tab.code().trim());
    markdown_to_html(&fenced)
}

const DATA_LOADING: &str = r#"
# Data loading example with Python
import pandas as pd
from langchain.document_loaders import (
    CSVLoader,
    PyPDFLoader,
    TextLoader
)

# Load CSV data
def load_csv(file_path):
    loader = CSVLoader(file_path)
    documents = loader.load()
    return documents

# Load PDF data
def load_pdf(file_path):
    loader = PyPDFLoader(file_path)
    documents = loader.load()
    return documents

# Load text data
def load_text(file_path):
    loader = TextLoader(file_path)
    documents = loader.load()
    return documents

# Load multiple document types
def load_documents(file_paths):
    documents = []
    for file_path in file_paths:
        if file_path.endswith('.csv'):
            docs = load_csv(file_path)
        elif file_path.endswith('.pdf'):
            docs = load_pdf(file_path)
        elif file_path.endswith('.txt'):
            docs = load_text(file_path)
        documents.extend(docs)
    return documents
"#;

const LANGCHAIN: &str = r#"
# RAG with LangChain setup
from langchain.text_splitter import RecursiveCharacterTextSplitter
from langchain.vectorstores import Chroma
from langchain.embeddings import OpenAIEmbeddings
from langchain.chains import RetrievalQA
from langchain.llms import OpenAI

# Split documents into chunks
def split_documents(documents):
    text_splitter = RecursiveCharacterTextSplitter(
        chunk_size=1000,
        chunk_overlap=100
    )
    chunks = text_splitter.split_documents(documents)
    return chunks

# Create vector store
def create_vector_store(chunks):
    embeddings = OpenAIEmbeddings()
    vector_store = Chroma.from_documents(
        documents=chunks,
        embedding=embeddings
    )
    return vector_store

# Set up RAG chain
def setup_rag_chain(vector_store):
    retriever = vector_store.as_retriever(
        search_type="similarity",
        search_kwargs={"k": 3}
    )

    llm = OpenAI(temperature=0)

    qa_chain = RetrievalQA.from_chain_type(
        llm=llm,
        chain_type="stuff",
        retriever=retriever,
        return_source_documents=True
    )

    return qa_chain
"#;

const CHATBOT: &str = r#"
# Building the chatbot
import os
from langchain.memory import ConversationBufferMemory
from langchain.chains import ConversationalRetrievalChain
from langchain.chat_models import ChatOpenAI

class RAGChatbot:
    def __init__(self, vector_store):
        self.vector_store = vector_store
        self.memory = ConversationBufferMemory(
            memory_key="chat_history",
            return_messages=True
        )
        self.chatbot = self._create_chatbot()

    def _create_chatbot(self):
        llm = ChatOpenAI(temperature=0.2)

        chatbot = ConversationalRetrievalChain.from_llm(
            llm=llm,
            retriever=self.vector_store.as_retriever(),
            memory=self.memory
        )

        return chatbot

    def ask(self, question):
        response = self.chatbot.run(question)
        return response

# Using the chatbot
documents = load_documents(["data.pdf", "info.csv"])
chunks = split_documents(documents)
vector_store = create_vector_store(chunks)
chatbot = RAGChatbot(vector_store)

response = chatbot.ask("What is RAG?")
print(response)
"#;
