use crate::config::Config;
use crate::display::documents_badge;
use crate::session::SessionState;
use crate::types::ToastQueue;
use crate::views::{ChatView, DocumentsPanel, NoticeStack, SnippetPanel, UploadDialogView};
use dioxus::prelude::*;
use std::time::Duration;

const MAIN_CSS: Asset = asset!("/assets/main.css");
const NOTICE_HIDE_DELAY: Duration = Duration::from_secs(4);
const STACK: &[&str] = &["Python", "LangChain", "Rust", "Dioxus"];

#[component]
pub fn App() -> Element {
    let session = use_signal(SessionState::new);
    let notices = use_signal(ToastQueue::new);
    let config = use_hook(|| {
        Config::from_env().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "invalid config, using defaults");
            Config::default()
        })
    });

    use_notice_drain(session, notices);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        AppHeader { session }
        main { class: "layout",
            ChatView { session, config }
            aside { class: "sidebar",
                DocumentsPanel { session }
                AboutPanel {}
                SnippetPanel {}
            }
        }
        UploadDialogView { session, config }
        NoticeStack { notices }
    }
}

/// Moves notices raised by the session into the toast stack and hides each one
/// after a few seconds.
fn use_notice_drain(session: Signal<SessionState>, notices: Signal<ToastQueue>) {
    use_effect(move || {
        if !session.read().has_notices() {
            return;
        }
        let mut session = session;
        let mut notices = notices;
        let raised = session.write().take_notices();
        for notice in raised {
            let id = notices.with_mut(|queue| queue.push(notice));
            spawn(async move {
                tokio::time::sleep(NOTICE_HIDE_DELAY).await;
                notices.with_mut(|queue| queue.dismiss(id));
            });
        }
    });
}

#[component]
fn AppHeader(session: Signal<SessionState>) -> Element {
    let mut session = session;
    let document_count = session.read().documents().len();
    rsx! {
        header { class: "header",
            div {
                h1 { "RAG Chatbot" }
                p { class: "subtitle", "Powered by LangChain and Python" }
            }
            div { class: "header-actions",
                span { class: "badge", "{documents_badge(document_count)}" }
                button {
                    class: "btn",
                    r#type: "button",
                    onclick: move |_| session.with_mut(|state| state.open_upload_dialog()),
                    "Upload Documents"
                }
            }
        }
    }
}

#[component]
fn AboutPanel() -> Element {
    rsx! {
        section { class: "card",
            div { class: "card-header", h3 { "About this Project" } }
            div { class: "card-body",
                p { class: "text-muted",
                    "This is a RAG (Retrieval-Augmented Generation) chatbot built with:"
                }
                div {
                    for tech in STACK.iter() {
                        span { class: "badge secondary", "{tech}" }
                    }
                }
                p { class: "text-muted",
                    "Upload documents to create a knowledge base and ask questions to get contextually relevant answers."
                }
            }
        }
    }
}
