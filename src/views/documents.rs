use crate::session::SessionState;
use dioxus::prelude::*;

#[component]
pub fn DocumentsPanel(session: Signal<SessionState>) -> Element {
    let mut session = session;
    let documents = session.read().documents().to_vec();

    rsx! {
        section { class: "card",
            div { class: "card-header", h3 { "Documents" } }
            div { class: "card-body",
                if documents.is_empty() {
                    p { class: "text-muted", "No documents uploaded yet." }
                } else {
                    ul { class: "doc-list",
                        for (index, doc) in documents.iter().enumerate() {
                            li { key: "{index}", "{doc}" }
                        }
                    }
                }
            }
            div { class: "card-body",
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
