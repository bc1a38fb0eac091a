use crate::snippets::{SnippetTab, render_snippet_html};
use dioxus::prelude::*;

#[component]
pub fn SnippetPanel() -> Element {
    let mut active = use_signal(SnippetTab::default);
    let html = render_snippet_html(active());

    rsx! {
        section { class: "card",
            div { class: "card-header", h3 { "RAG Implementation" } }
            div { class: "card-body",
                div { class: "tabs",
                    for tab in SnippetTab::ALL {
                        button {
                            class: if active() == tab { "btn tab active" } else { "btn tab" },
                            r#type: "button",
                            onclick: move |_| active.set(tab),
                            "{tab.label()}"
                        }
                    }
                }
                div { class: "snippet", dangerous_inner_html: "{html}" }
            }
        }
    }
}
