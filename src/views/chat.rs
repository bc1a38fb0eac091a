use crate::assistant::{CannedResponder, simulate_reply};
use crate::config::Config;
use crate::display::format_message_timestamp;
use crate::session::SessionState;
use crate::types::{ChatMessage, Role};
use crate::views::LoadingDots;
use dioxus::events::Key;
use dioxus::prelude::*;

#[component]
pub fn ChatView(session: Signal<SessionState>, config: Config) -> Element {
    let mut session = session;

    // Tasks spawned here belong to this component and are dropped with it, so a
    // reply can never land in a torn-down session.
    let mut send_message = move |text: String| {
        let Some(request) = session.with_mut(|state| state.submit_user_message(&text)) else {
            return;
        };
        let mut session = session;
        spawn(async move {
            let reply = simulate_reply(&CannedResponder, request, config.reply_delay).await;
            session.with_mut(|state| state.receive_bot_reply(reply));
        });
    };

    let state = session();
    let sending = state.is_sending();
    let input_blank = state.input().trim().is_empty();

    rsx! {
        section { class: "card chat-card",
            div { class: "card-header",
                h2 { "Chat" }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| session.with_mut(|state| state.clear_conversation()),
                    "Clear chat"
                }
            }
            div { id: "chat-list", class: "chat-list",
                for msg in state.messages().iter().cloned() {
                    MessageBubble { key: "{msg.id}", message: msg }
                }
                if sending {
                    div { class: "message-row assistant",
                        div { class: "avatar assistant", "B" }
                        LoadingDots {}
                    }
                }
            }
            form { class: "composer",
                onsubmit: move |ev| ev.prevent_default(),
                input {
                    r#type: "text",
                    placeholder: "Ask a question...",
                    value: "{state.input()}",
                    disabled: sending,
                    oninput: move |ev| session.with_mut(|state| state.set_input(ev.value())),
                    onkeydown: move |ev| {
                        if ev.key() == Key::Enter && !ev.modifiers().shift() {
                            ev.prevent_default();
                            let text = session.peek().input().to_string();
                            send_message(text);
                        }
                    },
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: sending || input_blank,
                    onclick: move |_| {
                        let text = session.peek().input().to_string();
                        send_message(text);
                    },
                    "Send"
                }
            }
        }
    }
}

#[component]
fn MessageBubble(message: ChatMessage) -> Element {
    let role_class = match message.role {
        Role::User => "user",
        Role::Assistant => "assistant",
    };
    let avatar = if message.is_bot() { "B" } else { "U" };
    let timestamp = format_message_timestamp(message.timestamp);
    let copy_payload = message.content.clone();
    let on_copy = move |_| {
        let raw = copy_payload.clone();
        spawn(async move {
            #[cfg(any(feature = "desktop", feature = "mobile"))]
            {
                if let Ok(mut cb) = arboard::Clipboard::new() {
                    let _ = cb.set_text(raw);
                }
            }
            #[cfg(not(any(feature = "desktop", feature = "mobile")))]
            let _ = raw;
        });
    };

    rsx! {
        div { class: "message-row {role_class}",
            div { class: "avatar {role_class}", "{avatar}" }
            div { class: "bubble",
                div { class: "bubble-text", "{message.content}" }
                div { class: "bubble-meta",
                    span { class: "message-timestamp", "{timestamp}" }
                    if message.is_bot() {
                        button { class: "btn btn-ghost", title: "Copy answer", onclick: on_copy, "Copy" }
                    }
                }
            }
        }
    }
}
