use crate::types::{NoticeKind, ToastQueue};
use dioxus::prelude::*;

#[component]
pub fn NoticeStack(notices: Signal<ToastQueue>) -> Element {
    let mut notices = notices;
    let toasts = notices.read().toasts().to_vec();

    rsx! {
        div { class: "notice-stack", role: "status",
            for toast in toasts {
                div {
                    key: "{toast.id}",
                    class: match toast.notice.kind {
                        NoticeKind::Success => "notice",
                        NoticeKind::Destructive => "notice destructive",
                    },
                    onclick: move |_| {
                        notices.with_mut(|queue| queue.dismiss(toast.id));
                    },
                    div { class: "notice-title", "{toast.notice.title}" }
                    div { class: "notice-description", "{toast.notice.description}" }
                }
            }
        }
    }
}
