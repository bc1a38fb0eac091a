use dioxus::prelude::*;

#[component]
pub fn LoadingDots() -> Element {
    rsx! {
        div { class: "loading-dots", aria_label: "Waiting for a reply",
            span {}
            span {}
            span {}
        }
    }
}
