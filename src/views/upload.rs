use crate::assistant::simulate_upload;
use crate::config::Config;
use crate::dialog::{UploadDialog, accept_attribute, supported_formats_hint};
use crate::display::{display_file_name, format_size_kb};
use crate::session::SessionState;
use crate::types::UploadFile;
use dioxus::html::{FileEngine, HasFileData};
use dioxus::prelude::*;
use std::sync::Arc;

async fn picked_files(engine: Arc<dyn FileEngine>) -> Vec<UploadFile> {
    let mut files = Vec::new();
    for path in engine.files() {
        let size = engine.file_size(&path).await.unwrap_or(0);
        files.push(UploadFile::new(display_file_name(&path), size));
    }
    files
}

#[component]
pub fn UploadDialogView(session: Signal<SessionState>, config: Config) -> Element {
    let mut session = session;
    let mut dialog = use_signal(UploadDialog::new);

    let state = session();
    if !state.is_upload_dialog_open() {
        return rsx! {};
    }
    let uploading = state.is_uploading();
    let hint = supported_formats_hint();
    let current = dialog();
    let selection = current.selected().to_vec();
    let drop_class = if current.is_dragging() {
        "drop-zone dragging"
    } else {
        "drop-zone"
    };

    let on_upload = move |_| {
        let request = {
            let mut state = session.write();
            dialog.with_mut(|d| d.upload(&mut state))
        };
        if let Ok(request) = request {
            let mut session = session;
            spawn(async move {
                let names = simulate_upload(request, config.upload_delay).await;
                session.with_mut(|state| state.complete_upload(names));
            });
        }
    };

    rsx! {
        div { class: "dialog-overlay",
            onclick: move |_| {
                session.with_mut(|state| {
                    state.close_upload_dialog();
                });
            },
            div { class: "dialog", role: "dialog", aria_modal: "true",
                onclick: move |evt| evt.stop_propagation(),
                h2 { "Upload Documents" }
                div {
                    class: drop_class,
                    ondragover: move |evt| {
                        evt.prevent_default();
                        dialog.with_mut(|d| d.set_dragging(true));
                    },
                    ondragleave: move |evt| {
                        evt.prevent_default();
                        dialog.with_mut(|d| d.set_dragging(false));
                    },
                    ondrop: move |evt| {
                        evt.prevent_default();
                        dialog.with_mut(|d| d.set_dragging(false));
                        if let Some(engine) = evt.files() {
                            spawn(async move {
                                let files = picked_files(engine).await;
                                dialog.with_mut(|d| d.add_files(files));
                            });
                        }
                    },
                    p { "Drag and drop files here" }
                    p { class: "text-muted", "{hint}" }
                    label { class: "btn", r#for: "file-upload", "Select Files" }
                    input {
                        id: "file-upload",
                        r#type: "file",
                        multiple: true,
                        hidden: true,
                        accept: accept_attribute(),
                        disabled: uploading,
                        onchange: move |evt: FormEvent| {
                            if let Some(engine) = evt.files() {
                                spawn(async move {
                                    let files = picked_files(engine).await;
                                    dialog.with_mut(|d| d.add_files(files));
                                });
                            }
                        },
                    }
                }
                if !selection.is_empty() {
                    div { class: "selected-header",
                        p { class: "text-muted", "Selected Files ({selection.len()})" }
                        button {
                            class: "btn btn-ghost",
                            r#type: "button",
                            disabled: uploading,
                            onclick: move |_| dialog.with_mut(|d| d.clear_files()),
                            "Clear all"
                        }
                    }
                    ul { class: "selected-files",
                        for (index, file) in selection.iter().enumerate() {
                            li { key: "{index}",
                                span { "{file.name}" }
                                span { class: "text-muted", "{format_size_kb(file.size_bytes)}" }
                                button {
                                    class: "btn btn-ghost",
                                    r#type: "button",
                                    disabled: uploading,
                                    onclick: {
                                        let name = file.name.clone();
                                        move |_| dialog.with_mut(|d| d.remove_file(&name))
                                    },
                                    "Remove"
                                }
                            }
                        }
                    }
                }
                div { class: "dialog-actions",
                    button {
                        class: "btn",
                        r#type: "button",
                        disabled: uploading,
                        onclick: move |_| {
                            session.with_mut(|state| {
                                state.close_upload_dialog();
                            });
                        },
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: uploading,
                        onclick: on_upload,
                        "{UploadDialog::action_label(uploading)}"
                    }
                }
            }
        }
    }
}
