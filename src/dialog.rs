//! File selection behind the "Upload Documents" dialog.

use crate::assistant::UploadRequest;
use crate::session::{SessionState, UploadError};
use crate::types::UploadFile;
use std::path::Path;

/// Extensions offered by the file picker. Nothing enforces them at upload time.
pub const ACCEPTED_EXTENSIONS: &[&str] = &[".txt", ".pdf", ".docx", ".csv", ".json"];

/// Advertised size limit. Shown to the user, never checked.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Value for an `<input type="file" accept=...>` attribute.
pub fn accept_attribute() -> String {
    ACCEPTED_EXTENSIONS.join(",")
}

/// Hint under the drop zone, e.g. `Supports: TXT, PDF (Max 10MB)`.
pub fn supported_formats_hint() -> String {
    let formats: Vec<String> = ACCEPTED_EXTENSIONS
        .iter()
        .map(|ext| ext.trim_start_matches('.').to_ascii_uppercase())
        .collect();
    format!(
        "Supports: {} (Max {}MB)",
        formats.join(", "),
        MAX_UPLOAD_BYTES / (1024 * 1024)
    )
}

pub fn is_accepted(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| accepted[1..].eq_ignore_ascii_case(ext))
        })
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadDialog {
    selected: Vec<UploadFile>,
    dragging: bool,
}

impl UploadDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &[UploadFile] {
        &self.selected
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Files picked or dropped are appended to the selection as they come.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = UploadFile>) {
        self.dragging = false;
        self.selected.extend(files);
    }

    /// Removes every selected file carrying this name.
    pub fn remove_file(&mut self, name: &str) {
        self.selected.retain(|file| file.name != name);
    }

    pub fn clear_files(&mut self) {
        self.selected.clear();
    }

    /// Hands the selection to the session. An empty selection surfaces the
    /// "No files selected" notice through the session.
    pub fn upload(&mut self, session: &mut SessionState) -> Result<UploadRequest, UploadError> {
        let request = session.start_upload(self.selected.clone())?;
        self.selected.clear();
        Ok(request)
    }

    /// Label of the primary button.
    pub fn action_label(uploading: bool) -> &'static str {
        if uploading {
            "Processing..."
        } else {
            "Upload and Process"
        }
    }
}
