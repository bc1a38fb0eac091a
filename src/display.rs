use std::path::Path;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:none]:[minute padding:zero] [period case:upper]");

const MESSAGE_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none], [year]");

/// Formats a message time as `3:07 PM • Oct 16, 2026`, in the local offset when the
/// platform exposes one.
pub fn format_message_timestamp(timestamp: OffsetDateTime) -> String {
    let mut datetime = timestamp;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    format_in_offset(datetime)
}

fn format_in_offset(datetime: OffsetDateTime) -> String {
    let time = datetime.format(MESSAGE_TIME_FORMAT).unwrap_or_default();
    let date = datetime.format(MESSAGE_DATE_FORMAT).unwrap_or_default();
    format!("{time} • {date}")
}

/// Whole kilobytes, the way the upload dialog lists selected files.
pub fn format_size_kb(size_bytes: u64) -> String {
    format!("{:.0}KB", size_bytes as f64 / 1024.0)
}

pub fn documents_badge(count: usize) -> String {
    format!("Docs: {count}")
}

/// Last path component, for file pickers that report full paths.
pub fn display_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}
