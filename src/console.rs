//! Line-oriented terminal front-end.
//!
//! Plain lines are questions; lines starting with `/` are commands. Output is
//! written incrementally: every message appended to the log is printed once, and
//! notices are printed as they are raised.

use crate::controller::SessionController;
use crate::dialog::is_accepted;
use crate::display::{documents_badge, format_message_timestamp, format_size_kb};
use crate::snippets::SnippetTab;
use crate::types::{ChatMessage, Notice, NoticeKind, UploadFile};
use anyhow::Result;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const HELP: &str = "\
Type a question and press Enter. Commands:
  /upload <path>...   add documents to the knowledge base (only names are kept);
                      quote paths that contain spaces
  /docs               list uploaded documents
  /clear              start a fresh conversation
  /state              print the session as JSON
  /snippet <tab>      show a code snippet (data-loading, langchain, chatbot)
  /help               show this help
  /quit               exit without waiting for pending work
";

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Drives `controller` from `input` until end of input or `/quit`.
///
/// At end of input any pending reply or upload is awaited so its result is shown;
/// `/quit` shuts the session down immediately instead.
pub async fn run_console<R, W>(
    controller: &mut SessionController,
    input: R,
    mut output: W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut printed = 0;

    output.write_all(b"RAG Chatbot (type /help for commands)\n").await?;
    flush_updates(controller, &mut printed, &mut output).await?;

    loop {
        let has_pending = controller.pending() > 0;
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if handle_line(controller, &line, &mut printed, &mut output).await? == Flow::Quit {
                    controller.shutdown();
                    output.flush().await?;
                    return Ok(());
                }
            }
            Some(_) = controller.next_event(), if has_pending => {}
        }
        flush_updates(controller, &mut printed, &mut output).await?;
    }

    controller.settle().await;
    flush_updates(controller, &mut printed, &mut output).await?;
    output.flush().await?;
    Ok(())
}

async fn handle_line<W>(
    controller: &mut SessionController,
    line: &str,
    printed: &mut usize,
    output: &mut W,
) -> Result<Flow>
where
    W: AsyncWrite + Unpin,
{
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        if !trimmed.is_empty() && controller.state().is_sending() {
            output
                .write_all(b"(still waiting for the previous answer)\n")
                .await?;
            return Ok(Flow::Continue);
        }
        controller.set_input(line);
        controller.submit(line);
        return Ok(Flow::Continue);
    };

    let (name, args) = command
        .split_once(char::is_whitespace)
        .map(|(name, args)| (name, args.trim()))
        .unwrap_or((command, ""));

    match name {
        "quit" | "exit" => return Ok(Flow::Quit),
        "help" => output.write_all(HELP.as_bytes()).await?,
        "clear" => {
            controller.clear_conversation();
            *printed = 0;
            output.write_all(b"-- conversation cleared --\n").await?;
        }
        "docs" => {
            let documents = controller.state().documents();
            let mut listing = format!("{}\n", documents_badge(documents.len()));
            if documents.is_empty() {
                listing.push_str("No documents uploaded yet.\n");
            }
            for doc in documents {
                listing.push_str(&format!("  - {doc}\n"));
            }
            output.write_all(listing.as_bytes()).await?;
        }
        "state" => {
            let json = serde_json::to_string_pretty(&controller.state().snapshot())?;
            output.write_all(json.as_bytes()).await?;
            output.write_all(b"\n").await?;
        }
        "snippet" => match SnippetTab::from_slug(args) {
            Some(tab) => {
                let text = format!("# {}\n{}\n", tab.label(), tab.code().trim());
                output.write_all(text.as_bytes()).await?;
            }
            None => {
                output
                    .write_all(b"Unknown snippet. Try data-loading, langchain or chatbot.\n")
                    .await?;
            }
        },
        "upload" => {
            let files = collect_files(args, output).await?;
            controller.open_upload_dialog();
            match controller.start_upload(files) {
                Ok(()) => output.write_all(b"Processing...\n").await?,
                Err(err) => {
                    tracing::debug!(error = %err, "upload not started");
                    controller.close_upload_dialog();
                }
            }
        }
        other => {
            let text = format!("Unknown command '/{other}'. Type /help for commands.\n");
            output.write_all(text.as_bytes()).await?;
        }
    }
    Ok(Flow::Continue)
}

/// Builds upload handles from paths. Only the name and size are read.
async fn collect_files<W>(args: &str, output: &mut W) -> Result<Vec<UploadFile>>
where
    W: AsyncWrite + Unpin,
{
    let mut files = Vec::new();
    for raw in split_paths(args) {
        let raw = raw.as_str();
        let path = Path::new(raw);
        let metadata = match tokio::fs::metadata(path).await {
            Ok(metadata) if metadata.is_file() => metadata,
            Ok(_) => {
                output
                    .write_all(format!("skipping {raw}: not a file\n").as_bytes())
                    .await?;
                continue;
            }
            Err(err) => {
                output
                    .write_all(format!("skipping {raw}: {err}\n").as_bytes())
                    .await?;
                continue;
            }
        };
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(raw)
            .to_string();
        let mut line = format!("  {name} ({})", format_size_kb(metadata.len()));
        if !is_accepted(&name) {
            line.push_str(" [not a supported type]");
        }
        line.push('\n');
        output.write_all(line.as_bytes()).await?;
        files.push(UploadFile::new(name, metadata.len()));
    }
    Ok(files)
}

/// Splits `/upload` arguments on whitespace. Single or double quotes group a path
/// containing spaces; an unterminated quote runs to the end of the line.
fn split_paths(args: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quote = None;
    let mut in_word = false;

    for ch in args.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_word = true;
            }
            None if ch.is_whitespace() => {
                if in_word {
                    paths.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(ch);
                in_word = true;
            }
        }
    }
    if in_word {
        paths.push(current);
    }
    paths
}

async fn flush_updates<W>(
    controller: &mut SessionController,
    printed: &mut usize,
    output: &mut W,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut text = String::new();
    for msg in controller.state().messages().iter().skip(*printed) {
        text.push_str(&render_message(msg));
        text.push('\n');
    }
    *printed = controller.state().messages().len();

    for notice in controller.take_notices() {
        text.push_str(&render_notice(&notice));
        text.push('\n');
    }

    if !text.is_empty() {
        output.write_all(text.as_bytes()).await?;
        output.flush().await?;
    }
    Ok(())
}

pub fn render_message(msg: &ChatMessage) -> String {
    let speaker = if msg.is_bot() { "Bot" } else { "You" };
    format!(
        "[{}] {speaker}: {}",
        format_message_timestamp(msg.timestamp),
        msg.content
    )
}

pub fn render_notice(notice: &Notice) -> String {
    let marker = match notice.kind {
        NoticeKind::Success => "*",
        NoticeKind::Destructive => "!",
    };
    format!("{marker} {}: {}", notice.title, notice.description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use time::OffsetDateTime;

    #[test]
    fn test_split_paths_honours_quotes() {
        assert_eq!(split_paths("a.txt  b.pdf"), ["a.txt", "b.pdf"]);
        assert_eq!(
            split_paths(r#""my notes.txt" 'q3 report.pdf' plain.csv"#),
            ["my notes.txt", "q3 report.pdf", "plain.csv"]
        );
        assert_eq!(split_paths(r#"dir/"with space".json"#), ["dir/with space.json"]);
        assert_eq!(split_paths(r#""open ended"#), ["open ended"]);
        assert!(split_paths("   ").is_empty());
    }

    #[test]
    fn test_render_message_speakers() {
        let mut msg = ChatMessage {
            id: 1,
            role: Role::User,
            content: "What is RAG?".into(),
            timestamp: OffsetDateTime::now_utc(),
        };
        assert!(render_message(&msg).ends_with("] You: What is RAG?"));
        msg.role = Role::Assistant;
        assert!(render_message(&msg).contains("] Bot: "));
    }

    #[test]
    fn test_render_notice_markers() {
        let ok = Notice::success("Done", "it worked");
        let bad = Notice::destructive("No files selected", "pick one");
        assert_eq!(render_notice(&ok), "* Done: it worked");
        assert_eq!(render_notice(&bad), "! No files selected: pick one");
    }
}
