pub mod chat;
pub mod documents;
pub mod loading;
pub mod notices;
pub mod snippets;
pub mod upload;

pub use chat::ChatView;
pub use documents::DocumentsPanel;
pub use loading::LoadingDots;
pub use notices::NoticeStack;
pub use snippets::SnippetPanel;
pub use upload::UploadDialogView;
