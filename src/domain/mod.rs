//! Domain Layer - 领域层
//!
//! 包含:
//! - Story Context: 故事、章节与密码保护
//! - Credential Codec: 密码哈希
//! - Context Assembler / Chapter Sequencer: 续写所需的纯逻辑

pub mod credential;
pub mod story;

mod chapter_sequencer;
mod context_window;

pub use chapter_sequencer::next_chapter_number;
pub use context_window::{assemble_context, CONTEXT_WINDOW_CHAPTERS, PREVIEW_CHARS};
