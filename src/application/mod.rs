//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（StoryRepository、TextGenerator、StoryLock）
//! - commands: CQRS 命令及处理器（含续写流水线）
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports
pub use commands::{
    ContinueStory, CreateStory, RemovePassword, SetPassword,
    // Handlers
    handlers::{
        ContinueStoryHandler, ContinueStoryResponse, CreateStoryHandler, GenerationSettings,
        RemovePasswordHandler, SetPasswordHandler, SummaryOutcome, SUMMARY_PLACEHOLDER,
    },
};

pub use error::ApplicationError;

pub use ports::{
    GenerationError, GenerationRequest, RepositoryError, StoryLockGuard, StoryLockPort,
    StoryRepositoryPort, TextGeneratorPort,
};

pub use queries::{
    GetStory,
    // Handlers
    handlers::{GetStoryHandler, StoryResponse},
};
