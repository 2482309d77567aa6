//! Story Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoryError {
    #[error("无效的标题: {0}")]
    InvalidTitle(String),

    #[error("无效的类型: {0}")]
    InvalidGenre(String),

    #[error("无效的密码: {0}")]
    InvalidSecret(String),

    #[error("无效的章节: {0}")]
    InvalidChapter(String),
}

/// 访问被拒绝的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessDenied {
    /// 故事受保护，但未提供密码
    #[error("Password required")]
    AuthRequired,

    /// 提供的密码不正确
    #[error("Incorrect password")]
    AuthInvalid,
}
