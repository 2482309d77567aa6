//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::domain::story::{AccessDenied, Story, StoryError, StoryId, StoryMetadata};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 故事受保护，需要密码（只携带非敏感元数据）
    #[error("Password required")]
    AuthRequired(StoryMetadata),

    /// 密码错误
    #[error("Incorrect password for story {0}")]
    AuthInvalid(StoryId),

    /// 正文生成失败，未保存任何章节
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建故事 NotFound 错误
    pub fn story_not_found(id: StoryId) -> Self {
        Self::NotFound {
            resource_type: "Story",
            id: id.to_string(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 将访问拒绝转换为应用层错误
    pub fn access_denied(denied: AccessDenied, story: &Story) -> Self {
        match denied {
            AccessDenied::AuthRequired => Self::AuthRequired(story.metadata()),
            AccessDenied::AuthInvalid => Self::AuthInvalid(story.id()),
        }
    }
}

impl From<crate::application::ports::RepositoryError> for ApplicationError {
    fn from(err: crate::application::ports::RepositoryError) -> Self {
        Self::RepositoryError(err.to_string())
    }
}

impl From<StoryError> for ApplicationError {
    fn from(err: StoryError) -> Self {
        Self::ValidationError(err.to_string())
    }
}
