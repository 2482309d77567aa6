//! Access Gate - 按故事的密码访问控制
//!
//! 每次请求独立校验，不签发会话或令牌

use super::{AccessDenied, Protection, Story};
use crate::domain::credential;

/// 请求的操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryOperation {
    /// 读取章节内容
    Read,
    /// 续写新章节
    Continue,
    /// 修改或解除密码
    ManageProtection,
}

impl StoryOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryOperation::Read => "read",
            StoryOperation::Continue => "continue",
            StoryOperation::ManageProtection => "manage_protection",
        }
    }
}

pub struct AccessGate;

impl AccessGate {
    /// 判断调用方能否对故事执行指定操作
    pub fn check(
        story: &Story,
        secret: Option<&str>,
        operation: StoryOperation,
    ) -> Result<(), AccessDenied> {
        let Protection::Protected(hash) = story.protection() else {
            return Ok(());
        };

        let result = match secret {
            None => Err(AccessDenied::AuthRequired),
            Some(secret) if credential::verify(secret, Some(hash.as_str())) => Ok(()),
            Some(_) => Err(AccessDenied::AuthInvalid),
        };

        if let Err(denied) = &result {
            tracing::debug!(
                story_id = %story.id(),
                operation = operation.as_str(),
                reason = %denied,
                "Story access denied"
            );
        }

        result
    }
}
