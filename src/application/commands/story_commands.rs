//! Story Commands

use crate::domain::story::StoryId;

/// 创建故事命令
#[derive(Debug, Clone)]
pub struct CreateStory {
    pub title: String,
    pub genre: String,
    /// 可选的初始密码
    pub password: Option<String>,
}

/// 设置密码命令
///
/// 故事已受保护时，必须提供当前密码
#[derive(Debug, Clone)]
pub struct SetPassword {
    pub story_id: StoryId,
    pub password: String,
    pub current_password: Option<String>,
}

/// 解除密码命令（需要当前密码）
#[derive(Debug, Clone)]
pub struct RemovePassword {
    pub story_id: StoryId,
    pub password: String,
}

/// 续写故事命令
#[derive(Debug, Clone)]
pub struct ContinueStory {
    pub story_id: StoryId,
    pub prompt: String,
    pub password: Option<String>,
}
