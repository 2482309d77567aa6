//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（如 SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::story::{Chapter, Protection, Story, StoryId};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Story Repository Port
///
/// 章节归属于故事，删除故事时级联删除章节
#[async_trait]
pub trait StoryRepositoryPort: Send + Sync {
    /// 保存故事（存在则更新）
    async fn save(&self, story: &Story) -> Result<(), RepositoryError>;

    /// 根据 ID 查找故事
    async fn find_by_id(&self, id: StoryId) -> Result<Option<Story>, RepositoryError>;

    /// 删除故事及其全部章节
    async fn delete(&self, id: StoryId) -> Result<(), RepositoryError>;

    /// 更新保护状态与修改时间
    async fn update_protection(
        &self,
        id: StoryId,
        protection: &Protection,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;

    /// 获取故事的全部章节（按章节号升序）
    async fn find_chapters(&self, story_id: StoryId) -> Result<Vec<Chapter>, RepositoryError>;

    /// 获取最近的若干章节（按章节号降序）
    async fn find_recent_chapters(
        &self,
        story_id: StoryId,
        limit: usize,
    ) -> Result<Vec<Chapter>, RepositoryError>;

    /// 追加章节，并在同一事务内推进故事的修改时间
    ///
    /// 同一故事内章节号重复时返回 `RepositoryError::Duplicate`
    async fn append_chapter(&self, chapter: &Chapter) -> Result<(), RepositoryError>;
}
