//! Story Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{AccessDenied, Genre, Protection, Secret, StoryId, StoryStatus, Title};
use crate::domain::credential;

/// Story 聚合根
///
/// 不变量:
/// - 受保护标记与密码哈希始终一致（由 [`Protection`] 保证）
/// - 仅在校验当前密码成功后才能解除保护
/// - 密码哈希永远不出现在任何读取响应中
#[derive(Debug, Clone)]
pub struct Story {
    id: StoryId,
    title: Title,
    genre: Genre,
    protection: Protection,
    status: StoryStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// 故事的非敏感元数据
///
/// 访问被拒绝时也可以安全返回
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryMetadata {
    pub id: StoryId,
    pub title: String,
    pub genre: String,
    pub is_protected: bool,
    pub status: StoryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Story {
    /// 创建新故事（未受保护）
    pub fn new(title: Title, genre: Genre) -> Self {
        let now = Utc::now();
        Self {
            id: StoryId::new(),
            title,
            genre,
            protection: Protection::Unprotected,
            status: StoryStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// 从持久化状态恢复
    pub fn from_parts(
        id: StoryId,
        title: Title,
        genre: Genre,
        protection: Protection,
        status: StoryStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            genre,
            protection,
            status,
            created_at,
            updated_at,
        }
    }

    /// 设置新密码，故事变为受保护
    pub fn set_protection(&mut self, secret: &Secret) {
        self.protection = Protection::Protected(credential::hash(secret.expose()));
        self.touch(Utc::now());
    }

    /// 校验当前密码后解除保护
    ///
    /// 校验失败时故事保持受保护状态
    pub fn remove_protection(&mut self, current: &str) -> Result<(), AccessDenied> {
        let Protection::Protected(hash) = &self.protection else {
            return Ok(());
        };
        if !credential::verify(current, Some(hash.as_str())) {
            return Err(AccessDenied::AuthInvalid);
        }
        self.protection = Protection::Unprotected;
        self.touch(Utc::now());
        Ok(())
    }

    /// 推进最后修改时间
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.updated_at {
            self.updated_at = now;
        }
    }

    pub fn metadata(&self) -> StoryMetadata {
        StoryMetadata {
            id: self.id,
            title: self.title.as_str().to_string(),
            genre: self.genre.as_str().to_string(),
            is_protected: self.is_protected(),
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    // Getters
    pub fn id(&self) -> StoryId {
        self.id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn genre(&self) -> &Genre {
        &self.genre
    }

    pub fn protection(&self) -> &Protection {
        &self.protection
    }

    pub fn is_protected(&self) -> bool {
        self.protection.is_protected()
    }

    pub fn status(&self) -> StoryStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
