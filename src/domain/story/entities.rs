//! Story Context - Entities

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{StoryError, StoryId};

/// 章节 - 故事的有序、不可变内容单元
///
/// 不变量:
/// - number 从 1 开始，在故事内唯一
/// - content 不可为空
/// - 创建后不可修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    id: Uuid,
    story_id: StoryId,
    number: u32,
    title: Option<String>,
    content: String,
    summary: Option<String>,
    created_at: DateTime<Utc>,
}

impl Chapter {
    pub fn new(
        story_id: StoryId,
        number: u32,
        title: Option<String>,
        content: String,
        summary: Option<String>,
    ) -> Result<Self, StoryError> {
        if number == 0 {
            return Err(StoryError::InvalidChapter("章节编号必须从1开始".to_string()));
        }
        if content.trim().is_empty() {
            return Err(StoryError::InvalidChapter("章节内容不能为空".to_string()));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            story_id,
            number,
            title,
            content,
            summary,
            created_at: Utc::now(),
        })
    }

    /// 从持久化状态恢复
    pub fn from_parts(
        id: Uuid,
        story_id: StoryId,
        number: u32,
        title: Option<String>,
        content: String,
        summary: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            story_id,
            number,
            title,
            content,
            summary,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn story_id(&self) -> StoryId {
        self.story_id
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_rejects_zero_number() {
        let result = Chapter::new(StoryId::new(), 0, None, "text".to_string(), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_chapter_rejects_blank_content() {
        let result = Chapter::new(StoryId::new(), 1, None, "  \n".to_string(), None);
        assert!(result.is_err());
    }
}
