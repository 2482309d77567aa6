//! Story Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::StoryRepositoryPort;
use crate::application::queries::GetStory;
use crate::domain::story::{AccessGate, Chapter, StoryMetadata, StoryOperation};

// ============================================================================
// Response DTOs
// ============================================================================

/// 故事详情响应
#[derive(Debug, Clone)]
pub struct StoryResponse {
    pub story: StoryMetadata,
    /// 按章节号升序
    pub chapters: Vec<Chapter>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GetStory Handler
///
/// 受保护且未提供密码时返回 `AuthRequired`，只携带元数据
pub struct GetStoryHandler {
    story_repo: Arc<dyn StoryRepositoryPort>,
}

impl GetStoryHandler {
    pub fn new(story_repo: Arc<dyn StoryRepositoryPort>) -> Self {
        Self { story_repo }
    }

    pub async fn handle(&self, query: GetStory) -> Result<StoryResponse, ApplicationError> {
        let story = self
            .story_repo
            .find_by_id(query.story_id)
            .await?
            .ok_or_else(|| ApplicationError::story_not_found(query.story_id))?;

        AccessGate::check(&story, query.password.as_deref(), StoryOperation::Read)
            .map_err(|denied| ApplicationError::access_denied(denied, &story))?;

        let chapters = self.story_repo.find_chapters(story.id()).await?;

        Ok(StoryResponse {
            story: story.metadata(),
            chapters,
        })
    }
}
