//! Story Queries

use crate::domain::story::StoryId;

/// 获取故事详情查询（含全部章节）
#[derive(Debug, Clone)]
pub struct GetStory {
    pub story_id: StoryId,
    pub password: Option<String>,
}
