//! Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{ContinueStoryResponse, StoryResponse};
use crate::domain::story::{Chapter, StoryMetadata};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Story DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateStoryRequest {
    pub title: String,
    pub genre: String,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GetStoryRequest {
    pub id: Uuid,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetPasswordRequest {
    pub id: Uuid,
    pub password: String,
    #[serde(default)]
    pub current_password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemovePasswordRequest {
    pub id: Uuid,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ContinueStoryRequest {
    pub id: Uuid,
    pub prompt: String,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChapterResponse {
    pub id: Uuid,
    pub chapter_number: u32,
    pub title: Option<String>,
    pub content: String,
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Chapter> for ChapterResponse {
    fn from(chapter: Chapter) -> Self {
        Self {
            id: chapter.id(),
            chapter_number: chapter.number(),
            title: chapter.title().map(str::to_string),
            content: chapter.content().to_string(),
            summary: chapter.summary().map(str::to_string),
            created_at: chapter.created_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StoryDetailResponse {
    pub story: StoryMetadata,
    pub chapters: Vec<ChapterResponse>,
}

impl From<StoryResponse> for StoryDetailResponse {
    fn from(result: StoryResponse) -> Self {
        Self {
            story: result.story,
            chapters: result.chapters.into_iter().map(ChapterResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContinueResponse {
    pub chapter: ChapterResponse,
    /// 摘要生成失败时为 true，summary 为占位文本
    pub summary_fallback: bool,
}

impl From<ContinueStoryResponse> for ContinueResponse {
    fn from(result: ContinueStoryResponse) -> Self {
        Self {
            chapter: result.chapter.into(),
            summary_fallback: result.summary_fallback,
        }
    }
}
