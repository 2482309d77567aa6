//! Story HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{ContinueStory, CreateStory, GetStory, RemovePassword, SetPassword};
use crate::domain::story::{StoryId, StoryMetadata};
use crate::infrastructure::http::dto::{
    ApiResponse, ContinueResponse, ContinueStoryRequest, CreateStoryRequest, GetStoryRequest,
    RemovePasswordRequest, SetPasswordRequest, StoryDetailResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 创建故事
pub async fn create_story(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateStoryRequest>,
) -> Result<Json<ApiResponse<StoryMetadata>>, ApiError> {
    let command = CreateStory {
        title: req.title,
        genre: req.genre,
        password: req.password,
    };

    let result = state.create_story_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(result)))
}

/// 获取故事详情（含全部章节）
///
/// 受保护且未提供密码时 errno=401，data 为故事元数据
pub async fn get_story(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetStoryRequest>,
) -> Result<Json<ApiResponse<StoryDetailResponse>>, ApiError> {
    let query = GetStory {
        story_id: StoryId::from_uuid(req.id),
        password: req.password,
    };

    let result = state.get_story_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(result.into())))
}

/// 设置或更换密码
pub async fn set_password(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetPasswordRequest>,
) -> Result<Json<ApiResponse<StoryMetadata>>, ApiError> {
    let command = SetPassword {
        story_id: StoryId::from_uuid(req.id),
        password: req.password,
        current_password: req.current_password,
    };

    let result = state.set_password_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(result)))
}

/// 解除密码
pub async fn remove_password(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RemovePasswordRequest>,
) -> Result<Json<ApiResponse<StoryMetadata>>, ApiError> {
    let command = RemovePassword {
        story_id: StoryId::from_uuid(req.id),
        password: req.password,
    };

    let result = state.remove_password_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(result)))
}

/// 续写下一章（同步等待生成完成）
pub async fn continue_story(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ContinueStoryRequest>,
) -> Result<Json<ApiResponse<ContinueResponse>>, ApiError> {
    let command = ContinueStory {
        story_id: StoryId::from_uuid(req.id),
        prompt: req.prompt,
        password: req.password,
    };

    let result = state.continue_story_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(result.into())))
}
