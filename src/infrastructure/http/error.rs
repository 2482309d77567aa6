//! HTTP Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;
use crate::domain::story::StoryMetadata;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<StoryMetadata>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const AUTH_REQUIRED: i32 = 401;
    pub const AUTH_INVALID: i32 = 403;
    pub const NOT_FOUND: i32 = 404;
    pub const INTERNAL_ERROR: i32 = 500;
    pub const GENERATION_FAILED: i32 = 502;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// 需要密码，附带故事元数据供客户端提示输入
    AuthRequired(StoryMetadata),
    AuthInvalid(String),
    GenerationFailed(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let response = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!(errno = errno::NOT_FOUND, error = %msg, "Resource not found");
                ErrorResponse::new(errno::NOT_FOUND, msg)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(errno = errno::BAD_REQUEST, error = %msg, "Bad request");
                ErrorResponse::new(errno::BAD_REQUEST, msg)
            }
            ApiError::AuthRequired(metadata) => {
                tracing::info!(errno = errno::AUTH_REQUIRED, story_id = %metadata.id, "Password required");
                ErrorResponse {
                    errno: errno::AUTH_REQUIRED,
                    error: "Password required".to_string(),
                    data: Some(metadata),
                }
            }
            ApiError::AuthInvalid(msg) => {
                tracing::warn!(errno = errno::AUTH_INVALID, error = %msg, "Incorrect password");
                ErrorResponse::new(errno::AUTH_INVALID, "Incorrect password")
            }
            ApiError::GenerationFailed(msg) => {
                tracing::error!(errno = errno::GENERATION_FAILED, error = %msg, "Generation failed");
                ErrorResponse::new(errno::GENERATION_FAILED, msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!(errno = errno::INTERNAL_ERROR, error = %msg, "Internal server error");
                ErrorResponse::new(errno::INTERNAL_ERROR, "Internal server error")
            }
        };

        (StatusCode::OK, Json(response)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound { resource_type, id } => {
                ApiError::NotFound(format!("{} not found: {}", resource_type, id))
            }
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::AuthRequired(metadata) => ApiError::AuthRequired(metadata),
            ApplicationError::AuthInvalid(id) => ApiError::AuthInvalid(format!("story {}", id)),
            ApplicationError::GenerationFailed(msg) => ApiError::GenerationFailed(msg),
            ApplicationError::RepositoryError(msg) => ApiError::Internal(msg),
            ApplicationError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::story::{Genre, Story, Title};

    #[test]
    fn test_application_error_mapping() {
        let story = Story::new(Title::new("Kite").unwrap(), Genre::new("drama").unwrap());

        assert!(matches!(
            ApiError::from(ApplicationError::AuthRequired(story.metadata())),
            ApiError::AuthRequired(_)
        ));
        assert!(matches!(
            ApiError::from(ApplicationError::AuthInvalid(story.id())),
            ApiError::AuthInvalid(_)
        ));
        assert!(matches!(
            ApiError::from(ApplicationError::story_not_found(story.id())),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(ApplicationError::RepositoryError("disk".to_string())),
            ApiError::Internal(_)
        ));
    }
}
