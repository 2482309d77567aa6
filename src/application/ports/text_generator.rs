//! Text Generator Port - 文本生成服务抽象
//!
//! 定义文本生成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// 文本生成错误
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty content returned")]
    EmptyContent,
}

/// 文本生成请求
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// 系统指令
    pub system_prompt: String,
    /// 用户消息
    pub user_prompt: String,
    /// 最大输出 token 数
    pub max_tokens: u32,
    /// 采样温度
    pub temperature: f32,
}

/// Text Generator Port
///
/// 每次调用同步返回，不做重试
#[async_trait]
pub trait TextGeneratorPort: Send + Sync {
    /// 生成文本
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;
}
