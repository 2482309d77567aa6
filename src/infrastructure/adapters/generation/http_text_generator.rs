//! HTTP Text Generator - 调用外部文本生成服务
//!
//! 实现 TextGeneratorPort trait，通过 OpenAI 兼容的 Chat Completions 接口生成文本
//!
//! 外部 API:
//! POST {base_url}/chat/completions
//! Request: {"model": "...", "messages": [...], "max_tokens": N, "temperature": T}
//! Response: {"choices": [{"message": {"role": "assistant", "content": "..."}}]}

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{GenerationError, GenerationRequest, TextGeneratorPort};

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat Completions 请求体
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

/// HTTP 文本生成客户端配置
#[derive(Debug, Clone)]
pub struct HttpTextGeneratorConfig {
    /// 服务基础 URL（不含 /chat/completions）
    pub base_url: String,
    /// API Key（可选，本地服务通常不需要）
    pub api_key: Option<String>,
    /// 模型名称
    pub model: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpTextGeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 120,
        }
    }
}

impl HttpTextGeneratorConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP 文本生成客户端
///
/// 不做重试，失败直接返回给调用方
pub struct HttpTextGenerator {
    client: Client,
    config: HttpTextGeneratorConfig,
}

impl HttpTextGenerator {
    /// 创建新的 HTTP 文本生成客户端
    pub fn new(config: HttpTextGeneratorConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取生成 URL
    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl TextGeneratorPort for HttpTextGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system_prompt,
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.user_prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        tracing::debug!(
            url = %self.completions_url(),
            model = %self.config.model,
            max_tokens = request.max_tokens,
            temperature = request.temperature,
            "Sending generation request"
        );

        let mut http_request = self.client.post(self.completions_url()).json(&body);
        if let Some(api_key) = &self.config.api_key {
            http_request = http_request.bearer_auth(api_key);
        }

        let response = http_request.send().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout
            } else if e.is_connect() {
                GenerationError::NetworkError(format!(
                    "Cannot connect to generation service: {}",
                    e
                ))
            } else {
                GenerationError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => GenerationError::QuotaExceeded(error_text),
                _ => GenerationError::ServiceError(format!("HTTP {}: {}", status, error_text)),
            });
        }

        let chat: ChatResponse = response.json().await.map_err(|e| {
            GenerationError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        let text = extract_text(chat)?;

        tracing::info!(
            model = %self.config.model,
            output_chars = text.chars().count(),
            "Generation completed"
        );

        Ok(text)
    }
}

fn extract_text(response: ChatResponse) -> Result<String, GenerationError> {
    let content = response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| GenerationError::InvalidResponse("No choices in response".to_string()))?;

    if content.trim().is_empty() {
        return Err(GenerationError::EmptyContent);
    }

    Ok(content)
}
