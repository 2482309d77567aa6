//! Fake Text Generator - 用于测试和离线运行的文本生成器
//!
//! 按顺序返回预设结果，预设用完后返回固定模板文本，不调用任何外部服务

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::{GenerationError, GenerationRequest, TextGeneratorPort};

/// Fake Text Generator
pub struct FakeTextGenerator {
    responses: Mutex<VecDeque<Result<String, GenerationError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
    delay: Option<Duration>,
}

impl FakeTextGenerator {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// 按顺序返回给定结果
    pub fn with_responses(responses: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Self::new()
        }
    }

    /// 每次调用前等待，模拟推理延迟
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// 已收到的请求（按调用顺序）
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl Default for FakeTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGeneratorPort for FakeTextGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        tracing::debug!(
            prompt_len = request.user_prompt.len(),
            max_tokens = request.max_tokens,
            "FakeTextGenerator: returning scripted text"
        );

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let scripted = self
            .responses
            .lock()
            .ok()
            .and_then(|mut responses| responses.pop_front());

        let fallback = format!(
            "[generated] {}",
            request.user_prompt.lines().last().unwrap_or_default()
        );

        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        scripted.unwrap_or(Ok(fallback))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prompt: &str) -> GenerationRequest {
        GenerationRequest {
            system_prompt: "system".to_string(),
            user_prompt: prompt.to_string(),
            max_tokens: 10,
            temperature: 0.5,
        }
    }

    #[tokio::test]
    async fn test_scripted_then_fallback() {
        let generator = FakeTextGenerator::with_responses(vec![
            Ok("first".to_string()),
            Err(GenerationError::Timeout),
        ]);

        assert_eq!(generator.generate(request("a")).await.unwrap(), "first");
        assert!(generator.generate(request("b")).await.is_err());
        assert_eq!(
            generator.generate(request("line one\nline two")).await.unwrap(),
            "[generated] line two"
        );
        assert_eq!(generator.requests().len(), 3);
    }
}
