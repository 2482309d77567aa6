//! ContinueStory Handler - 续写流水线
//!
//! 流程:
//! 1. 获取故事锁，加载故事并校验访问权限
//! 2. 读取最近 3 章，构建上下文并计算下一章节号
//! 3. 生成正文（失败即终止，不保存任何章节）
//! 4. 生成摘要（失败时使用占位摘要）
//! 5. 保存章节并推进故事修改时间

use std::sync::Arc;

use crate::application::commands::ContinueStory;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    GenerationRequest, StoryLockPort, StoryRepositoryPort, TextGeneratorPort,
};
use crate::domain::story::{AccessGate, Chapter, Story, StoryOperation};
use crate::domain::{assemble_context, next_chapter_number, CONTEXT_WINDOW_CHAPTERS};

/// 摘要生成失败时使用的占位摘要
pub const SUMMARY_PLACEHOLDER: &str = "Chapter summary unavailable";

/// 两次生成调用的采样参数
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub content_max_tokens: u32,
    pub content_temperature: f32,
    pub summary_max_tokens: u32,
    pub summary_temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            content_max_tokens: 2000,
            content_temperature: 0.8,
            summary_max_tokens: 150,
            summary_temperature: 0.3,
        }
    }
}

/// 摘要阶段的结果，失败可恢复
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    Generated(String),
    Fallback { reason: String },
}

impl SummaryOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, SummaryOutcome::Fallback { .. })
    }

    pub fn into_text(self) -> String {
        match self {
            SummaryOutcome::Generated(summary) => summary,
            SummaryOutcome::Fallback { .. } => SUMMARY_PLACEHOLDER.to_string(),
        }
    }
}

/// 续写响应
#[derive(Debug, Clone)]
pub struct ContinueStoryResponse {
    pub chapter: Chapter,
    /// 摘要是否为占位内容
    pub summary_fallback: bool,
}

/// ContinueStory Handler
pub struct ContinueStoryHandler {
    story_repo: Arc<dyn StoryRepositoryPort>,
    text_generator: Arc<dyn TextGeneratorPort>,
    story_locks: Arc<dyn StoryLockPort>,
    settings: GenerationSettings,
}

impl ContinueStoryHandler {
    pub fn new(
        story_repo: Arc<dyn StoryRepositoryPort>,
        text_generator: Arc<dyn TextGeneratorPort>,
        story_locks: Arc<dyn StoryLockPort>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            story_repo,
            text_generator,
            story_locks,
            settings,
        }
    }

    pub async fn handle(
        &self,
        command: ContinueStory,
    ) -> Result<ContinueStoryResponse, ApplicationError> {
        // 同一故事的续写串行执行，保证章节号唯一且连续
        let _guard = self.story_locks.lock(command.story_id).await;

        let story = self
            .story_repo
            .find_by_id(command.story_id)
            .await?
            .ok_or_else(|| ApplicationError::story_not_found(command.story_id))?;

        AccessGate::check(&story, command.password.as_deref(), StoryOperation::Continue)
            .map_err(|denied| ApplicationError::access_denied(denied, &story))?;

        let prompt = command.prompt.trim();
        if prompt.is_empty() {
            return Err(ApplicationError::validation("Prompt cannot be empty"));
        }

        let recent = self
            .story_repo
            .find_recent_chapters(story.id(), CONTEXT_WINDOW_CHAPTERS)
            .await?;
        let numbers: Vec<u32> = recent.iter().map(Chapter::number).collect();
        let next_number = next_chapter_number(&numbers);

        let content = self.generate_content(&story, &recent, prompt).await?;
        let summary = self.generate_summary(&story, next_number, &content).await;
        let summary_fallback = summary.is_fallback();

        let chapter = Chapter::new(
            story.id(),
            next_number,
            None,
            content,
            Some(summary.into_text()),
        )?;

        self.story_repo.append_chapter(&chapter).await?;

        tracing::info!(
            story_id = %story.id(),
            chapter_number = chapter.number(),
            content_chars = chapter.content().chars().count(),
            summary_fallback = summary_fallback,
            "Chapter appended"
        );

        Ok(ContinueStoryResponse {
            chapter,
            summary_fallback,
        })
    }

    /// 正文阶段：失败即终止
    async fn generate_content(
        &self,
        story: &Story,
        recent: &[Chapter],
        prompt: &str,
    ) -> Result<String, ApplicationError> {
        let user_prompt = if recent.is_empty() {
            prompt.to_string()
        } else {
            let context = assemble_context(story.title(), story.genre(), recent);
            format!("{}\n\nContinue the story: {}", context, prompt)
        };

        let request = GenerationRequest {
            system_prompt: format!(
                "You are a creative fiction writer working on a {} story titled \"{}\". \
                 Write the next chapter in vivid prose, keeping characters, tone and plot \
                 consistent with what came before.",
                story.genre(),
                story.title()
            ),
            user_prompt,
            max_tokens: self.settings.content_max_tokens,
            temperature: self.settings.content_temperature,
        };

        let content = self.text_generator.generate(request).await.map_err(|e| {
            tracing::error!(story_id = %story.id(), error = %e, "Chapter generation failed");
            ApplicationError::GenerationFailed(e.to_string())
        })?;

        let content = content.trim();
        if content.is_empty() {
            tracing::error!(story_id = %story.id(), "Chapter generation returned no content");
            return Err(ApplicationError::GenerationFailed(
                "Generation service returned no content".to_string(),
            ));
        }

        Ok(content.to_string())
    }

    /// 摘要阶段：任何失败都降级为占位摘要
    async fn generate_summary(&self, story: &Story, number: u32, content: &str) -> SummaryOutcome {
        let request = GenerationRequest {
            system_prompt: "You summarize chapters of fiction. Reply with a concise summary \
                            of two or three sentences and nothing else."
                .to_string(),
            user_prompt: content.to_string(),
            max_tokens: self.settings.summary_max_tokens,
            temperature: self.settings.summary_temperature,
        };

        let reason = match self.text_generator.generate(request).await {
            Ok(summary) if !summary.trim().is_empty() => {
                return SummaryOutcome::Generated(summary.trim().to_string());
            }
            Ok(_) => "empty summary".to_string(),
            Err(e) => e.to_string(),
        };

        tracing::warn!(
            story_id = %story.id(),
            chapter_number = number,
            reason = %reason,
            "Summary generation failed, using placeholder"
        );

        SummaryOutcome::Fallback { reason }
    }
}
