//! Story Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateStory, RemovePassword, SetPassword};
use crate::application::error::ApplicationError;
use crate::application::ports::{StoryLockPort, StoryRepositoryPort};
use crate::domain::story::{
    AccessGate, Genre, Secret, Story, StoryMetadata, StoryOperation, Title,
};

// ============================================================================
// CreateStory
// ============================================================================

/// CreateStory Handler
pub struct CreateStoryHandler {
    story_repo: Arc<dyn StoryRepositoryPort>,
}

impl CreateStoryHandler {
    pub fn new(story_repo: Arc<dyn StoryRepositoryPort>) -> Self {
        Self { story_repo }
    }

    pub async fn handle(&self, command: CreateStory) -> Result<StoryMetadata, ApplicationError> {
        let title = Title::new(command.title)?;
        let genre = Genre::new(command.genre)?;
        let secret = command.password.map(Secret::new).transpose()?;

        let mut story = Story::new(title, genre);
        if let Some(secret) = &secret {
            story.set_protection(secret);
        }

        self.story_repo.save(&story).await?;

        tracing::info!(
            story_id = %story.id(),
            title = %story.title(),
            genre = %story.genre(),
            protected = story.is_protected(),
            "Story created"
        );

        Ok(story.metadata())
    }
}

// ============================================================================
// SetPassword
// ============================================================================

/// SetPassword Handler
pub struct SetPasswordHandler {
    story_repo: Arc<dyn StoryRepositoryPort>,
    story_locks: Arc<dyn StoryLockPort>,
}

impl SetPasswordHandler {
    pub fn new(
        story_repo: Arc<dyn StoryRepositoryPort>,
        story_locks: Arc<dyn StoryLockPort>,
    ) -> Self {
        Self {
            story_repo,
            story_locks,
        }
    }

    pub async fn handle(&self, command: SetPassword) -> Result<StoryMetadata, ApplicationError> {
        let _guard = self.story_locks.lock(command.story_id).await;

        let mut story = self
            .story_repo
            .find_by_id(command.story_id)
            .await?
            .ok_or_else(|| ApplicationError::story_not_found(command.story_id))?;

        let secret = Secret::new(command.password)?;

        // 已受保护的故事必须先通过当前密码校验
        AccessGate::check(
            &story,
            command.current_password.as_deref(),
            StoryOperation::ManageProtection,
        )
        .map_err(|denied| ApplicationError::access_denied(denied, &story))?;

        story.set_protection(&secret);
        self.story_repo
            .update_protection(story.id(), story.protection(), story.updated_at())
            .await?;

        tracing::info!(story_id = %story.id(), "Story password set");

        Ok(story.metadata())
    }
}

// ============================================================================
// RemovePassword
// ============================================================================

/// RemovePassword Handler
pub struct RemovePasswordHandler {
    story_repo: Arc<dyn StoryRepositoryPort>,
    story_locks: Arc<dyn StoryLockPort>,
}

impl RemovePasswordHandler {
    pub fn new(
        story_repo: Arc<dyn StoryRepositoryPort>,
        story_locks: Arc<dyn StoryLockPort>,
    ) -> Self {
        Self {
            story_repo,
            story_locks,
        }
    }

    pub async fn handle(&self, command: RemovePassword) -> Result<StoryMetadata, ApplicationError> {
        let _guard = self.story_locks.lock(command.story_id).await;

        let mut story = self
            .story_repo
            .find_by_id(command.story_id)
            .await?
            .ok_or_else(|| ApplicationError::story_not_found(command.story_id))?;

        if !story.is_protected() {
            return Ok(story.metadata());
        }

        story
            .remove_protection(&command.password)
            .map_err(|denied| ApplicationError::access_denied(denied, &story))?;

        self.story_repo
            .update_protection(story.id(), story.protection(), story.updated_at())
            .await?;

        tracing::info!(story_id = %story.id(), "Story password removed");

        Ok(story.metadata())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{seed_story, TestContext};
    use crate::domain::story::StoryId;

    #[tokio::test]
    async fn test_create_story_unprotected() {
        let ctx = TestContext::new().await;
        let handler = CreateStoryHandler::new(ctx.story_repo.clone());

        let metadata = handler
            .handle(CreateStory {
                title: "Glass Harbor".to_string(),
                genre: "mystery".to_string(),
                password: None,
            })
            .await
            .unwrap();

        assert!(!metadata.is_protected);
        let stored = ctx.story_repo.find_by_id(metadata.id).await.unwrap().unwrap();
        assert_eq!(stored.title().as_str(), "Glass Harbor");
    }

    #[tokio::test]
    async fn test_create_story_with_short_password_fails() {
        let ctx = TestContext::new().await;
        let handler = CreateStoryHandler::new(ctx.story_repo.clone());

        let result = handler
            .handle(CreateStory {
                title: "Glass Harbor".to_string(),
                genre: "mystery".to_string(),
                password: Some("abc".to_string()),
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_set_password_length_three_rejected() {
        let ctx = TestContext::new().await;
        let story = seed_story(&ctx, None, 0).await;
        let handler = SetPasswordHandler::new(ctx.story_repo.clone(), ctx.story_locks.clone());

        let result = handler
            .handle(SetPassword {
                story_id: story.id(),
                password: "abc".to_string(),
                current_password: None,
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
        let stored = ctx.story_repo.find_by_id(story.id()).await.unwrap().unwrap();
        assert!(!stored.is_protected());
    }

    #[tokio::test]
    async fn test_set_password_length_four_protects() {
        let ctx = TestContext::new().await;
        let story = seed_story(&ctx, None, 0).await;
        let handler = SetPasswordHandler::new(ctx.story_repo.clone(), ctx.story_locks.clone());

        let metadata = handler
            .handle(SetPassword {
                story_id: story.id(),
                password: "abcd".to_string(),
                current_password: None,
            })
            .await
            .unwrap();

        assert!(metadata.is_protected);
        let stored = ctx.story_repo.find_by_id(story.id()).await.unwrap().unwrap();
        assert!(stored.is_protected());
    }

    #[tokio::test]
    async fn test_set_password_on_protected_story_needs_current() {
        let ctx = TestContext::new().await;
        let story = seed_story(&ctx, Some("first"), 0).await;
        let handler = SetPasswordHandler::new(ctx.story_repo.clone(), ctx.story_locks.clone());

        let missing = handler
            .handle(SetPassword {
                story_id: story.id(),
                password: "second".to_string(),
                current_password: None,
            })
            .await;
        assert!(matches!(missing, Err(ApplicationError::AuthRequired(_))));

        let wrong = handler
            .handle(SetPassword {
                story_id: story.id(),
                password: "second".to_string(),
                current_password: Some("nope".to_string()),
            })
            .await;
        assert!(matches!(wrong, Err(ApplicationError::AuthInvalid(_))));

        handler
            .handle(SetPassword {
                story_id: story.id(),
                password: "second".to_string(),
                current_password: Some("first".to_string()),
            })
            .await
            .unwrap();

        let remove = RemovePasswordHandler::new(ctx.story_repo.clone(), ctx.story_locks.clone());
        assert!(remove
            .handle(RemovePassword {
                story_id: story.id(),
                password: "first".to_string(),
            })
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_set_password_unknown_story() {
        let ctx = TestContext::new().await;
        let handler = SetPasswordHandler::new(ctx.story_repo.clone(), ctx.story_locks.clone());

        let result = handler
            .handle(SetPassword {
                story_id: StoryId::new(),
                password: "abcd".to_string(),
                current_password: None,
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_remove_password_wrong_secret_keeps_protection() {
        let ctx = TestContext::new().await;
        let story = seed_story(&ctx, Some("correct"), 0).await;
        let handler = RemovePasswordHandler::new(ctx.story_repo.clone(), ctx.story_locks.clone());

        let result = handler
            .handle(RemovePassword {
                story_id: story.id(),
                password: "incorrect".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::AuthInvalid(_))));
        let stored = ctx.story_repo.find_by_id(story.id()).await.unwrap().unwrap();
        assert!(stored.is_protected());
    }

    #[tokio::test]
    async fn test_remove_password_correct_secret_unprotects() {
        let ctx = TestContext::new().await;
        let story = seed_story(&ctx, Some("correct"), 0).await;
        let handler = RemovePasswordHandler::new(ctx.story_repo.clone(), ctx.story_locks.clone());

        let metadata = handler
            .handle(RemovePassword {
                story_id: story.id(),
                password: "correct".to_string(),
            })
            .await
            .unwrap();

        assert!(!metadata.is_protected);
        let stored = ctx.story_repo.find_by_id(story.id()).await.unwrap().unwrap();
        assert!(stored.protection().credential().is_none());
    }
}
