//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    ContinueStoryHandler, CreateStoryHandler, GenerationSettings, RemovePasswordHandler,
    SetPasswordHandler,
    // Query handlers
    GetStoryHandler,
    // Ports
    StoryLockPort, StoryRepositoryPort, TextGeneratorPort,
};

/// 应用状态
pub struct AppState {
    // ========== Command Handlers ==========
    pub create_story_handler: CreateStoryHandler,
    pub set_password_handler: SetPasswordHandler,
    pub remove_password_handler: RemovePasswordHandler,
    pub continue_story_handler: ContinueStoryHandler,

    // ========== Query Handlers ==========
    pub get_story_handler: GetStoryHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        story_repo: Arc<dyn StoryRepositoryPort>,
        text_generator: Arc<dyn TextGeneratorPort>,
        story_locks: Arc<dyn StoryLockPort>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            // Command handlers
            create_story_handler: CreateStoryHandler::new(story_repo.clone()),
            set_password_handler: SetPasswordHandler::new(story_repo.clone(), story_locks.clone()),
            remove_password_handler: RemovePasswordHandler::new(
                story_repo.clone(),
                story_locks.clone(),
            ),
            continue_story_handler: ContinueStoryHandler::new(
                story_repo.clone(),
                text_generator,
                story_locks,
                settings,
            ),

            // Query handlers
            get_story_handler: GetStoryHandler::new(story_repo),
        }
    }
}
