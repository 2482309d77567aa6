//! 测试辅助：内存 SQLite + 内存故事锁

use std::sync::Arc;

use crate::application::ports::StoryRepositoryPort;
use crate::domain::story::{Chapter, Genre, Secret, Story, Title};
use crate::infrastructure::memory::InMemoryStoryLocks;
use crate::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteStoryRepository,
};

pub(crate) struct TestContext {
    pub story_repo: Arc<SqliteStoryRepository>,
    pub story_locks: Arc<InMemoryStoryLocks>,
}

impl TestContext {
    pub async fn new() -> Self {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        Self {
            story_repo: Arc::new(SqliteStoryRepository::new(pool)),
            story_locks: Arc::new(InMemoryStoryLocks::new()),
        }
    }
}

/// 创建一个故事，并追加编号 1..=chapters 的章节
pub(crate) async fn seed_story(ctx: &TestContext, password: Option<&str>, chapters: u32) -> Story {
    let mut story = Story::new(
        Title::new("The Lantern Keeper").unwrap(),
        Genre::new("fantasy").unwrap(),
    );
    if let Some(password) = password {
        story.set_protection(&Secret::new(password).unwrap());
    }
    ctx.story_repo.save(&story).await.unwrap();

    for number in 1..=chapters {
        let chapter = Chapter::new(
            story.id(),
            number,
            None,
            format!("Chapter {} content", number),
            Some(format!("Summary of chapter {}", number)),
        )
        .unwrap();
        ctx.story_repo.append_chapter(&chapter).await.unwrap();
    }

    story
}
