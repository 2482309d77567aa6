//! In-Memory Story Locks Implementation

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::application::ports::{StoryLockGuard, StoryLockPort};
use crate::domain::story::StoryId;

/// 内存故事锁
///
/// 每个故事一把异步互斥锁；不同故事互不阻塞
pub struct InMemoryStoryLocks {
    locks: DashMap<StoryId, Arc<Mutex<()>>>,
}

impl InMemoryStoryLocks {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// 清理当前无人持有的锁
    pub fn prune(&self) -> usize {
        let before = self.locks.len();
        self.locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        let removed = before.saturating_sub(self.locks.len());
        if removed > 0 {
            tracing::debug!(removed = removed, "Idle story locks pruned");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

impl Default for InMemoryStoryLocks {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoryLockPort for InMemoryStoryLocks {
    async fn lock(&self, story_id: StoryId) -> StoryLockGuard {
        // 先克隆 Arc 再等待，避免持有 DashMap 分片锁跨 await
        let lock = self.locks.entry(story_id).or_default().clone();
        let guard = lock.lock_owned().await;
        tracing::trace!(story_id = %story_id, "Story lock acquired");
        StoryLockGuard::new(guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_story_is_serialized() {
        let locks = Arc::new(InMemoryStoryLocks::new());
        let story_id = StoryId::new();

        let guard = locks.lock(story_id).await;
        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.lock(story_id).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_different_stories_do_not_block() {
        let locks = InMemoryStoryLocks::new();
        let _first = locks.lock(StoryId::new()).await;
        let second = tokio::time::timeout(Duration::from_millis(100), locks.lock(StoryId::new())).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_prune_keeps_held_locks() {
        let locks = InMemoryStoryLocks::new();
        let held = locks.lock(StoryId::new()).await;
        drop(locks.lock(StoryId::new()).await);

        assert_eq!(locks.len(), 2);
        assert_eq!(locks.prune(), 1);
        assert_eq!(locks.len(), 1);

        drop(held);
        assert_eq!(locks.prune(), 1);
        assert!(locks.is_empty());
    }
}
