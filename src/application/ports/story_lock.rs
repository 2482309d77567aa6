//! Story Lock Port - 按故事串行化写操作
//!
//! 同一故事的读-改-写（续写、设置/解除密码）必须在锁内完成，
//! 不同故事之间互不阻塞

use async_trait::async_trait;

use crate::domain::story::StoryId;

/// 故事锁守卫，drop 时释放
pub struct StoryLockGuard {
    _inner: Box<dyn Send + Sync>,
}

impl StoryLockGuard {
    pub fn new(inner: impl Send + Sync + 'static) -> Self {
        Self {
            _inner: Box::new(inner),
        }
    }
}

/// Story Lock Port
#[async_trait]
pub trait StoryLockPort: Send + Sync {
    /// 获取指定故事的独占锁
    async fn lock(&self, story_id: StoryId) -> StoryLockGuard;
}
