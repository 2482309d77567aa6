//! Memory Layer - In-Memory State Management
//!
//! 实现 StoryLockPort，管理按故事划分的写锁

mod story_locks;

pub use story_locks::InMemoryStoryLocks;
