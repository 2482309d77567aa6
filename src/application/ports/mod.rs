//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod repositories;
mod story_lock;
mod text_generator;

pub use repositories::{RepositoryError, StoryRepositoryPort};
pub use story_lock::{StoryLockGuard, StoryLockPort};
pub use text_generator::{GenerationError, GenerationRequest, TextGeneratorPort};
