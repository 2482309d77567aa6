//! Story Context - 故事限界上下文
//!
//! 职责:
//! - 故事聚合与密码保护
//! - 章节实体
//! - 访问控制

mod access;
mod aggregate;
mod entities;
mod errors;
mod value_objects;

pub use access::{AccessGate, StoryOperation};
pub use aggregate::{Story, StoryMetadata};
pub use entities::Chapter;
pub use errors::{AccessDenied, StoryError};
pub use value_objects::{
    CredentialHash, Genre, Protection, Secret, StoryId, StoryStatus, Title, MIN_SECRET_LEN,
};
