//! SQLite Persistence - SQLite 数据库持久化实现

mod database;
mod story_repo;

pub use database::*;
pub use story_repo::*;
