//! Storyloom - 分章节续写的故事引擎
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Story Context: 故事、章节、访问控制
//! - Credential: 密码哈希与校验
//! - 上下文窗口与章节编号
//!
//! 应用层 (application/):
//! - Ports: StoryRepository, TextGenerator, StoryLock
//! - Commands: 创建故事、密码管理、续写流水线
//! - Queries: 故事详情
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: JSON API
//! - Persistence: SQLite
//! - Adapters: OpenAI 兼容生成客户端、脚本生成器
//! - Memory: 按故事划分的写锁

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
