//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod continue_handlers;
mod story_handlers;

pub use continue_handlers::*;
pub use story_handlers::*;
