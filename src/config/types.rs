//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::application::GenerationSettings;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 文本生成配置
    #[serde(default)]
    pub generation: GenerationConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 空闲故事锁清理间隔（秒）
    #[serde(default = "default_lock_prune_interval")]
    pub lock_prune_interval_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_lock_prune_interval() -> u64 {
    600
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            lock_prune_interval_secs: default_lock_prune_interval(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 文本生成后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationProvider {
    /// OpenAI 兼容的 chat-completions 服务
    #[default]
    Http,
    /// 离线脚本生成器，不发起网络请求
    Fake,
}

impl GenerationProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationProvider::Http => "http",
            GenerationProvider::Fake => "fake",
        }
    }
}

/// 文本生成配置
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    #[serde(default)]
    pub provider: GenerationProvider,

    /// 服务基础 URL（不含 /chat/completions）
    #[serde(default = "default_generation_url")]
    pub url: String,

    /// Bearer 密钥
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_generation_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_content_max_tokens")]
    pub content_max_tokens: u32,

    #[serde(default = "default_content_temperature")]
    pub content_temperature: f32,

    #[serde(default = "default_summary_max_tokens")]
    pub summary_max_tokens: u32,

    #[serde(default = "default_summary_temperature")]
    pub summary_temperature: f32,
}

fn default_generation_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_generation_timeout() -> u64 {
    120
}

fn default_content_max_tokens() -> u32 {
    GenerationSettings::default().content_max_tokens
}

fn default_content_temperature() -> f32 {
    GenerationSettings::default().content_temperature
}

fn default_summary_max_tokens() -> u32 {
    GenerationSettings::default().summary_max_tokens
}

fn default_summary_temperature() -> f32 {
    GenerationSettings::default().summary_temperature
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: GenerationProvider::default(),
            url: default_generation_url(),
            api_key: None,
            model: default_model(),
            timeout_secs: default_generation_timeout(),
            content_max_tokens: default_content_max_tokens(),
            content_temperature: default_content_temperature(),
            summary_max_tokens: default_summary_max_tokens(),
            summary_temperature: default_summary_temperature(),
        }
    }
}

impl GenerationConfig {
    /// 续写流水线使用的采样参数
    pub fn settings(&self) -> GenerationSettings {
        GenerationSettings {
            content_max_tokens: self.content_max_tokens,
            content_temperature: self.content_temperature,
            summary_max_tokens: self.summary_max_tokens,
            summary_temperature: self.summary_temperature,
        }
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/storyloom.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别（RUST_LOG 优先）
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否输出 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.addr(), "0.0.0.0:8080");
        assert_eq!(config.generation.provider, GenerationProvider::Http);
        assert_eq!(config.database.path, "data/storyloom.db");
        assert!(!config.log.json);
    }

    #[test]
    fn test_generation_settings_follow_config() {
        let mut config = GenerationConfig::default();
        assert_eq!(config.settings(), GenerationSettings::default());

        config.summary_max_tokens = 64;
        config.content_temperature = 1.1;
        let settings = config.settings();
        assert_eq!(settings.summary_max_tokens, 64);
        assert_eq!(settings.content_temperature, 1.1);
    }

    #[test]
    fn test_database_url() {
        let config = DatabaseConfig::default();
        assert_eq!(config.database_url(), "sqlite:data/storyloom.db?mode=rwc");
    }
}
