//! Configuration Loader
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml / config.local.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, GenerationProvider};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "STORYLOOM";

/// 加载应用配置
///
/// # 环境变量示例
/// - `STORYLOOM_SERVER__PORT=9000`
/// - `STORYLOOM_GENERATION__URL=http://localhost:11434/v1`
/// - `STORYLOOM_GENERATION__API_KEY=sk-...`
/// - `STORYLOOM_GENERATION__PROVIDER=fake`
/// - `STORYLOOM_DATABASE__PATH=/data/storyloom.db`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// `config_path` 为 None 时搜索默认配置文件，均为可选
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("generation.provider", "http")?
        .set_default("generation.url", "https://api.openai.com/v1")?
        .set_default("generation.model", "gpt-4o-mini")?
        .set_default("generation.timeout_secs", 120)?
        .set_default("database.path", "data/storyloom.db")?
        .set_default("database.max_connections", 5)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 层级分隔符: __ (双下划线)，变量名转为小写
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError(msg.into())
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(invalid("Server port cannot be 0"));
    }

    if config.server.lock_prune_interval_secs == 0 {
        return Err(invalid("Lock prune interval cannot be 0"));
    }

    if config.database.path.is_empty() {
        return Err(invalid("Database path cannot be empty"));
    }

    if config.database.max_connections == 0 {
        return Err(invalid("Database max connections cannot be 0"));
    }

    let generation = &config.generation;
    if generation.provider == GenerationProvider::Http {
        if generation.url.is_empty() {
            return Err(invalid("Generation URL cannot be empty"));
        }
        if generation.model.is_empty() {
            return Err(invalid("Generation model cannot be empty"));
        }
        if generation.timeout_secs == 0 {
            return Err(invalid("Generation timeout cannot be 0"));
        }
    }

    if generation.content_max_tokens == 0 || generation.summary_max_tokens == 0 {
        return Err(invalid("Generation max tokens must be positive"));
    }

    for (name, temperature) in [
        ("content_temperature", generation.content_temperature),
        ("summary_temperature", generation.summary_temperature),
    ] {
        if !(0.0..=2.0).contains(&temperature) {
            return Err(invalid(format!(
                "Generation {} must be within 0.0..=2.0, got {}",
                name, temperature
            )));
        }
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
///
/// 不输出 api_key
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Generation Provider: {}", config.generation.provider.as_str());
    if config.generation.provider == GenerationProvider::Http {
        tracing::info!("Generation URL: {}", config.generation.url);
        tracing::info!("Generation Model: {}", config.generation.model);
        tracing::info!("Generation Timeout: {}s", config.generation.timeout_secs);
        tracing::info!(
            "Generation API Key: {}",
            if config.generation.api_key.is_some() { "set" } else { "unset" }
        );
    }
    tracing::info!(
        "Content Sampling: max_tokens={}, temperature={}",
        config.generation.content_max_tokens,
        config.generation.content_temperature
    );
    tracing::info!(
        "Summary Sampling: max_tokens={}, temperature={}",
        config.generation.summary_max_tokens,
        config.generation.summary_temperature
    );
    tracing::info!("Database: {}", config.database.path);
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
