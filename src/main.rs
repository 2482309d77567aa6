//! Storyloom 服务入口

use std::sync::Arc;
use std::time::Duration;

use storyloom::application::TextGeneratorPort;
use storyloom::config::{load_config, print_config, AppConfig, GenerationProvider};
use storyloom::infrastructure::adapters::{
    FakeTextGenerator, HttpTextGenerator, HttpTextGeneratorConfig,
};
use storyloom::infrastructure::http::{AppState, HttpServer, ServerConfig};
use storyloom::infrastructure::memory::InMemoryStoryLocks;
use storyloom::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteStoryRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Storyloom {}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    let story_repo = Arc::new(SqliteStoryRepository::new(pool));
    let text_generator = build_text_generator(&config)?;
    let story_locks = Arc::new(InMemoryStoryLocks::new());

    // 定期清理空闲的故事锁
    {
        let story_locks = story_locks.clone();
        let period = Duration::from_secs(config.server.lock_prune_interval_secs);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                story_locks.prune();
            }
        });
    }

    let state = AppState::new(
        story_repo,
        text_generator,
        story_locks,
        config.generation.settings(),
    );

    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, state);

    server.run_with_shutdown(shutdown_signal()).await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志，RUST_LOG 优先于配置
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},storyloom={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_text_generator(config: &AppConfig) -> anyhow::Result<Arc<dyn TextGeneratorPort>> {
    let generation = &config.generation;
    match generation.provider {
        GenerationProvider::Http => {
            let mut client_config = HttpTextGeneratorConfig::new(&generation.url)
                .with_model(&generation.model)
                .with_timeout(generation.timeout_secs);
            if let Some(api_key) = &generation.api_key {
                client_config = client_config.with_api_key(api_key);
            }
            Ok(Arc::new(HttpTextGenerator::new(client_config)?))
        }
        GenerationProvider::Fake => {
            tracing::warn!("Using offline fake text generator");
            Ok(Arc::new(FakeTextGenerator::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
