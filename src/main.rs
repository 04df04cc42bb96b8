//! Catalog - 书籍目录后端
//!
//! 启动顺序：配置 → 日志 → 仓储 → 总线 → HTTP

use anyhow::Context;
use catalog::application::Repositories;
use catalog::config::{load_config, print_config, AppConfig, StorageBackend};
use catalog::infrastructure::events::EventPublisher;
use catalog::infrastructure::http::{AppState, HttpServer, ServerConfig};
use catalog::infrastructure::memory;
use catalog::infrastructure::persistence::sqlite::{self, create_pool, run_migrations, DatabaseConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().context("Failed to load config")?;

    let log_filter = format!(
        "{},catalog={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Catalog - 书籍目录后端");
    print_config(&config);

    let repos = repositories(&config).await?;
    let event_publisher = EventPublisher::new().arc();

    let state = AppState::new(&repos, event_publisher).context("Failed to assemble buses")?;
    let server = HttpServer::new(
        ServerConfig::new(&config.server.host, config.server.port),
        state,
    );

    server
        .run_with_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("Received shutdown signal"),
                Err(e) => {
                    // 无法监听信号时保持运行
                    tracing::error!(error = %e, "Failed to listen for ctrl-c");
                    std::future::pending::<()>().await;
                }
            }
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

async fn repositories(config: &AppConfig) -> anyhow::Result<Repositories> {
    match config.database.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory repositories, data is lost on restart");
            Ok(memory::repositories())
        }
        StorageBackend::Sqlite => {
            let db_config = if config.database.is_in_memory() {
                DatabaseConfig::in_memory()
            } else {
                // 确保数据目录存在
                if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                DatabaseConfig::new(&config.database.path, config.database.max_connections)
            };

            let pool = create_pool(&db_config).await?;
            run_migrations(&pool).await?;
            Ok(sqlite::repositories(pool))
        }
    }
}
