//! Scaffold - 应用启动入口
//!
//! 只负责加载配置、初始化日志与序列化规则、组装并启动 HTTP 服务

use scaffold::config::{load_config, print_config, LogConfig};
use scaffold::infrastructure::http::{AppState, HttpServer, ServerConfig};
use scaffold::infrastructure::json;

fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},scaffold={},tower_http=debug", log.level, log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 中的变量先载入环境，缺失时忽略
    let dotenv = dotenvy::dotenv();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    if let Ok(path) = dotenv {
        tracing::info!("Loaded environment from {}", path.display());
    }

    tracing::info!("{} v{} starting", config.name, config.version);
    print_config(&config);

    // 序列化规则必须在处理任何请求之前安装
    if !json::install(config.serialization.to_format()) {
        tracing::warn!("JSON format rules already installed, keeping existing rules");
    }
    tracing::info!("Global date/time/decimal formatting enabled");

    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(config);
    let server = HttpServer::new(server_config, state);

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
