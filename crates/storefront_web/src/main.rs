use anyhow::{anyhow, Context};
use log::{error, info};
use storefront_core::db::open_db;
use storefront_core::{init_logging_with, LoggingOptions};
use storefront_web::{app, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env()?;

    let log_dir = config
        .log_dir
        .to_str()
        .ok_or_else(|| anyhow!("log directory is not valid UTF-8"))?;
    init_logging_with(&LoggingOptions {
        echo_stderr: true,
        ..LoggingOptions::new(config.log_level.as_str(), log_dir)
    })
    .map_err(|err| anyhow!(err))?;

    // Fail fast on unreadable files or a newer schema.
    open_db(&config.db_path).with_context(|| {
        format!("failed to open database `{}`", config.db_path.display())
    })?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(
        "event=server_start module=server status=ok addr={} db_path={}",
        config.bind_addr,
        config.db_path.display()
    );

    let result = axum::serve(listener, app(AppState::new(config.db_path.clone())))
        .with_graceful_shutdown(shutdown_signal())
        .await;
    if let Err(err) = &result {
        error!("event=server_stop module=server status=error error={err}");
    } else {
        info!("event=server_stop module=server status=ok");
    }
    result.context("server terminated unexpectedly")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=shutdown_signal module=server status=error error={err}");
    }
}
