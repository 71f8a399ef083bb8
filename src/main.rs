use anyhow::{Context, Result};
use chat_relay::{config, server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Builds the log filter from `RUST_LOG`, or `fallback` when it is unset.
/// Full directives such as `chat_relay=debug,tower_http=info` are accepted.
fn log_filter(rust_log: Option<&str>, fallback: &str) -> Result<EnvFilter> {
    let directives = rust_log.unwrap_or(fallback);

    EnvFilter::try_new(directives).with_context(|| {
        format!(
            "Invalid log filter: '{}'. Use a level (error, warn, info, debug, trace) or target=level directives",
            directives
        )
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = match log_filter(rust_log.as_deref(), &config.server.logs.level) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    info!(
        port = config.server.port,
        static_dir = %config.server.static_dir,
        "Starting chat relay"
    );

    server::run(config).await?;

    Ok(())
}
