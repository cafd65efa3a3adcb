use anyhow::Context;
use crypto_news_search::handlers::{router, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = crypto_news_search::Config::from_env()?;
    tracing::info!("Configuration loaded");

    tracing::info!(
        "CryptoPanic API: {}",
        if config.sources.cryptopanic_enabled() { "configured" } else { "not configured" }
    );
    tracing::info!(
        "NewsAPI: {}",
        if config.sources.newsapi_enabled() { "configured" } else { "not configured" }
    );

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::from_config(config)?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind server at {bind_addr}"))?;
    tracing::info!("Starting Crypto News API on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await
        .context("server failed")?;

    Ok(())
}
