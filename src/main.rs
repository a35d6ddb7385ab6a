use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tower_http::cors::CorsLayer;

use casting_bot::channels::TelegramClient;
use casting_bot::config::AppConfig;
use casting_bot::jobs::{JobRouteState, job_routes};
use casting_bot::registration::{RegistrationFlow, WebhookState, webhook_routes};
use casting_bot::store::LibSqlBackend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("  export TELEGRAM_BOT_TOKEN=123456:ABC...");
        std::process::exit(1);
    });

    eprintln!("🎬 Casting Bot v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Webhook: http://0.0.0.0:{}/api/webhook", config.server.port);
    eprintln!("   Jobs API: http://0.0.0.0:{}/api/jobs", config.server.port);
    eprintln!("   Database: {}", config.server.db_path.display());
    eprintln!("   Start command: {}\n", config.bot.start_command);

    let app = build_app(&config).await.unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.server.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.server.port))?;
    tracing::info!(port = config.server.port, "HTTP server started");

    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}

/// Open storage, reach Telegram and assemble the HTTP routes.
async fn build_app(config: &AppConfig) -> casting_bot::error::Result<Router> {
    // ── Database ─────────────────────────────────────────────────────────
    let store = Arc::new(LibSqlBackend::new_local(&config.server.db_path).await?);

    // ── Telegram ─────────────────────────────────────────────────────────
    let telegram = Arc::new(TelegramClient::from_config(&config.bot));
    if let Err(e) = telegram.health_check().await {
        tracing::warn!("Telegram health check failed: {e}");
    }
    match &config.bot.webhook_url {
        Some(url) => {
            telegram.set_webhook(url).await?;
            eprintln!("   Telegram webhook: {url}/api/webhook");
        }
        None => eprintln!("   Telegram webhook: not registered (WEBHOOK_URL unset)"),
    }

    // ── Routes ───────────────────────────────────────────────────────────
    let flow = Arc::new(RegistrationFlow::new(
        store.clone(),
        telegram,
        config.bot.start_command.clone(),
    ));

    Ok(webhook_routes(WebhookState { flow })
        .merge(job_routes(JobRouteState { store }).layer(CorsLayer::permissive())))
}
