mod config;
mod error;
mod listener;
mod message;
mod notify;
mod outcome;
mod telegram;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

use config::ListenConfig;
use outcome::OutputSink;
use telegram::client::TelegramClient;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ci_telegram_notify=info")),
        )
        .init();

    dotenvy::dotenv().ok();

    if config::is_listen_mode() {
        return run_listener().await;
    }

    let sink = OutputSink::from_env();
    notify::run(config::env_var, &sink)
        .await
        .context("CI notification failed")
}

async fn run_listener() -> Result<()> {
    let config = ListenConfig::from_lookup(config::env_var).context("Failed to load config")?;
    let client = TelegramClient::new(&config.api_url, &config.token)?;

    // Graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Shutdown signal received");
        r.store(false, Ordering::SeqCst);
    });

    listener::listen(&client, running).await;
    Ok(())
}
