//! Batch re-parse of catalog links.
//!
//! Runs once by default. With `CATALOG_REFRESH_INTERVAL_SECS` set to a
//! positive value it keeps re-parsing on that interval until Ctrl+C.

use std::time::Duration;

use anyhow::Context;
use switchdeck_worker::price_tracker::parse_all_links;
use switchdeck_worker::{HttpPageFetcher, WorkerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "switchdeck_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WorkerConfig::from_env().context("Invalid worker configuration")?;
    let interval_secs = config.refresh_interval_secs;
    let include_inactive = config.include_inactive;

    let pool = switchdeck_db::create_pool(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    let fetcher = HttpPageFetcher::new().context("Failed to build HTTP client")?;

    if interval_secs == 0 {
        let summary = parse_all_links(&pool, &fetcher, !include_inactive).await?;
        tracing::info!(parsed = summary.parsed, failed = summary.failed, "Worker finished");
        return Ok(());
    }

    tracing::info!(interval_secs, "Worker starting catalog refresh loop");
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Worker stopping");
                break;
            }
            _ = interval.tick() => {
                if let Err(e) = parse_all_links(&pool, &fetcher, !include_inactive).await {
                    tracing::error!(error = %e, "Catalog refresh failed");
                }
            }
        }
    }

    pool.close().await;
    Ok(())
}
