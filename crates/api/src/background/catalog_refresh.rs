//! Periodic re-parse of active catalog links.
//!
//! Every tick fetches each active link's shop page and records a parse
//! result. Individual fetch or extraction failures are recorded per link
//! and never stop the loop.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use switchdeck_worker::price_tracker::parse_all_links;
use switchdeck_worker::PageFetcher;
use tokio_util::sync::CancellationToken;

/// Run the catalog refresh loop every `interval_secs` seconds until
/// `cancel` is triggered.
pub async fn run(
    pool: PgPool,
    fetcher: Arc<dyn PageFetcher>,
    interval_secs: u64,
    cancel: CancellationToken,
) {
    tracing::info!(interval_secs, "Catalog refresh job started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Catalog refresh job stopping");
                break;
            }
            _ = interval.tick() => {
                match parse_all_links(&pool, fetcher.as_ref(), true).await {
                    Ok(summary) => {
                        tracing::info!(
                            parsed = summary.parsed,
                            failed = summary.failed,
                            "Catalog refresh: run complete"
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Catalog refresh: run failed");
                    }
                }
            }
        }
    }
}
