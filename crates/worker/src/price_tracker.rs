//! Re-parsing of catalog links.
//!
//! Every attempt leaves exactly one `parse_results` row behind: a success
//! with the extracted price, or a failure carrying the error text. Links are
//! processed one after another; a failing link never stops the batch.

use sha2::{Digest, Sha256};
use sqlx::PgPool;
use switchdeck_core::catalog::extract_price;
use switchdeck_db::models::catalog::{ParseResult, ParseSummary, ParseTarget};
use switchdeck_db::repositories::{CatalogLinkRepo, ParseResultRepo};

use crate::fetcher::PageFetcher;

/// SHA-256 hex digest of a fetched page body.
pub fn page_digest(body: &str) -> String {
    let hash = Sha256::digest(body.as_bytes());
    format!("{hash:x}")
}

/// Fetch one link, extract its price and persist the outcome.
///
/// Only storage errors are returned; fetch and extraction failures are
/// recorded as unsuccessful results.
pub async fn parse_link(
    pool: &PgPool,
    fetcher: &dyn PageFetcher,
    target: &ParseTarget,
) -> Result<ParseResult, sqlx::Error> {
    let body = match fetcher.fetch(&target.url).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(link_id = target.link_id, url = %target.url, error = %e, "Catalog page fetch failed");
            return ParseResultRepo::record_failure(pool, target.link_id, None, &e.to_string())
                .await;
        }
    };

    let digest = page_digest(&body);
    match extract_price(&body, &target.price_selector) {
        Ok(price) => {
            tracing::debug!(link_id = target.link_id, %price, "Catalog price parsed");
            ParseResultRepo::record_success(pool, target.link_id, &digest, price).await
        }
        Err(e) => {
            tracing::warn!(link_id = target.link_id, error = %e, "Catalog price extraction failed");
            ParseResultRepo::record_failure(pool, target.link_id, Some(&digest), &e.to_string())
                .await
        }
    }
}

/// Parse every link (or only active ones) in id order.
pub async fn parse_all_links(
    pool: &PgPool,
    fetcher: &dyn PageFetcher,
    active_only: bool,
) -> Result<ParseSummary, sqlx::Error> {
    let targets = CatalogLinkRepo::parse_targets(pool, active_only).await?;
    let mut summary = ParseSummary::default();

    for target in &targets {
        let result = parse_link(pool, fetcher, target).await?;
        if result.successful {
            summary.parsed += 1;
        } else {
            summary.failed += 1;
        }
    }

    tracing::info!(
        links = targets.len(),
        parsed = summary.parsed,
        failed = summary.failed,
        "Catalog links parsed"
    );
    Ok(summary)
}
