//! The single-pass harvest pipeline.
//!
//! Everything runs sequentially on one task: warm-up, id enumeration, then
//! per-product detail resolution, brand filtering, projection, and review
//! collection. A failure while handling one product means "no data for that
//! product" and the loop moves on; nothing aborts the run.

use dkharvest_core::{ProductRecord, ReviewRecord, RunConfig};

use crate::catalog;
use crate::client::CatalogClient;
use crate::detail;
use crate::reviews;

/// The two output sequences of a completed run, in collection order.
#[derive(Debug, Default)]
pub struct Harvest {
    pub products: Vec<ProductRecord>,
    pub reviews: Vec<ReviewRecord>,
}

/// Terminal outcome of a harvest pass. The empty outcomes are reported as a
/// single console line by the caller, not as process failures.
#[derive(Debug)]
pub enum RunOutcome {
    /// Category enumeration produced no ids at all.
    NoProductIds,
    /// Ids existed but no product survived the brand filter.
    NothingCollected,
    Complete(Harvest),
}

/// Runs one full harvest pass against `client`.
///
/// Products are processed in enumeration order until `max_products`
/// (0 = unlimited) brand-matched products have been handled. A product that
/// fails detail resolution or the brand predicate is skipped silently — a
/// filter outcome, not an error — and does not count against the cap.
/// Review rows get their `product_title` back-filled from the owning
/// product record as soon as it is known.
pub async fn run(client: &CatalogClient, config: &RunConfig) -> RunOutcome {
    client.warmup().await;

    let ids = catalog::enumerate_ids(client, config.page_limit, config.delay).await;
    tracing::debug!(ids = ids.len(), "enumerated category product ids");
    if ids.is_empty() {
        return RunOutcome::NoProductIds;
    }

    let mut products: Vec<ProductRecord> = Vec::new();
    let mut reviews: Vec<ReviewRecord> = Vec::new();
    let mut processed: u32 = 0;

    for id in ids {
        if config.max_products != 0 && processed >= config.max_products {
            break;
        }

        let Some(payload) = detail::resolve_detail(client, id).await else {
            continue;
        };
        if !detail::is_target_brand(&payload) {
            continue;
        }

        let product = detail::project_product(&payload);

        let mut rows = reviews::collect_reviews(
            client,
            id,
            config.review_page_limit,
            config.delay,
            config.review_cap,
        )
        .await;
        let title = product.display_title().map(str::to_owned);
        for row in &mut rows {
            row.product_title.clone_from(&title);
        }

        products.push(product);
        reviews.extend(rows);

        processed += 1;
        if processed % 20 == 0 {
            tracing::debug!(processed, reviews = reviews.len(), "harvest progress");
        }
        if !config.delay.is_zero() {
            tokio::time::sleep(config.delay).await;
        }
    }

    if products.is_empty() && reviews.is_empty() {
        return RunOutcome::NothingCollected;
    }
    RunOutcome::Complete(Harvest { products, reviews })
}
