//! Category listing enumeration.
//!
//! Walks the paged category-search endpoint and accumulates product ids in
//! first-seen order. Three signals stop the walk: an exhausted/absent page,
//! the configured page limit, and the pager descriptor cached from page 1.
//! Exhaustion wins when it disagrees with the pager.

use std::collections::HashSet;
use std::time::Duration;

use serde_json::Value;

use crate::client::CatalogClient;
use crate::endpoints;
use crate::json_path;

/// Reads the total page count from the listing pager descriptor, trying the
/// two shapes observed across payload versions. Only positive integers
/// count; anything else means "no descriptor".
fn pager_total_pages(payload: &Value) -> Option<u64> {
    json_path::first_of(
        payload,
        &[&["data", "pager", "total_pages"], &["data", "pager", "total"]],
    )
    .and_then(Value::as_u64)
    .filter(|&n| n > 0)
}

/// Pulls the product id out of one listing stub. Stubs carry the id either
/// at the top level or nested under `data`; non-integer ids are dropped.
fn stub_id(stub: &Value) -> Option<i64> {
    json_path::first_of(stub, &[&["id"], &["data", "id"]]).and_then(Value::as_i64)
}

/// Enumerates product ids from the category listing, page by page.
///
/// `page_limit = 0` means walk until exhaustion. `delay` is slept between
/// page fetches (never after the last page). The result is deduplicated
/// preserving each id's first occurrence; the same product showing up on
/// several pages is expected, not an error.
pub async fn enumerate_ids(client: &CatalogClient, page_limit: u32, delay: Duration) -> Vec<i64> {
    let url = endpoints::category_search(client.api_base());
    let mut ids: Vec<i64> = Vec::new();
    let mut seen: HashSet<i64> = HashSet::new();
    let mut total_pages: Option<u64> = None;
    let mut page: u32 = 1;

    loop {
        let Some(payload) = client.fetch_json(&url, &[("page", page.to_string())]).await else {
            tracing::debug!(page, "listing page yielded no payload, stopping");
            break;
        };

        let stubs = json_path::lookup(&payload, &["data", "products"]).and_then(Value::as_array);
        let stub_count = stubs.map_or(0, Vec::len);
        if let Some(stubs) = stubs {
            for stub in stubs {
                if let Some(id) = stub_id(stub) {
                    if seen.insert(id) {
                        ids.push(id);
                    }
                }
            }
        }

        // The pager descriptor is consulted once, on the first page.
        if page == 1 {
            total_pages = pager_total_pages(&payload);
            tracing::debug!(?total_pages, "cached pager descriptor");
        }

        if stub_count == 0 {
            tracing::debug!(page, "empty listing page, treating as exhaustion");
            break;
        }
        if page_limit != 0 && page >= page_limit {
            tracing::debug!(page, page_limit, "page limit reached");
            break;
        }
        if total_pages.is_some_and(|total| u64::from(page) >= total) {
            tracing::debug!(page, "pager descriptor says this was the last page");
            break;
        }

        page += 1;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    ids
}
