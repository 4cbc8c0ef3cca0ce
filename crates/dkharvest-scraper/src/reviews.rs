//! Paginated review collection for a single product.
//!
//! Comments come from a primary/legacy endpoint pair tried in strict
//! priority order: the legacy family is attempted only when the primary
//! family's own pagination produced zero records. The families are never
//! merged — once any record exists, the other endpoint is not consulted,
//! even when collection was truncated by the cap.

use std::time::Duration;

use dkharvest_core::ReviewRecord;
use serde_json::Value;

use crate::client::CatalogClient;
use crate::endpoints;
use crate::json_path;

/// Locates the comment array in a comments payload. Two homes are known
/// (`data.comments` and `data.product.comments`), and either may wrap the
/// actual array one level deeper under a `comments` key.
fn comment_list(payload: &Value) -> Option<&Vec<Value>> {
    let found = json_path::first_of(
        payload,
        &[&["data", "comments"], &["data", "product", "comments"]],
    )?;
    match found {
        Value::Array(items) => Some(items),
        Value::Object(map) => map.get("comments").and_then(Value::as_array),
        _ => None,
    }
}

/// Flattens one heterogeneous comment object into a [`ReviewRecord`].
/// Each logical field has a prioritized list of known names; absent fields
/// become empty strings (or `None` for the rating), never an error.
/// `product_title` is left unfilled for the pipeline to patch.
fn flatten_comment(product_id: i64, comment: &Value) -> ReviewRecord {
    ReviewRecord {
        product_id,
        product_title: None,
        comment_id: json_path::first_of(comment, &[&["id"], &["comment_id"]])
            .and_then(json_path::as_string_loose)
            .unwrap_or_default(),
        created_at: json_path::first_of(
            comment,
            &[
                &["created_at"],
                &["creation_date"],
                &["created_at_fa"],
                &["date"],
            ],
        )
        .and_then(json_path::as_string_loose)
        .unwrap_or_default(),
        rating: json_path::first_of(comment, &[&["rate"], &["rating"], &["score"]])
            .and_then(json_path::as_i64_loose),
        comment_text: json_path::first_of(comment, &[&["body"], &["text"], &["title"]])
            .and_then(json_path::as_string_loose)
            .unwrap_or_default(),
    }
}

/// Collects up to `max_count` reviews for one product (0 = unlimited).
///
/// Within a family, pagination stops when the cap is hit (mid-page, with no
/// further page fetched), when `page_limit` pages have been fetched
/// (0 = unlimited), or when a page yields no comments — an absent payload
/// and a missing/empty list are the same exhaustion signal. `delay` is
/// slept between page fetches only.
pub async fn collect_reviews(
    client: &CatalogClient,
    id: i64,
    page_limit: u32,
    delay: Duration,
    max_count: u32,
) -> Vec<ReviewRecord> {
    let base = client.api_base();
    let mut rows: Vec<ReviewRecord> = Vec::new();

    for family in [endpoints::comments_v2(base, id), endpoints::comments_v1(base, id)] {
        let mut page: u32 = 1;
        let mut capped = false;

        loop {
            if max_count != 0 && rows.len() >= max_count as usize {
                capped = true;
                break;
            }

            let Some(payload) = client
                .fetch_json(&family, &[("page", page.to_string())])
                .await
            else {
                break;
            };

            let Some(comments) = comment_list(&payload).filter(|list| !list.is_empty()) else {
                break;
            };

            for comment in comments {
                if max_count != 0 && rows.len() >= max_count as usize {
                    capped = true;
                    break;
                }
                rows.push(flatten_comment(id, comment));
            }

            if capped {
                break;
            }
            if page_limit != 0 && page >= page_limit {
                break;
            }

            page += 1;
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        // Any record from this family makes it authoritative; the legacy
        // family is only for a primary that produced nothing at all.
        if !rows.is_empty() {
            break;
        }
    }

    rows
}
