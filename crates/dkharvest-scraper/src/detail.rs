//! Product detail resolution, brand filtering, and record projection.
//!
//! The detail endpoint exists in two versions with slightly different
//! payload layouts; v2 is authoritative and v1 is the legacy fallback.
//! Projection reads every logical field through an ordered fallback chain
//! of accessor paths, so layout drift degrades to an unknown value instead
//! of breaking the run.

use dkharvest_core::ProductRecord;
use serde_json::Value;

use crate::client::CatalogClient;
use crate::endpoints;
use crate::json_path;

/// Accepted brand spellings, matched exactly after trimming. The set is
/// deliberately literal (case- and script-sensitive): "SAMSUNG-OTHER" or a
/// spelling variant outside this list does not pass.
const ACCEPTED_BRAND_SPELLINGS: [&str; 4] = ["Samsung", "SAMSUNG", "samsung", "سامسونگ"];

/// Fetches the detail payload for one product: primary endpoint first,
/// legacy endpoint only when the primary yields absence. The first
/// non-absent payload wins.
pub async fn resolve_detail(client: &CatalogClient, id: i64) -> Option<Value> {
    let base = client.api_base();
    for url in [
        endpoints::product_detail_v2(base, id),
        endpoints::product_detail_v1(base, id),
    ] {
        if let Some(payload) = client.fetch_json(&url, &[]).await {
            return Some(payload);
        }
    }
    None
}

/// Evaluates the brand predicate against the candidate brand fields of a
/// detail payload: localized title (raw title as its stand-in), the
/// transliterated title, and the machine code.
#[must_use]
pub fn is_target_brand(detail: &Value) -> bool {
    let candidates = [
        json_path::first_of(
            detail,
            &[
                &["data", "product", "brand", "title_fa"],
                &["data", "product", "brand", "title"],
            ],
        ),
        json_path::lookup(detail, &["data", "product", "brand", "title_en"]),
        json_path::lookup(detail, &["data", "product", "brand", "code"]),
    ];

    candidates
        .into_iter()
        .flatten()
        .filter_map(json_path::as_string_loose)
        .any(|text| ACCEPTED_BRAND_SPELLINGS.contains(&text.trim()))
}

/// Projects a detail payload into a flat [`ProductRecord`].
///
/// Prices and ratings each have several known homes across payload
/// versions; the first present path wins. A field absent under every path
/// is recorded as `None`, never as zero.
#[must_use]
pub fn project_product(detail: &Value) -> ProductRecord {
    let product = json_path::lookup(detail, &["data", "product"]).unwrap_or(&Value::Null);

    ProductRecord {
        id: json_path::lookup(product, &["id"]).and_then(Value::as_i64),
        title_fa: json_path::first_of(product, &[&["title_fa"], &["title"]])
            .and_then(json_path::as_string_loose),
        title_en: json_path::lookup(product, &["title_en"]).and_then(json_path::as_string_loose),
        selling_price: json_path::first_of(
            product,
            &[
                &["default_variant", "price", "selling_price"],
                &["price", "selling_price"],
                &["default_variant_price"],
            ],
        )
        .and_then(json_path::as_i64_loose),
        rrp_price: json_path::first_of(
            product,
            &[
                &["default_variant", "price", "rrp_price"],
                &["price", "rrp_price"],
            ],
        )
        .and_then(json_path::as_i64_loose),
        rating_avg: json_path::first_of(product, &[&["rating", "rate"], &["rating", "rating"]])
            .and_then(json_path::as_f64_loose),
        rating_count: json_path::first_of(product, &[&["rating", "count"], &["review_count"]])
            .and_then(json_path::as_i64_loose),
    }
}
