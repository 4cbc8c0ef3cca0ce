//! URL construction for the Digikala JSON API.
//!
//! Every builder takes the API base as a parameter so tests can point the
//! client at a local mock server. Detail and comments each come in a
//! primary/legacy endpoint pair; callers try them in that fixed order.

/// Production API origin.
pub const API_BASE: &str = "https://api.digikala.com";

/// Site root used only for the cookie warm-up request.
pub const HOME_URL: &str = "https://www.digikala.com/";

/// Category whose listing pages are enumerated.
pub const CATEGORY: &str = "mobile-phone";

#[must_use]
pub fn category_search(base: &str) -> String {
    format!("{}/v1/categories/{CATEGORY}/search/", base.trim_end_matches('/'))
}

#[must_use]
pub fn product_detail_v2(base: &str, id: i64) -> String {
    format!("{}/v2/product/{id}/", base.trim_end_matches('/'))
}

#[must_use]
pub fn product_detail_v1(base: &str, id: i64) -> String {
    format!("{}/v1/product/{id}/", base.trim_end_matches('/'))
}

#[must_use]
pub fn comments_v2(base: &str, id: i64) -> String {
    format!("{}/v2/product/{id}/comments/", base.trim_end_matches('/'))
}

#[must_use]
pub fn comments_v1(base: &str, id: i64) -> String {
    format!("{}/v1/product/{id}/comments/", base.trim_end_matches('/'))
}
