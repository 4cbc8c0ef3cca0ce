//! Flat output records for the two CSV tables.
//!
//! `Option` fields are the explicit unknown marker: a value absent from the
//! source payload after every fallback path stays `None` and serializes as
//! an empty cell — it is never replaced by zero or a fabricated default.

use serde::Serialize;

/// One row of the products table.
///
/// Field order matches the output column order:
/// `id, title_fa, title_en, selling_price, rrp_price, rating_avg, rating_count`.
#[derive(Debug, Clone, Serialize)]
pub struct ProductRecord {
    pub id: Option<i64>,
    /// Localized (Persian) product title.
    pub title_fa: Option<String>,
    /// Transliterated (English) product title.
    pub title_en: Option<String>,
    pub selling_price: Option<i64>,
    /// Recommended retail price.
    pub rrp_price: Option<i64>,
    pub rating_avg: Option<f64>,
    pub rating_count: Option<i64>,
}

impl ProductRecord {
    /// The title used to back-fill review rows: localized title first,
    /// transliterated title when the localized one is absent.
    #[must_use]
    pub fn display_title(&self) -> Option<&str> {
        self.title_fa.as_deref().or(self.title_en.as_deref())
    }
}

/// One row of the reviews table.
///
/// `product_title` is a two-phase fill: rows are created with `None` while
/// reviews are being collected, then patched once the owning product's
/// record (and therefore its title) is known.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewRecord {
    pub product_id: i64,
    pub product_title: Option<String>,
    pub comment_id: String,
    /// Raw creation timestamp string, passed through without normalization.
    pub created_at: String,
    pub rating: Option<i64>,
    pub comment_text: String,
}
