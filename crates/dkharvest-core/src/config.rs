use std::time::Duration;

/// Run-wide limits and pacing for a single harvest pass.
///
/// Every limit treats `0` as "unlimited"; no range validation is applied
/// beyond what the argument parser's type coercion enforces.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Maximum number of category listing pages to enumerate (0 = all).
    pub page_limit: u32,
    /// Maximum number of brand-matched products to process (0 = all).
    pub max_products: u32,
    /// Maximum review pages fetched per product (0 = all).
    pub review_page_limit: u32,
    /// Maximum reviews collected per product (0 = unlimited).
    pub review_cap: u32,
    /// Pause between successive outbound requests and between items.
    pub delay: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            page_limit: 0,
            max_products: 0,
            review_page_limit: 0,
            review_cap: 500,
            delay: Duration::from_millis(600),
        }
    }
}
