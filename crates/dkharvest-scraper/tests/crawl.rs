//! Integration tests for the transport, catalog enumeration, and detail
//! resolution, using `wiremock` so no real network traffic is made.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dkharvest_scraper::{catalog, detail, CatalogClient, FetchError};

const SEARCH_PATH: &str = "/v1/categories/mobile-phone/search/";

/// Client pointed at the mock server: no retries, no backoff.
fn test_client(server: &MockServer) -> CatalogClient {
    CatalogClient::new(server.uri(), server.uri(), 0, Duration::ZERO)
        .expect("failed to build test CatalogClient")
}

fn test_client_with_retries(server: &MockServer, max_retries: u32) -> CatalogClient {
    CatalogClient::new(server.uri(), server.uri(), max_retries, Duration::ZERO)
        .expect("failed to build test CatalogClient")
}

/// Listing page payload with the given stub ids and an optional pager.
fn listing_page(ids: &[i64], total_pages: Option<u64>) -> serde_json::Value {
    let products: Vec<_> = ids.iter().map(|id| json!({"id": id})).collect();
    match total_pages {
        Some(total) => json!({"data": {"products": products, "pager": {"total_pages": total}}}),
        None => json!({"data": {"products": products}}),
    }
}

// ---------------------------------------------------------------------------
// Catalog enumeration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn enumeration_dedups_preserving_first_seen_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_page(&[101, 202, 101], Some(2))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_page(&[202, 303], None)))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let ids = catalog::enumerate_ids(&client, 0, Duration::ZERO).await;

    assert_eq!(ids, vec![101, 202, 303]);
}

#[tokio::test]
async fn enumeration_stops_at_cached_pager_total() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_page(&[1], Some(1))))
        .mount(&server)
        .await;
    // Page 2 must never be requested when the pager says there is one page.
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_page(&[2], None)))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let ids = catalog::enumerate_ids(&client, 0, Duration::ZERO).await;

    assert_eq!(ids, vec![1]);
}

#[tokio::test]
async fn empty_page_stops_enumeration_even_when_pager_promises_more() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_page(&[11, 22], Some(5))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_page(&[], None)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_page(&[33], None)))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let ids = catalog::enumerate_ids(&client, 0, Duration::ZERO).await;

    assert_eq!(ids, vec![11, 22]);
}

#[tokio::test]
async fn page_limit_overrides_pager_descriptor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_page(&[1, 2], Some(10))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_page(&[3], None)))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let ids = catalog::enumerate_ids(&client, 1, Duration::ZERO).await;

    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn failing_page_is_treated_as_end_of_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_page(&[7], Some(4))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let ids = catalog::enumerate_ids(&client, 0, Duration::ZERO).await;

    assert_eq!(ids, vec![7]);
}

#[tokio::test]
async fn enumeration_reads_nested_stub_id_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "products": [{"data": {"id": 404_404}}, {"id": 505}],
                "pager": {"total_pages": 1}
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let ids = catalog::enumerate_ids(&client, 0, Duration::ZERO).await;

    assert_eq!(ids, vec![404_404, 505]);
}

// ---------------------------------------------------------------------------
// Detail resolution: primary/legacy endpoint pair
// ---------------------------------------------------------------------------

#[tokio::test]
async fn detail_prefers_primary_endpoint_and_skips_legacy() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/product/101/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"product": {"id": 101, "title_en": "Galaxy S24"}}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/product/101/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let payload = detail::resolve_detail(&client, 101).await.expect("payload");

    assert_eq!(detail::project_product(&payload).id, Some(101));
}

#[tokio::test]
async fn detail_falls_back_to_legacy_when_primary_is_absent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/product/101/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/product/101/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"product": {"id": 101, "title_fa": "گوشی"}}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let payload = detail::resolve_detail(&client, 101).await.expect("payload");

    assert_eq!(
        detail::project_product(&payload).title_fa.as_deref(),
        Some("گوشی")
    );
}

#[tokio::test]
async fn detail_absent_on_both_endpoints_resolves_to_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/product/9/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/product/9/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert!(detail::resolve_detail(&client, 9).await.is_none());
}

// ---------------------------------------------------------------------------
// Transport error taxonomy
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_is_terminal_and_never_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/product/1/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_with_retries(&server, 3);
    let url = format!("{}/v2/product/1/", server.uri());
    let result = client.try_fetch_json(&url, &[]).await;

    assert!(matches!(result, Err(FetchError::NotFound { .. })));
}

#[tokio::test]
async fn server_error_is_retried_until_exhaustion() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/product/1/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client_with_retries(&server, 2);
    let url = format!("{}/v2/product/1/", server.uri());
    let result = client.try_fetch_json(&url, &[]).await;

    assert!(matches!(
        result,
        Err(FetchError::UnexpectedStatus { status: 503, .. })
    ));
}

#[tokio::test]
async fn transient_failure_then_success_returns_the_payload() {
    let server = MockServer::start().await;

    // First attempt fails; the mock expires and the success mock takes over.
    Mock::given(method("GET"))
        .and(path("/v2/product/1/"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/product/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .mount(&server)
        .await;

    let client = test_client_with_retries(&server, 1);
    let url = format!("{}/v2/product/1/", server.uri());
    let result = client.try_fetch_json(&url, &[]).await;

    assert!(result.is_ok(), "expected Ok after one retry, got {result:?}");
}

#[tokio::test]
async fn non_json_body_degrades_to_absence() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/product/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let url = format!("{}/v2/product/1/", server.uri());

    assert!(client.fetch_json(&url, &[]).await.is_none());
}
