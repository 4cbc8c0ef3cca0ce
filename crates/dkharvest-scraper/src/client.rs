//! HTTP transport for the Digikala JSON API.
//!
//! One [`CatalogClient`] is built at run start and passed to every stage of
//! the pipeline. It owns the reqwest client (fixed browser-like headers plus
//! a cookie store seeded by [`CatalogClient::warmup`]) and the retry policy.
//! Past this boundary nothing throws: callers see either a parsed JSON
//! document or absence.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde_json::Value;

use crate::error::FetchError;
use crate::retry::retry_with_backoff;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const REQUEST_TIMEOUT_SECS: u64 = 25;

/// HTTP client for the catalog, detail, and comments endpoints.
///
/// Transient failures (network errors, timeouts, non-404 error statuses,
/// unparseable bodies) are retried with linear backoff; a 404 is a valid
/// terminal answer and is returned as absence immediately.
pub struct CatalogClient {
    http: Client,
    api_base: String,
    home_url: String,
    /// Additional attempts after the first failure of a single request.
    max_retries: u32,
    /// Base pause for linear backoff: the n-th retry sleeps `pause * n`.
    pause: Duration,
}

impl CatalogClient {
    /// Creates a client with the fixed header set and a cookie store.
    ///
    /// `api_base` is the API origin (`https://api.digikala.com` in
    /// production, a mock server in tests); `home_url` is the page fetched
    /// by [`Self::warmup`] to seed session cookies.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_base: impl Into<String>,
        home_url: impl Into<String>,
        max_retries: u32,
        pause: Duration,
    ) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("fa-IR,fa;q=0.9,en-US;q=0.8,en;q=0.7"),
        );
        headers.insert(
            reqwest::header::REFERER,
            HeaderValue::from_static("https://www.digikala.com/"),
        );

        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            http,
            api_base: api_base.into(),
            home_url: home_url.into(),
            max_retries,
            pause,
        })
    }

    /// API origin this client targets; URL builders in
    /// [`crate::endpoints`] take it as their base.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Best-effort GET of the site root to pick up session cookies before
    /// the first API call. Failure has no effect on subsequent requests.
    pub async fn warmup(&self) {
        match self.http.get(&self.home_url).send().await {
            Ok(response) => {
                tracing::debug!(status = %response.status(), "session warm-up complete");
            }
            Err(err) => {
                tracing::debug!(error = %err, "session warm-up failed, continuing without cookies");
            }
        }
    }

    /// GET `url` with `params` and parse the body as JSON, retrying
    /// transient failures. Returns `None` both for a 404 and after retry
    /// exhaustion — callers treat every absence the same way.
    pub async fn fetch_json(&self, url: &str, params: &[(&str, String)]) -> Option<Value> {
        match self.try_fetch_json(url, params).await {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::debug!(url, error = %err, "fetch degraded to absence");
                None
            }
        }
    }

    /// Like [`Self::fetch_json`] but surfaces the terminal [`FetchError`],
    /// so the retry taxonomy stays observable in tests.
    ///
    /// # Errors
    ///
    /// - [`FetchError::NotFound`] — HTTP 404, returned without retrying.
    /// - [`FetchError::UnexpectedStatus`] — any other non-2xx status, after
    ///   retries are exhausted.
    /// - [`FetchError::Http`] — network or timeout failure, after retries.
    /// - [`FetchError::Deserialize`] — body is not valid JSON, after retries.
    pub async fn try_fetch_json(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<Value, FetchError> {
        retry_with_backoff(self.max_retries, self.pause, || {
            let url = url.to_owned();
            let params = params.to_vec();
            async move {
                let response = self.http.get(&url).query(&params).send().await?;
                let status = response.status();

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(FetchError::NotFound { url });
                }
                if !status.is_success() {
                    return Err(FetchError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                let body = response.text().await?;
                serde_json::from_str(&body).map_err(|e| FetchError::Deserialize { url, source: e })
            }
        })
        .await
    }
}
