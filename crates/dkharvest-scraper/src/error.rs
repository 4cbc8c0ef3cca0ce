use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("response from {url} is not valid JSON: {source}")]
    Deserialize {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// A 404 is a valid terminal answer for a single request and is never
    /// retried. Everything else — network failures, timeouts, other non-2xx
    /// statuses, unparseable bodies — is treated as equally transient.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        !matches!(self, FetchError::NotFound { .. })
    }
}
