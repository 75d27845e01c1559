pub mod types;

use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Response;
use thiserror::Error;
use url::Url;

use types::{HealthStatus, ProcessResult};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error (status {status}): {detail}")]
    ApiError { status: u16, detail: String },
    #[error("invalid backend URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("deserialization error: {0}")]
    Deserialize(String),
}

// ---------------------------------------------------------------------------
// Query encoding
// ---------------------------------------------------------------------------

/// Percent-encoding set for URL query values (encode everything except unreserved chars).
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode_query(s: &str) -> String {
    utf8_percent_encode(s, QUERY_ENCODE_SET).to_string()
}

// ---------------------------------------------------------------------------
// API client
// ---------------------------------------------------------------------------

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Client for the tracklist extraction backend.
pub struct TracktraceClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl TracktraceClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiClientError> {
        Url::parse(base_url).map_err(|source| ApiClientError::InvalidBaseUrl {
            url: base_url.to_owned(),
            source,
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the extraction URL for a media link.
    pub fn process_url(&self, link: &str) -> String {
        format!("{}/process?url={}", self.base_url, encode_query(link))
    }

    /// Ask the backend to extract the tracklist of `link`.
    ///
    /// `Ok(None)` means the request succeeded but carried no usable JSON
    /// object (empty body, `null`, or something that is not JSON).
    pub async fn process(&self, link: &str) -> Result<Option<ProcessResult>, ApiClientError> {
        let url = self.process_url(link);
        tracing::debug!(%url, "requesting tracklist");
        let resp = self.http_client.get(&url).send().await?;
        let body = Self::success_body(resp).await?;

        match serde_json::from_str::<Option<ProcessResult>>(&body) {
            Ok(result) => Ok(result),
            Err(e) => {
                tracing::debug!("unusable process payload: {e}");
                Ok(None)
            }
        }
    }

    /// Query the backend's health endpoint.
    pub async fn health(&self) -> Result<HealthStatus, ApiClientError> {
        let url = format!("{}/", self.base_url);
        let resp = self.http_client.get(&url).send().await?;
        let body = Self::success_body(resp).await?;
        serde_json::from_str(&body)
            .map_err(|e| ApiClientError::Deserialize(format!("{e}: {body}")))
    }

    /// Check status and read the body as text.
    async fn success_body(resp: Response) -> Result<String, ApiClientError> {
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiClientError::ApiError {
                status: status.as_u16(),
                detail: body,
            });
        }

        Ok(resp.text().await?)
    }
}
