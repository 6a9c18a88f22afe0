//! Remote feed fetching.

use std::time::Duration;

use calfeed_core::agenda::display_source;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Errors from resolving or fetching a feed.
///
/// Messages only ever name the feed's host: the path and query of a private
/// calendar URL are effectively a password.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Invalid feed URL")]
    InvalidUrl,

    #[error("Unsupported feed URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Could not reach calendar feed at {host}: {source}")]
    Unreachable {
        host: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Calendar feed at {host} returned HTTP {status}")]
    Status { host: String, status: u16 },

    #[error("Could not read calendar feed from {host}: {source}")]
    Body {
        host: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Calendar feed at {host} exceeds {limit} bytes")]
    TooLarge { host: String, limit: u64 },
}

impl FeedError {
    /// Whether the caller sent a bad URL, as opposed to the feed failing.
    pub fn is_client_error(&self) -> bool {
        matches!(self, FeedError::InvalidUrl | FeedError::UnsupportedScheme(_))
    }
}

/// Parse a caller-supplied feed URL. `webcal://` is rewritten to `https://`.
pub fn normalize_feed_url(raw: &str) -> Result<Url, FeedError> {
    let raw = raw.trim();
    let rewritten = match raw.get(..9) {
        Some(scheme) if scheme.eq_ignore_ascii_case("webcal://") => format!("https://{}", &raw[9..]),
        _ => raw.to_string(),
    };

    let url = Url::parse(&rewritten).map_err(|_| FeedError::InvalidUrl)?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        "http" | "https" => Err(FeedError::InvalidUrl),
        other => Err(FeedError::UnsupportedScheme(other.to_string())),
    }
}

/// HTTP client for ICS feeds.
#[derive(Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    max_bytes: u64,
}

impl FeedClient {
    pub fn new(timeout: Duration, user_agent: &str, max_bytes: u64) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(FeedClient { http, max_bytes })
    }

    /// Download the feed body as text, reading at most `max_bytes`.
    pub async fn fetch(&self, url: &Url) -> Result<String, FeedError> {
        let host = display_source(url.as_str());

        let mut resp = self
            .http
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "text/calendar, text/plain;q=0.9, */*;q=0.5")
            .send()
            .await
            .map_err(|e| FeedError::Unreachable {
                host: host.clone(),
                source: e.without_url(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                host,
                status: status.as_u16(),
            });
        }

        let too_large = |host: String| FeedError::TooLarge {
            host,
            limit: self.max_bytes,
        };
        if resp.content_length().is_some_and(|len| len > self.max_bytes) {
            return Err(too_large(host));
        }

        let mut body = Vec::new();
        while let Some(chunk) = resp.chunk().await.map_err(|e| FeedError::Body {
            host: host.clone(),
            source: e.without_url(),
        })? {
            if (body.len() + chunk.len()) as u64 > self.max_bytes {
                return Err(too_large(host));
            }
            body.extend_from_slice(&chunk);
        }
        debug!(%host, bytes = body.len(), "fetched calendar feed");

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
