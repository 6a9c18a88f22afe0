//! Display-safe feed source.

use url::Url;

/// Hostname of the feed URL, or `"unknown"`.
///
/// Feed URLs often carry secrets in their path or query, so only the host is
/// ever echoed back.
pub fn display_source(feed_url: &str) -> String {
    Url::parse(feed_url.trim())
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .filter(|host| !host.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
