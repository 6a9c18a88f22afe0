use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use tracing::warn;

use crate::auth::{ApiKeyVerifier, AuthError};
use crate::config::ServerConfig;
use crate::feed::FeedClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub feed: FeedClient,
    // None when no secret is configured
    verifier: Option<Arc<ApiKeyVerifier>>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let feed = FeedClient::new(config.fetch_timeout(), &config.user_agent, config.max_feed_bytes)
            .context("Failed to build HTTP client")?;

        let verifier = match config.api_secret() {
            Some(secret) => Some(Arc::new(
                ApiKeyVerifier::new(secret, config.api_key_prefix.clone())
                    .map_err(|e| anyhow!("Invalid API secret: {e}"))?,
            )),
            None => {
                warn!("no api_secret configured, API key authentication is disabled");
                None
            }
        };

        Ok(AppState { feed, verifier })
    }

    /// Check a caller's API key against today's date.
    pub fn authorize(&self, key: Option<&str>) -> Result<(), AuthError> {
        let Some(verifier) = &self.verifier else {
            return Ok(());
        };
        let key = key.filter(|k| !k.trim().is_empty()).ok_or(AuthError::Missing)?;
        verifier.verify(key, Utc::now().date_naive())
    }
}
