//! API key authentication.
//!
//! Keys look like `prefix_random_expiry_signature`:
//! - `prefix` is a fixed, configured constant
//! - `random` is an opaque token without underscores
//! - `expiry` is the last valid day, `YYYY-MM-DD` (UTC)
//! - `signature` is the first 8 hex digits of
//!   `HMAC-SHA256(SHA-256(secret), "prefix_random_expiry")`

use chrono::NaiveDate;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Hex characters of the MAC kept in a key.
pub const SIGNATURE_HEX_LEN: usize = 8;

const EXPIRY_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing API key")]
    Missing,

    #[error("Malformed API key")]
    Malformed,

    #[error("API key has the wrong prefix")]
    WrongPrefix,

    #[error("API key has an invalid expiry date")]
    InvalidExpiry,

    #[error("API key expired on {0}")]
    Expired(NaiveDate),

    #[error("API key signature does not match")]
    BadSignature,
}

/// Signs and checks API keys for one secret.
#[derive(Clone)]
pub struct ApiKeyVerifier {
    prefix: String,
    mac: HmacSha256,
}

impl ApiKeyVerifier {
    pub fn new(secret: &str, prefix: impl Into<String>) -> Result<Self, hmac::digest::InvalidLength> {
        let key = Sha256::digest(secret.as_bytes());
        Ok(ApiKeyVerifier {
            prefix: prefix.into(),
            mac: HmacSha256::new_from_slice(&key)?,
        })
    }

    fn payload_mac(&self, random: &str, expiry: &str) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(format!("{}_{}_{}", self.prefix, random, expiry).as_bytes());
        mac
    }

    /// Build a key valid through `expiry`.
    pub fn issue(&self, random: &str, expiry: NaiveDate) -> String {
        let expiry = expiry.format(EXPIRY_FORMAT).to_string();
        let digest = hex::encode(self.payload_mac(random, &expiry).finalize().into_bytes());
        format!(
            "{}_{}_{}_{}",
            self.prefix,
            random,
            expiry,
            &digest[..SIGNATURE_HEX_LEN]
        )
    }

    /// Check `key` against `today`.
    pub fn verify(&self, key: &str, today: NaiveDate) -> Result<(), AuthError> {
        let parts: Vec<&str> = key.trim().split('_').collect();
        let [prefix, random, expiry, signature] = parts.as_slice() else {
            return Err(AuthError::Malformed);
        };
        if random.is_empty() || signature.len() != SIGNATURE_HEX_LEN {
            return Err(AuthError::Malformed);
        }
        if *prefix != self.prefix {
            return Err(AuthError::WrongPrefix);
        }

        let expiry_date =
            NaiveDate::parse_from_str(expiry, EXPIRY_FORMAT).map_err(|_| AuthError::InvalidExpiry)?;
        if expiry_date < today {
            return Err(AuthError::Expired(expiry_date));
        }

        let signature = hex::decode(signature).map_err(|_| AuthError::BadSignature)?;
        self.payload_mac(random, expiry)
            .verify_truncated_left(&signature)
            .map_err(|_| AuthError::BadSignature)
    }
}
