//! API token generation.

use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const TOKEN_BYTES: usize = 32;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token lifetime must be at least one day, got {0}")]
    InvalidLifetime(i64),
    #[error("token lifetime of {0} days is out of range")]
    LifetimeOverflow(i64),
    #[error("failed to read random bytes: {0}")]
    Random(#[from] rand::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiToken {
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ApiToken {
    /// Generates a fresh token valid for `expiration_days` from now.
    pub fn generate(expiration_days: i64) -> Result<Self, TokenError> {
        Self::generate_at(Utc::now(), expiration_days)
    }

    pub fn generate_at(now: DateTime<Utc>, expiration_days: i64) -> Result<Self, TokenError> {
        if expiration_days < 1 { return Err(TokenError::InvalidLifetime(expiration_days)); }
        let lifetime = Duration::try_days(expiration_days).ok_or(TokenError::LifetimeOverflow(expiration_days))?;
        let expires_at = now.checked_add_signed(lifetime).ok_or(TokenError::LifetimeOverflow(expiration_days))?;
        let mut raw = [0u8; TOKEN_BYTES];
        rand::rngs::OsRng.try_fill_bytes(&mut raw)?;
        let value = base64::engine::general_purpose::URL_SAFE.encode(raw);
        Ok(Self { value, created_at: now, expires_at })
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool { now < self.expires_at }

    /// First eight characters followed by an ellipsis, for listings.
    pub fn masked(&self) -> String {
        let prefix: String = self.value.chars().take(8).collect();
        format!("{prefix}...")
    }
}
