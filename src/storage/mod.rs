//! Persistent key/value storage for the session tokens.
//!
//! The token record lives in four independent string entries, the same way a
//! browser keeps it in `localStorage`. Writes are not transactional: a crash
//! between two `set_item` calls can leave the entries inconsistent, and the
//! readers below tolerate that.

mod file;
mod memory;

use async_trait::async_trait;

use crate::error::StoreError;

pub use file::FileStore;
pub use memory::MemoryStore;

pub const ACCESS_TOKEN_KEY: &str = "spotify_access_token";
pub const REFRESH_TOKEN_KEY: &str = "spotify_refresh_token";
pub const EXPIRE_TIME_KEY: &str = "spotify_token_expire_time";
pub const TIMESTAMP_KEY: &str = "spotify_token_timestamp";

pub const TOKEN_KEYS: [&str; 4] = [
    ACCESS_TOKEN_KEY,
    REFRESH_TOKEN_KEY,
    EXPIRE_TIME_KEY,
    TIMESTAMP_KEY,
];

/// Value left behind by a browser client that stored a missing field.
pub const UNDEFINED: &str = "undefined";

/// A string key/value store that survives restarts.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing a key that is not present is not an error.
    async fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

/// The four token entries exactly as found in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredTokens {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expire_time: Option<String>,
    pub timestamp: Option<String>,
}

/// Typed view of a complete token record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub access_token: String,
    pub refresh_token: String,
    pub expire_time_seconds: u64,
    pub issued_at_epoch_ms: i64,
}

impl StoredTokens {
    pub async fn load<S: TokenStore + ?Sized>(store: &S) -> Result<Self, StoreError> {
        Ok(Self {
            access_token: non_empty(store.get_item(ACCESS_TOKEN_KEY).await?),
            refresh_token: non_empty(store.get_item(REFRESH_TOKEN_KEY).await?),
            expire_time: non_empty(store.get_item(EXPIRE_TIME_KEY).await?),
            timestamp: non_empty(store.get_item(TIMESTAMP_KEY).await?),
        })
    }

    /// The stored access token, unless it is missing or the `undefined` marker.
    pub fn usable_access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| *t != UNDEFINED)
    }

    pub fn usable_refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref().filter(|t| *t != UNDEFINED)
    }

    pub fn is_access_token_undefined(&self) -> bool {
        self.access_token.as_deref() == Some(UNDEFINED)
    }

    /// Whether the stored token outlived its lifetime at `now_ms`.
    ///
    /// Without an access token or a timestamp nothing can have expired. A
    /// missing lifetime counts as zero seconds; unparsable numbers never
    /// expire.
    pub fn has_expired_at(&self, now_ms: i64) -> bool {
        let (Some(_), Some(timestamp)) = (&self.access_token, &self.timestamp) else {
            return false;
        };
        let Ok(issued_at) = timestamp.trim().parse::<f64>() else {
            return false;
        };
        let expire_time = match self.expire_time.as_deref() {
            None => 0.0,
            Some(value) => match value.trim().parse::<f64>() {
                Ok(seconds) => seconds,
                Err(_) => return false,
            },
        };

        (now_ms as f64 - issued_at) / 1000.0 > expire_time
    }

    /// Returns the typed record when all four entries are present and valid.
    pub fn record(&self) -> Option<TokenRecord> {
        Some(TokenRecord {
            access_token: self.usable_access_token()?.to_string(),
            refresh_token: self.usable_refresh_token()?.to_string(),
            expire_time_seconds: self.expire_time.as_deref()?.trim().parse().ok()?,
            issued_at_epoch_ms: self.timestamp.as_deref()?.trim().parse().ok()?,
        })
    }
}

impl TokenRecord {
    /// Epoch milliseconds at which the access token stops being valid.
    /// Saturates at `i64::MAX` for lifetimes too large to represent.
    pub fn expires_at_epoch_ms(&self) -> i64 {
        i64::try_from(self.expire_time_seconds)
            .ok()
            .and_then(|seconds| seconds.checked_mul(1000))
            .map_or(i64::MAX, |ms| self.issued_at_epoch_ms.saturating_add(ms))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
