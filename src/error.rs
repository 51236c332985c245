//! Error types for the session, storage, configuration and API layers.

use thiserror::Error;

/// Failures reading or writing the persistent token store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file is not a valid key/value object: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is not a valid url: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("SERVER_ADDRESS is not a valid socket address: {0}")]
    InvalidAddress(#[from] std::net::AddrParseError),
    #[error("failed to load environment file: {0}")]
    Env(String),
}

/// Everything that can go wrong while obtaining or refreshing a token.
///
/// Every refresh failure has already cleared the stored tokens and redirected
/// to the origin by the time the caller sees it.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no refresh token available")]
    MissingRefreshToken,
    #[error("refresh request failed: {0}")]
    RefreshRequestFailed(#[from] reqwest::Error),
    #[error("refresh response did not contain an access token")]
    RefreshResponseMalformed,
    #[error("not logged in")]
    NotLoggedIn,
    #[error("session was invalidated by a failed refresh")]
    Invalidated,
    #[error("login was not completed in time")]
    LoginTimedOut,
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SessionError {
    /// True when the user has to sign in again, false for configuration or
    /// storage problems that a new login would not fix.
    pub fn requires_login(&self) -> bool {
        !matches!(self, SessionError::Storage(_) | SessionError::Config(_))
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("spotify request failed: {0}")]
    Request(#[from] reqwest::Error),
}
