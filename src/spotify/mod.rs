//! # Spotify Integration Module
//!
//! Session handling and thin request wrappers over the Spotify Web API.
//!
//! ```text
//! CLI layer
//!     ↓
//! Session (auth)  ──── refresh backend (/refresh_token)
//!     ↓ access token
//! SpotifyClient (user, artists, tracks, playlist)
//!     ↓
//! Spotify Web API
//! ```
//!
//! ## Session
//!
//! [`auth::Session`] owns the token source. It reads the persisted token on
//! every access, refreshes it through the application backend once it has
//! expired and, when that fails, clears the store and sends the user back to
//! the origin. All failures are returned as [`crate::error::SessionError`].
//!
//! ## Request wrappers
//!
//! [`SpotifyClient`] carries one bearer token and exposes one method per
//! endpoint. The wrappers do not look at status codes: they hand back the raw
//! [`reqwest::Response`] and callers decide what a 4xx or 5xx means, usually
//! through [`decode`]. There are no retries, no rate-limit handling and no
//! pagination beyond the first page.
//!
//! Two wrappers are small workflows:
//! - [`SpotifyClient::get_recommendations`] samples a page of a playlist,
//!   shuffles it and asks for recommendations seeded with up to five tracks;
//! - [`SpotifyClient::add_playlist`] creates a private "Suggestions based on"
//!   playlist and fills it, with no rollback if the last step fails.
//!
//! ## API Coverage
//!
//! - `GET /me`, `GET /me/playlists`
//! - `GET /me/top/artists`, `GET /me/top/tracks`
//! - `GET /artists/{id}`, `GET /tracks/{id}`, `GET /audio-features/{id}`
//! - `GET /playlists/{id}/tracks`, `GET /recommendations`
//! - `POST /users/{user_id}/playlists`, `POST /playlists/{id}/tracks`

pub mod artists;
pub mod auth;
pub mod playlist;
pub mod tracks;
pub mod user;

use reqwest::{
    Client, RequestBuilder, Response,
    header::{CONTENT_TYPE, HeaderValue},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Bearer-authenticated handle on the Spotify Web API.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token: String,
}

impl SpotifyClient {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into(),
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{uri}/{path}",
            uri = self.api_url.trim_end_matches('/'),
            path = path.trim_start_matches('/')
        )
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .bearer_auth(&self.token)
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        let url = self.endpoint(path);
        tracing::debug!(%url, "GET");
        self.authorized(self.http.get(url))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        let url = self.endpoint(path);
        tracing::debug!(%url, "POST");
        self.authorized(self.http.post(url))
    }
}

/// Rejects non-2xx responses and deserializes the body.
pub async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    Ok(response.error_for_status()?.json::<T>().await?)
}
