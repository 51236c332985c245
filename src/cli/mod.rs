//! # CLI Module
//!
//! Command implementations for the `spotrec` binary. Each command loads the
//! configuration, obtains a token through the session and renders the
//! results as tables or short status lines.
//!
//! ## Commands
//!
//! - [`login`], [`logout`], [`status`] - session lifecycle
//! - [`profile`] - current user and playlist count
//! - [`playlists`] - first page of the user's playlists
//! - [`top_artists`], [`artist`] - artist charts and lookups
//! - [`top_tracks`], [`track`] - track charts, metadata and audio features
//! - [`recommend`] - playlist-seeded recommendations, optionally saved as a
//!   new private playlist
//!
//! Errors that stop a command are reported through the crate's `error!`
//! macro, which exits the process. A session that can no longer be refreshed
//! has already been cleared by the time the command reports it.

mod artists;
mod auth;
mod playlist;
mod profile;
mod tracks;

pub use artists::artist;
pub use artists::top_artists;
pub use auth::login;
pub use auth::logout;
pub use auth::status;
pub use playlist::playlists;
pub use playlist::recommend;
pub use profile::profile;
pub use tracks::top_tracks;
pub use tracks::track;

use crate::{
    config::Config,
    error,
    error::SessionError,
    spotify::{SpotifyClient, auth::AppSession},
};

fn load_config() -> Config {
    match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration: {}", e),
    }
}

async fn client(config: &Config) -> SpotifyClient {
    let mut session = AppSession::from_config(config);
    match session.client(&config.api_url).await {
        Ok(client) => client,
        Err(SessionError::NotLoggedIn) => error!("Not logged in. Please run spotrec login"),
        Err(e) if e.requires_login() => {
            error!("Session expired: {}\nPlease run spotrec login", e)
        }
        Err(e) => error!("Failed to load session: {}", e),
    }
}
