//! Configuration management for spotrec.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. The refresh backend location can also be
//! baked into the binary at build time.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Build-time value of `SPOTREC_BACKEND_URI`
//! 4. Application defaults (where applicable)

use std::{env, io::ErrorKind, net::SocketAddr, path::PathBuf};

use url::Url;

use crate::{error::ConfigError, storage::FileStore};

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";

const BUILD_BACKEND_URI: Option<&str> = option_env!("SPOTREC_BACKEND_URI");

/// Loads environment variables from `<data_local_dir>/spotrec/.env`.
///
/// Creates the directory if needed. A missing `.env` file is fine; variables
/// may come from the process environment alone.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotrec/.env`
/// - macOS: `~/Library/Application Support/spotrec/.env`
/// - Windows: `%LOCALAPPDATA%/spotrec/.env`
pub async fn load_env() -> Result<(), ConfigError> {
    let mut path = data_dir();
    path.push(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| ConfigError::Env(e.to_string()))?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(dotenv::Error::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ConfigError::Env(e.to_string())),
    }
}

/// `<data_local_dir>/spotrec`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotrec");
    path
}

/// Base URL of the Spotify Web API, `SPOTIFY_API_URL` or the public v1 API.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_SPOTIFY_API_URL.to_string())
}

/// Base URL of the backend that performs the OAuth exchange and owns the
/// `/refresh_token` route.
pub fn backend_uri() -> Result<String, ConfigError> {
    env::var("SPOTREC_BACKEND_URI")
        .ok()
        .or_else(|| BUILD_BACKEND_URI.map(str::to_string))
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing("SPOTREC_BACKEND_URI"))
}

/// Address of the local login callback server.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub backend_uri: String,
    pub server_addr: SocketAddr,
    /// Where the user is sent after logout.
    pub origin: Url,
    pub storage_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend_uri = backend_uri()?;
        Url::parse(&backend_uri).map_err(|source| ConfigError::InvalidUrl {
            name: "SPOTREC_BACKEND_URI",
            source,
        })?;

        let api_url = spotify_apiurl();
        Url::parse(&api_url).map_err(|source| ConfigError::InvalidUrl {
            name: "SPOTIFY_API_URL",
            source,
        })?;

        let server_addr: SocketAddr = server_addr().parse()?;
        let origin = origin_for(server_addr)?;

        Ok(Self {
            api_url,
            backend_uri,
            server_addr,
            origin,
            storage_path: FileStore::default_path(),
        })
    }

    /// `{backend}/refresh_token`
    pub fn refresh_url(&self) -> String {
        format!("{}/refresh_token", self.backend_uri.trim_end_matches('/'))
    }

    /// `{backend}/login`, opened in the browser to start the OAuth handoff.
    pub fn login_url(&self) -> String {
        format!("{}/login", self.backend_uri.trim_end_matches('/'))
    }
}

pub fn origin_for(addr: SocketAddr) -> Result<Url, ConfigError> {
    Url::parse(&format!("http://{addr}/")).map_err(|source| ConfigError::InvalidUrl {
        name: "SERVER_ADDRESS",
        source,
    })
}
