//! Spotify session and recommendation CLI library
//!
//! This library keeps a Spotify session alive through an application backend
//! that performs the OAuth exchange, persists the tokens between runs and
//! wraps the handful of Web API endpoints the command line needs: profile,
//! playlists, top artists and tracks, track details and playlist-seeded
//! recommendations.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local login callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Typed errors for session, storage, config and API calls
//! - `server` - Local HTTP server receiving the login redirect
//! - `spotify` - Session handling and Spotify Web API wrappers
//! - `storage` - Persistent key/value token storage
//! - `types` - Data structures and type definitions
//! - `utils` - Seed sampling, formatting and progress helpers
//!
//! # Example
//!
//! ```
//! use spotrec::{config::{self, Config}, spotify::auth::AppSession};
//!
//! #[tokio::main]
//! async fn main() -> spotrec::Res<()> {
//!     config::load_env().await?;
//!     let config = Config::from_env()?;
//!     let mut session = AppSession::from_config(&config);
//!     let client = session.client(&config.api_url).await?;
//!     let profile = client.get_current_user_profile().await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod server;
pub mod spotify;
pub mod storage;
pub mod types;
pub mod utils;

/// A convenient Result type alias for the command-line layer.
///
/// Library functions return the typed errors from [`error`]; all of them
/// convert into this boxed error so commands can mix them with `?`.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Opening the login page...");
/// info!("Found {} playlists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Logged in");
/// success!("Added {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the command-line layer uses this; library code returns errors.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues the user should notice, such as a session
/// that has just been cleared.
///
/// # Example
///
/// ```
/// warning!("Failed to open browser");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
