//! # API Module
//!
//! HTTP endpoints of the local login callback server.
//!
//! - [`callback`] - Receives the backend's redirect after a successful OAuth
//!   exchange. The query carries `access_token`, `refresh_token` and
//!   `expires_in`, or `error` when the exchange failed.
//! - [`health`] - Returns status and version for probes.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spotrec::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
