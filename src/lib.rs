//! Async client library for the LMS learning platform REST API.
//!
//! The crate is organized around three pieces:
//!
//! - [`config`] - base-address resolution and persistent client settings
//! - [`session`] - explicit session store holding the bearer token and
//!   the cached user record, with invalidation events
//! - [`api`] - the request gateway, error taxonomy, and per-resource
//!   accessor functions (auth, courses, lessons, quizzes, progress, AI,
//!   admin, notifications)
//!
//! # Example
//!
//! ```ignore
//! use lms_client::{ApiClient, Config, SessionStore};
//!
//! async fn example() -> lms_client::Result<()> {
//!     let client = ApiClient::new(&Config::load(), SessionStore::new())?;
//!     lms_client::api::auth::login(&client, "student", "secret").await?;
//!     let courses = lms_client::api::courses::list(&client, false).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod session;

/// Version injected at compile time via LMS_CLIENT_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("LMS_CLIENT_VERSION") {
    Some(v) => v,
    None => "dev",
};

pub use api::client::ApiClient;
pub use api::error::{format_api_error, Error, Result};
pub use api::http::ApiRequest;
pub use config::Config;
pub use session::{SessionState, SessionStore};
