//! LMS REST API surface
//!
//! This module provides the request gateway plus one accessor module
//! per backend resource group. Accessors are flat mappings from typed
//! parameters to a single HTTP call; everything non-trivial (auth
//! header, error classification, 401 logout) lives in [`http`] and
//! [`client`].
//!
//! # Module Structure
//!
//! - [`client`] - main client combining session store and gateway
//! - [`http`] - request descriptor and response classification
//! - [`error`] - error taxonomy shared by all calls
//! - [`auth`], [`courses`], [`lessons`], [`quizzes`], [`progress`],
//!   [`ai`], [`admin`], [`notifications`] - per-resource accessors
//!
//! # Example
//!
//! ```ignore
//! use lms_client::{ApiClient, Config, SessionStore};
//!
//! async fn example() -> lms_client::Result<()> {
//!     let client = ApiClient::new(&Config::load(), SessionStore::new())?;
//!     lms_client::api::auth::login(&client, "student", "secret").await?;
//!     let dashboard = lms_client::api::progress::dashboard(&client).await?;
//!     Ok(())
//! }
//! ```

pub mod admin;
pub mod ai;
pub mod auth;
pub mod client;
pub mod courses;
pub mod error;
pub mod http;
pub mod lessons;
pub mod notifications;
pub mod progress;
pub mod quizzes;
