//! API Client
//!
//! Main client for the LMS backend, combining the session store and the
//! HTTP gateway. This is the single centralized interceptor for the
//! 401 contract: an `Unauthorized` outcome clears the session store and
//! notifies subscribers before the error reaches the caller.

use serde_json::Value;

use super::error::{Error, Result};
use super::http::{ApiRequest, HttpGateway};
use crate::config::{normalize_base_url, Config};
use crate::session::SessionStore;

/// Main API client
#[derive(Clone)]
pub struct ApiClient {
    pub session: SessionStore,
    http: HttpGateway,
    base_url: String,
}

impl ApiClient {
    /// Create a new client from configuration
    pub fn new(config: &Config, session: SessionStore) -> Result<Self> {
        Ok(Self {
            session,
            http: HttpGateway::new()?,
            base_url: config.effective_base_url(),
        })
    }

    /// Create a client against an explicit base address
    pub fn with_base_url(base_url: &str, session: SessionStore) -> Result<Self> {
        Ok(Self {
            session,
            http: HttpGateway::new()?,
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// The resolved backend base address
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform one request. The stored token (if any) is attached; on a
    /// 401 the session is invalidated before the error propagates, so
    /// the caller never receives data from a rejected session.
    pub async fn request(&self, request: ApiRequest) -> Result<Value> {
        let token = self.session.token().await;

        match self.http.execute(&self.base_url, token.as_deref(), request).await {
            Err(Error::Unauthorized) => {
                if let Err(e) = self.session.invalidate().await {
                    tracing::warn!("failed to clear session after 401: {}", e);
                }
                Err(Error::Unauthorized)
            }
            other => other,
        }
    }

    /// Make a GET request to an API path
    pub async fn get(&self, path: &str) -> Result<Value> {
        self.request(ApiRequest::get(path)).await
    }

    /// Make a POST request to an API path
    pub async fn post(&self, path: &str, body: Option<Value>) -> Result<Value> {
        let mut request = ApiRequest::post(path);
        if let Some(body) = body {
            request = request.body(body);
        }
        self.request(request).await
    }

    /// Make a PUT request to an API path
    pub async fn put(&self, path: &str, body: Value) -> Result<Value> {
        self.request(ApiRequest::put(path).body(body)).await
    }

    /// Make a DELETE request to an API path
    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.request(ApiRequest::delete(path)).await
    }
}
