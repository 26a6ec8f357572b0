//! HTTP utilities for the LMS REST API
//!
//! One round trip per call: attach the bearer token, send, classify the
//! response. All callers go through [`HttpGateway::execute`] so the
//! success/error contract lives in exactly one place.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

use crate::api::error::{Error, Result};
use crate::session::strip_bearer_prefix;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging and error snippets.
/// Strips non-printable characters and truncates long bodies.
fn sanitize_snippet(body: &str) -> String {
    let cleaned: String = body
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .collect();

    if cleaned.len() > MAX_LOG_BODY_LENGTH {
        format!(
            "{}... [truncated, {} bytes total]",
            &cleaned[..MAX_LOG_BODY_LENGTH],
            body.len()
        )
    } else {
        cleaned
    }
}

/// One HTTP call: path under the base address, method, optional JSON
/// body, optional extra headers.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub path: String,
    pub method: Method,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach an extra header, overriding any default of the same name
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// HTTP client wrapper performing the round trip and classification
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
}

impl HttpGateway {
    /// Create a new gateway with a shared connection pool
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent("lms-client/0.3").build()?;

        Ok(Self { client })
    }

    /// Perform one request against `base_url` and classify the outcome.
    ///
    /// Classification, in order:
    /// - network-level send failure -> [`Error::Connectivity`]
    /// - status 401 -> [`Error::Unauthorized`] (pure; the caller owns
    ///   the session side effects)
    /// - non-JSON response body -> [`Error::Protocol`]
    /// - other non-2xx -> [`Error::Api`] with the body's `error` field
    ///   when present, otherwise a status-derived message
    /// - success -> parsed JSON, `Value::Null` for an empty body
    pub async fn execute(
        &self,
        base_url: &str,
        token: Option<&str>,
        request: ApiRequest,
    ) -> Result<Value> {
        let url = format!("{}{}", base_url, request.path);
        tracing::debug!("{} {}", request.method, url);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            builder = builder.bearer_auth(strip_bearer_prefix(token));
        }

        if !request.headers.is_empty() {
            builder = builder.headers(request.headers.clone());
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|source| {
            tracing::error!("request to {} failed: {}", url, source);
            Error::Connectivity {
                base_url: base_url.to_string(),
                source,
            }
        })?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("{} {} rejected with 401", request.method, url);
            return Err(Error::Unauthorized);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response.text().await.map_err(|source| Error::Connectivity {
            base_url: base_url.to_string(),
            source,
        })?;

        if !body.is_empty() && !content_type.starts_with("application/json") {
            tracing::error!(
                "non-JSON response: {} {} - {}",
                status,
                content_type,
                sanitize_snippet(&body)
            );
            return Err(Error::Protocol {
                status: status.as_u16(),
                snippet: sanitize_snippet(&body),
            });
        }

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_snippet(&body));

            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| format!("request failed with status {}", status));

            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        // Handle empty response
        if body.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|_| Error::Protocol {
            status: status.as_u16(),
            snippet: sanitize_snippet(&body),
        })
    }
}
