//! Error taxonomy for API calls
//!
//! Every request resolves to either a parsed JSON value or one of the
//! variants below. Classification happens in the request gateway; no
//! retries are performed anywhere.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Classified outcome of a failed API call
#[derive(Debug, Error)]
pub enum Error {
    /// The backend rejected the session token (HTTP 401). The session
    /// store has been cleared by the time the caller sees this.
    #[error("unauthorized: session invalid or expired")]
    Unauthorized,

    /// Well-formed error response from the backend. `message` is the
    /// body's `error` field when present, otherwise status-derived.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response was not JSON. Carries a truncated snippet of the
    /// raw body for diagnosing misconfigured backends.
    #[error("unexpected non-JSON response ({status}): {snippet}")]
    Protocol { status: u16, snippet: String },

    /// Network-level failure before any response was received
    #[error("backend unreachable at {base_url}: {source}")]
    Connectivity {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The configured base address is not a usable URL
    #[error("invalid base URL {url:?}: {reason}")]
    BaseUrl { url: String, reason: String },

    /// Failed to construct the underlying HTTP client
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// Session or config file could not be read or written
    #[error("storage error: {0}")]
    Storage(String),
}

impl Error {
    /// HTTP status associated with this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Unauthorized => Some(401),
            Error::Api { status, .. } | Error::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Format an API error for display to end users
pub fn format_api_error(error: &Error) -> String {
    match error {
        Error::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
        Error::Api { status: 403, .. } => {
            "Permission denied. Your account is not allowed to do that.".to_string()
        }
        Error::Api { status: 404, .. } => "Resource not found.".to_string(),
        Error::Api { status: 429, .. } => "Too many requests. Please try again later.".to_string(),
        Error::Api { status, .. } if *status >= 500 => {
            "The server is temporarily unavailable. Please try again.".to_string()
        }
        Error::Api { message, .. } => message.clone(),
        Error::Protocol { .. } => {
            "The server returned an unexpected response. Check that the base URL points at the API."
                .to_string()
        }
        Error::Connectivity { base_url, .. } => {
            format!("Cannot reach the backend at {}. Is the server running?", base_url)
        }
        Error::BaseUrl { url, .. } => format!("Invalid base URL: {}", url),
        Error::Client(_) | Error::Storage(_) => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_known_statuses() {
        let err = Error::Api {
            status: 404,
            message: "Course not found".to_string(),
        };
        assert_eq!(format_api_error(&err), "Resource not found.");

        let err = Error::Api {
            status: 400,
            message: "Missing required fields".to_string(),
        };
        assert_eq!(format_api_error(&err), "Missing required fields");
    }

    #[test]
    fn test_format_server_errors() {
        let err = Error::Api {
            status: 503,
            message: "down".to_string(),
        };
        assert!(format_api_error(&err).contains("temporarily unavailable"));
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(Error::Unauthorized.status(), Some(401));
        assert_eq!(
            Error::Api {
                status: 418,
                message: String::new()
            }
            .status(),
            Some(418)
        );
        assert_eq!(Error::Storage("x".to_string()).status(), None);
    }
}
