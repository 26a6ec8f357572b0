//! Session Management
//!
//! Explicit session store replacing the process-wide token storage of
//! earlier clients. The store holds the bearer token and the cached
//! user record, both cleared together on logout or invalidation, and
//! broadcasts lifecycle changes over a watch channel so presentation
//! code can react (e.g. redirect to the sign-in screen) without the
//! data layer performing navigation itself.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};

use crate::api::error::{Error, Result};

/// Stored session entries. `user` mirrors the auxiliary user-data entry
/// kept alongside the token; the two always live and die together.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct SessionData {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<Value>,
}

/// Observable session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No token stored
    #[default]
    Anonymous,
    /// A token is stored and presumed valid
    Authenticated,
    /// The backend rejected the token; storage has been cleared
    Invalidated,
}

/// Shared session store. Cloning shares the underlying state.
#[derive(Clone)]
pub struct SessionStore {
    data: Arc<RwLock<SessionData>>,
    state_tx: Arc<watch::Sender<SessionState>>,
    path: Option<PathBuf>,
}

impl SessionStore {
    /// Create an in-memory store (nothing written to disk)
    pub fn new() -> Self {
        Self::with_data(SessionData::default(), None)
    }

    /// Create a store persisted to the default session file, loading
    /// any previously saved session
    pub fn persistent() -> Self {
        let path = Self::session_path();
        let data = path.as_deref().map(load_session).unwrap_or_default();
        Self::with_data(data, path)
    }

    /// Create a store persisted to an explicit file path
    pub fn persistent_at(path: PathBuf) -> Self {
        let data = load_session(&path);
        Self::with_data(data, Some(path))
    }

    fn with_data(data: SessionData, path: Option<PathBuf>) -> Self {
        let initial = if data.token.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        };
        let (state_tx, _) = watch::channel(initial);

        Self {
            data: Arc::new(RwLock::new(data)),
            state_tx: Arc::new(state_tx),
            path,
        }
    }

    /// Get the default session file path
    fn session_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lms-client").join("session.json"))
    }

    /// Read the stored token, if any
    pub async fn token(&self) -> Option<String> {
        self.data.read().await.token.clone()
    }

    /// Read the cached user record, if any
    pub async fn user(&self) -> Option<Value> {
        self.data.read().await.user.clone()
    }

    /// Whether a token is currently stored
    pub async fn is_authenticated(&self) -> bool {
        self.data.read().await.token.is_some()
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        *self.state_tx.borrow()
    }

    /// Subscribe to lifecycle changes. Receivers see the current state
    /// immediately and every transition afterwards.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// Store the token and user record from a successful login
    pub async fn store_login(&self, token: &str, user: Option<Value>) -> Result<()> {
        {
            let mut data = self.data.write().await;
            data.token = Some(token.to_string());
            data.user = user;
            self.persist(&data)?;
        }
        self.state_tx.send_replace(SessionState::Authenticated);
        Ok(())
    }

    /// Replace the cached user record (e.g. after a profile update)
    pub async fn store_user(&self, user: Value) -> Result<()> {
        let mut data = self.data.write().await;
        data.user = Some(user);
        self.persist(&data)
    }

    /// Clear the session on explicit logout
    pub async fn clear(&self) -> Result<()> {
        self.wipe(SessionState::Anonymous).await
    }

    /// Clear the session because the backend rejected the token.
    /// Subscribers observe the `Invalidated` state.
    pub async fn invalidate(&self) -> Result<()> {
        tracing::warn!("session invalidated, clearing stored credentials");
        self.wipe(SessionState::Invalidated).await
    }

    async fn wipe(&self, next: SessionState) -> Result<()> {
        {
            let mut data = self.data.write().await;
            data.token = None;
            data.user = None;
            self.remove_file()?;
        }
        self.state_tx.send_replace(next);
        Ok(())
    }

    fn persist(&self, data: &SessionData) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::Storage(e.to_string()))?;
        }

        let content =
            serde_json::to_string_pretty(data).map_err(|e| Error::Storage(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| Error::Storage(e.to_string()))?;

        Ok(())
    }

    fn remove_file(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Storage(e.to_string())),
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn load_session(path: &std::path::Path) -> SessionData {
    if !path.exists() {
        return SessionData::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => SessionData::default(),
    }
}

/// Strip a single leading case-insensitive `Bearer ` prefix from a
/// stored token. Some deployments persisted the token including the
/// prefix; re-adding it blindly produced a `Bearer Bearer <t>` header.
pub fn strip_bearer_prefix(token: &str) -> &str {
    let trimmed = token.trim_start();

    if let Some(prefix) = trimmed.get(..6) {
        if prefix.eq_ignore_ascii_case("bearer") {
            let rest = &trimmed[6..];
            if rest.chars().next().is_some_and(char::is_whitespace) {
                return rest.trim_start();
            }
        }
    }

    trimmed
}
