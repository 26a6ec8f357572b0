//! Authentication and account endpoints
//!
//! Login stores the returned token and user record in the session
//! store; logout clears both together. Everything else is a plain
//! pass-through.

use serde::Serialize;
use serde_json::{json, Value};

use super::client::ApiClient;
use super::error::Result;

/// Registration payload. All fields are required by the backend.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Profile update payload; only set fields are sent
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_goal: Option<String>,
}

/// Register a new account. On success the returned token is stored so
/// the new user is signed in immediately.
pub async fn register(client: &ApiClient, request: &RegisterRequest) -> Result<Value> {
    let data = client.post("/auth/register", Some(json!(request))).await?;
    store_session_from(client, &data).await?;
    Ok(data)
}

/// Sign in with username and password, storing the session token and
/// user record on success
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<Value> {
    let data = client
        .post(
            "/auth/login",
            Some(json!({ "username": username, "password": password })),
        )
        .await?;
    store_session_from(client, &data).await?;
    Ok(data)
}

/// Sign out. Purely client-side: clears the token and user record.
pub async fn logout(client: &ApiClient) -> Result<()> {
    client.session.clear().await
}

/// Fetch the authenticated user's profile
pub async fn profile(client: &ApiClient) -> Result<Value> {
    client.get("/auth/profile").await
}

/// Update the authenticated user's profile and refresh the cached user
/// record
pub async fn update_profile(client: &ApiClient, updates: &ProfileUpdate) -> Result<Value> {
    let data = client.put("/auth/profile", json!(updates)).await?;

    if let Some(user) = data.get("user") {
        client.session.store_user(user.clone()).await?;
    }

    Ok(data)
}

/// Change the current password
pub async fn change_password(
    client: &ApiClient,
    old_password: &str,
    new_password: &str,
) -> Result<Value> {
    client
        .post(
            "/auth/change-password",
            Some(json!({ "old_password": old_password, "new_password": new_password })),
        )
        .await
}

/// Request a password-reset token for the given email
pub async fn forgot_password(client: &ApiClient, email: &str) -> Result<Value> {
    client
        .post("/auth/forgot-password", Some(json!({ "email": email })))
        .await
}

/// Complete a password reset with the token from the reset email
pub async fn reset_password(client: &ApiClient, token: &str, new_password: &str) -> Result<Value> {
    client
        .post(
            "/auth/reset-password",
            Some(json!({ "token": token, "new_password": new_password })),
        )
        .await
}

/// Pick the token out of an auth response and store it together with
/// the user record. Newer backends return `access_token`; some older
/// deployments used `token`.
async fn store_session_from(client: &ApiClient, data: &Value) -> Result<()> {
    let token = data
        .get("access_token")
        .or_else(|| data.get("token"))
        .and_then(Value::as_str);

    if let Some(token) = token {
        client
            .session
            .store_login(token, data.get("user").cloned())
            .await?;
    }

    Ok(())
}
