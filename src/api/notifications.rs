//! User notification endpoints

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::client::ApiClient;
use super::error::Result;

/// A notification addressed to the current user
#[derive(Debug, Clone)]
pub struct Notification {
    pub notification_id: i64,
    pub title: String,
    pub message: String,
    pub notification_type: String,
    pub is_read: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&Value> for Notification {
    fn from(value: &Value) -> Self {
        Self {
            notification_id: value
                .get("notification_id")
                .and_then(Value::as_i64)
                .unwrap_or(0),
            title: value
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or("-")
                .to_string(),
            message: value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
            notification_type: value
                .get("notification_type")
                .and_then(Value::as_str)
                .unwrap_or("general")
                .to_string(),
            is_read: value.get("is_read").and_then(Value::as_bool).unwrap_or(false),
            created_at: value
                .get("created_at")
                .and_then(Value::as_str)
                .and_then(parse_timestamp),
        }
    }
}

/// Parse the backend's ISO-8601 timestamps, which may or may not carry
/// a timezone offset (naive values are taken as UTC)
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// List the current user's notifications, newest first. With
/// `unread_only` set, only unread ones are returned.
pub async fn list(client: &ApiClient, unread_only: bool) -> Result<Vec<Notification>> {
    let path = if unread_only {
        "/notifications/?unread=true"
    } else {
        "/notifications/"
    };

    let response = client.get(path).await?;

    let notifications = response
        .as_array()
        .map(|arr| arr.iter().map(Notification::from).collect())
        .unwrap_or_default();

    Ok(notifications)
}

/// Mark one notification as read
pub async fn mark_read(client: &ApiClient, notification_id: i64) -> Result<Value> {
    client
        .post(&format!("/notifications/{}/read", notification_id), None)
        .await
}
