//! Learning progress endpoints

use serde_json::Value;

use super::client::ApiClient;
use super::error::Result;

/// Fetch the aggregated dashboard for the current user (course count,
/// average progress, recent activity)
pub async fn dashboard(client: &ApiClient) -> Result<Value> {
    client.get("/progress/dashboard").await
}

/// Fetch per-lesson progress within one course
pub async fn course(client: &ApiClient, course_id: i64) -> Result<Value> {
    client.get(&format!("/progress/course/{}", course_id)).await
}

/// Fetch per-topic strength analytics, optionally scoped to one course
pub async fn analytics(client: &ApiClient, course_id: Option<i64>) -> Result<Value> {
    let path = match course_id {
        Some(course_id) => format!("/progress/analytics?course_id={}", course_id),
        None => "/progress/analytics".to_string(),
    };

    client.get(&path).await
}
