//! Lesson endpoints

use serde_json::Value;

use super::client::ApiClient;
use super::error::Result;

/// Fetch one lesson with its content and completion state
pub async fn get(client: &ApiClient, lesson_id: i64) -> Result<Value> {
    client.get(&format!("/lessons/{}", lesson_id)).await
}

/// List the lessons of a course, ordered by lesson_order
pub async fn for_course(client: &ApiClient, course_id: i64) -> Result<Value> {
    client.get(&format!("/lessons/course/{}", course_id)).await
}

/// Mark a lesson complete for the current user. The backend recomputes
/// course progress from this.
pub async fn complete(client: &ApiClient, lesson_id: i64) -> Result<Value> {
    client
        .post(&format!("/lessons/{}/complete", lesson_id), None)
        .await
}
