//! Administration endpoints
//!
//! All routes here require an admin (or instructor) role on the
//! backend; a student token gets a 403 `Api` error back.

use serde_json::{json, Value};

use super::client::ApiClient;
use super::error::Result;

// ---------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------

/// List all user accounts
pub async fn users(client: &ApiClient) -> Result<Value> {
    client.get("/admin/users").await
}

/// Update a user account (role, contact details, active flag)
pub async fn update_user(client: &ApiClient, user_id: i64, updates: Value) -> Result<Value> {
    client.put(&format!("/admin/users/{}", user_id), updates).await
}

/// Permanently delete a user account
pub async fn delete_user(client: &ApiClient, user_id: i64) -> Result<Value> {
    client.delete(&format!("/admin/users/{}", user_id)).await
}

/// Re-enable a deactivated account
pub async fn activate_user(client: &ApiClient, user_id: i64) -> Result<Value> {
    client
        .post(&format!("/admin/users/{}/activate", user_id), None)
        .await
}

/// Deactivate an account without deleting it
pub async fn deactivate_user(client: &ApiClient, user_id: i64) -> Result<Value> {
    client
        .post(&format!("/admin/users/{}/deactivate", user_id), None)
        .await
}

// ---------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------

/// Create a course
pub async fn create_course(client: &ApiClient, course: Value) -> Result<Value> {
    client.post("/admin/courses", Some(course)).await
}

/// Update a course
pub async fn update_course(client: &ApiClient, course_id: i64, updates: Value) -> Result<Value> {
    client
        .put(&format!("/admin/courses/{}", course_id), updates)
        .await
}

/// Delete (deactivate) a course
pub async fn delete_course(client: &ApiClient, course_id: i64) -> Result<Value> {
    client.delete(&format!("/admin/courses/{}", course_id)).await
}

/// List the lessons of a course, including unpublished ones
pub async fn course_lessons(client: &ApiClient, course_id: i64) -> Result<Value> {
    client
        .get(&format!("/admin/courses/{}/lessons", course_id))
        .await
}

/// List the enrollments of a course
pub async fn course_enrollments(client: &ApiClient, course_id: i64) -> Result<Value> {
    client
        .get(&format!("/admin/courses/{}/enrollments", course_id))
        .await
}

/// Enroll a specific user in a course
pub async fn enroll_user(client: &ApiClient, course_id: i64, user_id: i64) -> Result<Value> {
    client
        .post(
            &format!("/admin/courses/{}/enroll", course_id),
            Some(json!({ "user_id": user_id })),
        )
        .await
}

/// Remove a specific user from a course
pub async fn unenroll_user(client: &ApiClient, course_id: i64, user_id: i64) -> Result<Value> {
    client
        .post(
            &format!("/admin/courses/{}/unenroll", course_id),
            Some(json!({ "user_id": user_id })),
        )
        .await
}

// ---------------------------------------------------------------------
// Lessons
// ---------------------------------------------------------------------

/// Create a lesson
pub async fn create_lesson(client: &ApiClient, lesson: Value) -> Result<Value> {
    client.post("/admin/lessons", Some(lesson)).await
}

/// Update a lesson
pub async fn update_lesson(client: &ApiClient, lesson_id: i64, updates: Value) -> Result<Value> {
    client
        .put(&format!("/admin/lessons/{}", lesson_id), updates)
        .await
}

/// Delete a lesson
pub async fn delete_lesson(client: &ApiClient, lesson_id: i64) -> Result<Value> {
    client.delete(&format!("/admin/lessons/{}", lesson_id)).await
}

// ---------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------

/// Fetch platform-wide statistics (user counts, course counts, quiz
/// activity)
pub async fn statistics(client: &ApiClient) -> Result<Value> {
    client.get("/admin/statistics").await
}

/// Broadcast a notification. `target` is currently only `"all"`.
pub async fn send_notification(
    client: &ApiClient,
    title: &str,
    message: &str,
    target: &str,
) -> Result<Value> {
    client
        .post(
            "/admin/notifications/send",
            Some(json!({ "title": title, "message": message, "target": target })),
        )
        .await
}

/// Fetch the admin notification history
pub async fn sent_notifications(client: &ApiClient) -> Result<Value> {
    client.get("/admin/notifications").await
}
