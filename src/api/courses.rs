//! Course catalog endpoints

use serde_json::Value;

use super::client::ApiClient;
use super::error::Result;

/// Course summary as returned by the catalog listing
#[derive(Debug, Clone)]
pub struct Course {
    pub course_id: i64,
    pub course_name: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub is_enrolled: bool,
    pub progress_percentage: f64,
}

impl From<&Value> for Course {
    fn from(value: &Value) -> Self {
        Self {
            course_id: value.get("course_id").and_then(Value::as_i64).unwrap_or(0),
            course_name: value
                .get("course_name")
                .and_then(Value::as_str)
                .unwrap_or("-")
                .to_string(),
            description: value
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
            thumbnail_url: value
                .get("thumbnail_url")
                .and_then(Value::as_str)
                .map(str::to_string),
            is_enrolled: value
                .get("is_enrolled")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            progress_percentage: value
                .get("progress_percentage")
                .and_then(Value::as_f64)
                .unwrap_or(0.0),
        }
    }
}

/// List active courses. With `enrolled_only` set, restricts the
/// listing to courses the current user is enrolled in.
pub async fn list(client: &ApiClient, enrolled_only: bool) -> Result<Vec<Course>> {
    let path = if enrolled_only {
        "/courses?enrolled_only=true"
    } else {
        "/courses"
    };

    let response = client.get(path).await?;

    let courses = response
        .as_array()
        .map(|arr| arr.iter().map(Course::from).collect())
        .unwrap_or_default();

    Ok(courses)
}

/// Fetch one course with its enrollment state
pub async fn get(client: &ApiClient, course_id: i64) -> Result<Value> {
    client.get(&format!("/courses/{}", course_id)).await
}

/// Enroll the current user in a course
pub async fn enroll(client: &ApiClient, course_id: i64) -> Result<Value> {
    client
        .post(&format!("/courses/{}/enroll", course_id), None)
        .await
}

/// List the lessons of a course
pub async fn lessons(client: &ApiClient, course_id: i64) -> Result<Value> {
    client.get(&format!("/courses/{}/lessons", course_id)).await
}
