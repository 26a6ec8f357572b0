//! AI tutoring endpoints
//!
//! Covers lesson recommendations, the tutoring chat, answer
//! explanations, and instructor-side question/lesson generation. The
//! generation review endpoints live here rather than in [`super::admin`]
//! because the backend serves them under the `/ai` prefix.

use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use super::client::ApiClient;
use super::error::Result;

/// Generate a fresh conversation id for grouping chat messages. The
/// backend accepts a client-supplied id and otherwise mints its own.
pub fn new_conversation_id() -> String {
    Uuid::new_v4().to_string()
}

/// One chat message to the AI tutor, optionally scoped to a lesson or
/// course for context
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

impl ChatMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            lesson_id: None,
            course_id: None,
            conversation_id: None,
        }
    }

    /// Continue an existing conversation
    pub fn in_conversation(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self
    }

    /// Attach lesson context
    pub fn for_lesson(mut self, lesson_id: i64) -> Self {
        self.lesson_id = Some(lesson_id);
        self
    }

    /// Attach course context
    pub fn for_course(mut self, course_id: i64) -> Self {
        self.course_id = Some(course_id);
        self
    }
}

/// Question-generation request (instructors only)
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerateQuestionsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<i64>,
    /// Capped to 10 by the backend
    pub num_questions: u32,
    /// 1 (easiest) to 5 (hardest)
    pub difficulty: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_content: Option<String>,
}

/// Fetch lesson recommendations, optionally scoped to a course and
/// optionally including the learning-pattern analytics block
pub async fn recommendations(
    client: &ApiClient,
    course_id: Option<i64>,
    include_analytics: bool,
) -> Result<Value> {
    let mut params = Vec::new();
    if let Some(course_id) = course_id {
        params.push(format!("course_id={}", course_id));
    }
    if include_analytics {
        params.push("include_analytics=true".to_string());
    }

    let path = if params.is_empty() {
        "/ai/recommendations".to_string()
    } else {
        format!("/ai/recommendations?{}", params.join("&"))
    };

    client.get(&path).await
}

/// Mark a recommendation as viewed
pub async fn mark_recommendation_viewed(client: &ApiClient, recommendation_id: i64) -> Result<Value> {
    client
        .post(&format!("/ai/{}/view", recommendation_id), None)
        .await
}

/// Send a message to the AI tutor
pub async fn chat(client: &ApiClient, message: &ChatMessage) -> Result<Value> {
    client.post("/ai/chat", Some(json!(message))).await
}

/// Fetch the message history of one conversation
pub async fn chat_history(client: &ApiClient, conversation_id: &str) -> Result<Value> {
    client
        .get(&format!(
            "/ai/chat/history/{}",
            urlencoding::encode(conversation_id)
        ))
        .await
}

/// List the current user's conversations, newest first
pub async fn conversations(client: &ApiClient) -> Result<Value> {
    client.get("/ai/chat/conversations").await
}

/// Rate an AI chat answer (1-5)
pub async fn rate_message(client: &ApiClient, message_id: i64, rating: u8) -> Result<Value> {
    client
        .post(
            &format!("/ai/chat/rate/{}", message_id),
            Some(json!({ "rating": rating })),
        )
        .await
}

/// Ask for an explanation of a quiz question the user got wrong
pub async fn explain(client: &ApiClient, question_id: i64, user_answer: &str) -> Result<Value> {
    client
        .post(
            "/ai/explain",
            Some(json!({ "question_id": question_id, "user_answer": user_answer })),
        )
        .await
}

/// Generate quiz questions from lesson content (instructors only)
pub async fn generate_questions(
    client: &ApiClient,
    request: &GenerateQuestionsRequest,
) -> Result<Value> {
    client
        .post("/ai/generate-questions", Some(json!(request)))
        .await
}

/// List generated questions awaiting review
pub async fn generated_questions(client: &ApiClient) -> Result<Value> {
    client.get("/ai/generated-questions").await
}

/// Fetch one generated question
pub async fn generated_question(client: &ApiClient, question_id: i64) -> Result<Value> {
    client
        .get(&format!("/ai/generated-questions/{}", question_id))
        .await
}

/// Approve a generated question into the quiz pool
pub async fn approve_generated_question(client: &ApiClient, question_id: i64) -> Result<Value> {
    client
        .post(&format!("/ai/generated-questions/{}/approve", question_id), None)
        .await
}

/// Reject a generated question
pub async fn reject_generated_question(client: &ApiClient, question_id: i64) -> Result<Value> {
    client
        .post(&format!("/ai/generated-questions/{}/reject", question_id), None)
        .await
}

/// Edit a generated question before approval
pub async fn update_generated_question(
    client: &ApiClient,
    question_id: i64,
    updates: Value,
) -> Result<Value> {
    client
        .put(&format!("/ai/generated-questions/{}", question_id), updates)
        .await
}

/// Poll the status of a generation request
pub async fn generation_status(client: &ApiClient, request_id: i64) -> Result<Value> {
    client
        .get(&format!("/ai/generation-status/{}", request_id))
        .await
}

/// Generate lesson content for a topic at the given level
pub async fn generate_lesson(client: &ApiClient, topic: &str, level: &str) -> Result<Value> {
    client
        .post(
            "/ai/generate-lesson",
            Some(json!({ "topic": topic, "level": level })),
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_serialization_omits_unset_fields() {
        let message = ChatMessage::new("What is ownership?");
        let value = json!(&message);
        assert_eq!(value["message"], "What is ownership?");
        assert!(value.get("lesson_id").is_none());
        assert!(value.get("conversation_id").is_none());

        let message = ChatMessage::new("More detail please")
            .in_conversation("conv-1")
            .for_lesson(4);
        let value = json!(&message);
        assert_eq!(value["conversation_id"], "conv-1");
        assert_eq!(value["lesson_id"], 4);
    }

    #[test]
    fn test_conversation_ids_are_unique() {
        assert_ne!(new_conversation_id(), new_conversation_id());
    }
}
