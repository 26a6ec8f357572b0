//! Quiz endpoints

use serde_json::{json, Map, Value};

use super::client::ApiClient;
use super::error::Result;

/// Optional filters for the quiz listing
#[derive(Debug, Clone, Copy, Default)]
pub struct QuizFilter {
    pub course_id: Option<i64>,
    pub topic_id: Option<i64>,
}

impl QuizFilter {
    fn to_query(self) -> String {
        let mut params = Vec::new();
        if let Some(course_id) = self.course_id {
            params.push(format!("course_id={}", course_id));
        }
        if let Some(topic_id) = self.topic_id {
            params.push(format!("topic_id={}", topic_id));
        }

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

/// List quizzes, optionally filtered by course and/or topic
pub async fn list(client: &ApiClient, filter: QuizFilter) -> Result<Value> {
    client.get(&format!("/quizzes{}", filter.to_query())).await
}

/// Fetch one quiz with its questions
pub async fn get(client: &ApiClient, quiz_id: i64) -> Result<Value> {
    client.get(&format!("/quizzes/{}", quiz_id)).await
}

/// Submit quiz answers. `answers` maps question id to the selected
/// answer; `time_taken_minutes` is reported as-is for analytics.
pub async fn submit(
    client: &ApiClient,
    quiz_id: i64,
    answers: &Map<String, Value>,
    time_taken_minutes: u32,
) -> Result<Value> {
    client
        .post(
            &format!("/quizzes/{}/submit", quiz_id),
            Some(json!({
                "answers": answers,
                "time_taken_minutes": time_taken_minutes,
            })),
        )
        .await
}

/// Fetch the current user's quiz results, newest first, optionally
/// restricted to one quiz
pub async fn results(client: &ApiClient, quiz_id: Option<i64>) -> Result<Value> {
    let path = match quiz_id {
        Some(quiz_id) => format!("/quizzes/results?quiz_id={}", quiz_id),
        None => "/quizzes/results".to_string(),
    };

    client.get(&path).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_query_assembly() {
        assert_eq!(QuizFilter::default().to_query(), "");
        assert_eq!(
            QuizFilter {
                course_id: Some(2),
                topic_id: None
            }
            .to_query(),
            "?course_id=2"
        );
        assert_eq!(
            QuizFilter {
                course_id: Some(2),
                topic_id: Some(9)
            }
            .to_query(),
            "?course_id=2&topic_id=9"
        );
    }
}
