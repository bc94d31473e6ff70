use serde::Serialize;

use crate::models::domain::{Question, QuizDraft};

/// Body returned by both generation endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuizResponse {
    pub title: String,
    pub topic: String,
    pub difficulty: String,
    pub questions: Vec<Question>,
}

impl GeneratedQuizResponse {
    pub fn from_draft(topic: &str, difficulty: &str, draft: QuizDraft) -> Self {
        Self {
            title: format!("Quiz: {}", topic),
            topic: topic.to_string(),
            difficulty: difficulty.to_string(),
            questions: draft.questions,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
