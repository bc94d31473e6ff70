use serde::Deserialize;
use validator::Validate;

use crate::models::domain::{AssistKind, RenderMode};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub topic: String,

    #[validate(length(min = 1, max = 50))]
    pub difficulty: String,

    #[validate(range(min = 1, max = 50))]
    pub question_count: Option<usize>,
}

/// Query string of the document upload endpoint; the PDF itself is the body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFromDocumentQuery {
    #[validate(length(min = 1, max = 200))]
    pub topic: String,

    #[validate(length(min = 1, max = 50))]
    pub difficulty: String,

    #[validate(range(min = 1, max = 50))]
    pub question_count: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssistRequest {
    pub kind: AssistKind,

    #[validate(length(min = 1, max = 2000))]
    pub context: String,

    #[serde(default = "default_difficulty")]
    #[validate(length(min = 1, max = 50))]
    pub difficulty: String,

    #[serde(default)]
    pub existing_questions: Vec<String>,

    #[serde(default)]
    #[validate(length(max = 200))]
    pub global_topic: String,
}

fn default_difficulty() -> String {
    "Medium".to_string()
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub mode: RenderMode,
}
