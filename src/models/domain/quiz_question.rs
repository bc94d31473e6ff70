use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub text: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub options: Vec<AnswerOption>, // four for generated content, any count tolerated
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

impl AnswerOption {
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        explanation: impl Into<String>,
        options: Vec<AnswerOption>,
    ) -> Self {
        Self {
            text: text.into(),
            explanation: explanation.into(),
            options,
        }
    }

    pub fn correct_count(&self) -> usize {
        self.options.iter().filter(|o| o.is_correct).count()
    }
}
