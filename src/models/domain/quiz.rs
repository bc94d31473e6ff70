use serde::{Deserialize, Serialize};

use crate::models::domain::quiz_question::{AnswerOption, Question};

/// Questions produced by one generation call. Owned by the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct QuizDraft {
    pub questions: Vec<Question>,
}

/// Read-only input of the document layout engine.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RenderableQuiz {
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Plain,
    Answered, // correct option marked, explanations shown
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "lowercase")]
pub enum AssistKind {
    Question,
    Options,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AssistResult {
    Question(Question),
    Options(Vec<AnswerOption>),
}

impl QuizDraft {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn into_renderable(self, title: impl Into<String>) -> RenderableQuiz {
        RenderableQuiz {
            title: title.into(),
            questions: self.questions,
        }
    }
}

impl RenderableQuiz {
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            title: title.into(),
            questions,
        }
    }
}
