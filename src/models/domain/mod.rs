pub mod quiz;
pub mod quiz_question;
pub use quiz::{AssistKind, AssistResult, QuizDraft, RenderMode, RenderableQuiz};
pub use quiz_question::{AnswerOption, Question};
