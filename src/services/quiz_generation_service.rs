use std::{fmt, sync::Arc};

use serde::de::DeserializeOwned;

use crate::{
    constants::quiz_prompt::{CORRECT_OPTIONS_PER_QUESTION, OPTIONS_PER_QUESTION},
    errors::{AppError, AppResult},
    models::domain::{AnswerOption, AssistKind, AssistResult, Question, QuizDraft},
    services::{
        model_service::{ChatModel, ChatRequest},
        option_shuffler::OptionShuffler,
        prompt_builder::{QuizPrompt, QuizPromptBuilder},
        response_sanitizer::{sanitize, PayloadShape},
    },
};

/// Stages a generation call moves through, logged as they are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    Idle,
    Prompting,
    AwaitingModel,
    Sanitizing,
    Validating,
    Done,
    Failed,
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationStage::Idle => write!(f, "idle"),
            GenerationStage::Prompting => write!(f, "prompting"),
            GenerationStage::AwaitingModel => write!(f, "awaiting_model"),
            GenerationStage::Sanitizing => write!(f, "sanitizing"),
            GenerationStage::Validating => write!(f, "validating"),
            GenerationStage::Done => write!(f, "done"),
            GenerationStage::Failed => write!(f, "failed"),
        }
    }
}

pub struct QuizGenerationService {
    model: Arc<dyn ChatModel>,
    model_name: String,
    prompts: QuizPromptBuilder,
    shuffler: OptionShuffler,
    strict_validation: bool,
}

impl QuizGenerationService {
    pub fn new(
        model: Arc<dyn ChatModel>,
        model_name: impl Into<String>,
        prompts: QuizPromptBuilder,
        shuffler: OptionShuffler,
    ) -> Self {
        Self {
            model,
            model_name: model_name.into(),
            prompts,
            shuffler,
            strict_validation: false,
        }
    }

    /// Rejects questions that do not have exactly four options with one correct.
    pub fn with_strict_validation(mut self, strict: bool) -> Self {
        self.strict_validation = strict;
        self
    }

    pub async fn generate_quiz(
        &self,
        topic: &str,
        difficulty: &str,
        source_text: Option<&str>,
        question_count: Option<usize>,
    ) -> AppResult<QuizDraft> {
        log::info!(
            "Generating quiz on '{}' ({}), source document: {}",
            topic,
            difficulty,
            source_text.is_some()
        );

        enter(GenerationStage::Prompting);
        let prompt = self
            .prompts
            .build_full_quiz_prompt(topic, difficulty, source_text, question_count);

        let questions: Vec<Question> = self
            .request_payload(prompt, PayloadShape::Array)
            .await
            .inspect_err(|e| log::error!("Quiz generation on '{}' failed: {}", topic, e))?;

        enter(GenerationStage::Validating);
        if self.strict_validation {
            for (index, question) in questions.iter().enumerate() {
                validate_question(index, question).inspect_err(|e| {
                    enter(GenerationStage::Failed);
                    log::error!("Quiz generation on '{}' rejected: {}", topic, e);
                })?;
            }
        }

        let questions = questions
            .into_iter()
            .map(|question| self.shuffle_question(question))
            .collect::<Vec<_>>();

        enter(GenerationStage::Done);
        log::info!("Generated {} question(s) on '{}'", questions.len(), topic);

        Ok(QuizDraft { questions })
    }

    pub async fn assist(
        &self,
        kind: AssistKind,
        context: &str,
        difficulty: &str,
        existing_question_texts: &[String],
        global_topic: &str,
    ) -> AppResult<AssistResult> {
        log::info!("Assisting with {:?} for '{}'", kind, context);

        enter(GenerationStage::Prompting);
        let result = match kind {
            AssistKind::Question => {
                let prompt = self.prompts.build_assist_question_prompt(
                    context,
                    difficulty,
                    existing_question_texts,
                    Some(global_topic),
                );
                let question: Question = self.request_payload(prompt, PayloadShape::Object).await?;

                enter(GenerationStage::Validating);
                if self.strict_validation {
                    validate_question(0, &question)?;
                }
                AssistResult::Question(self.shuffle_question(question))
            }
            AssistKind::Options => {
                let prompt = self.prompts.build_assist_options_prompt(context, global_topic);
                let options: Vec<AnswerOption> =
                    self.request_payload(prompt, PayloadShape::Array).await?;

                enter(GenerationStage::Validating);
                if self.strict_validation {
                    validate_options(0, &options)?;
                }
                AssistResult::Options(self.shuffler.shuffle(options))
            }
        };

        enter(GenerationStage::Done);
        Ok(result)
    }

    /// One model call, then sanitization and typed decoding. Never retried.
    async fn request_payload<T: DeserializeOwned>(
        &self,
        prompt: QuizPrompt,
        shape: PayloadShape,
    ) -> AppResult<T> {
        let request = ChatRequest {
            model: self.model_name.clone(),
            messages: prompt.into_messages(),
        };

        enter(GenerationStage::AwaitingModel);
        let reply = self.model.complete(request).await.map_err(|e| {
            enter(GenerationStage::Failed);
            match e {
                AppError::GenerationFailed(_) | AppError::MalformedResponse(_) => e,
                other => AppError::GenerationFailed(other.to_string()),
            }
        })?;

        enter(GenerationStage::Sanitizing);
        let value = sanitize(&reply, shape).inspect_err(|_| enter(GenerationStage::Failed))?;

        serde_json::from_value(value).map_err(|e| {
            enter(GenerationStage::Failed);
            AppError::MalformedResponse(format!("unexpected payload shape: {}", e))
        })
    }

    fn shuffle_question(&self, mut question: Question) -> Question {
        question.options = self.shuffler.shuffle(question.options);
        question
    }
}

fn enter(stage: GenerationStage) {
    log::debug!("Quiz generation stage: {}", stage);
}

fn validate_question(index: usize, question: &Question) -> AppResult<()> {
    validate_options(index, &question.options)
}

fn validate_options(index: usize, options: &[AnswerOption]) -> AppResult<()> {
    if options.len() != OPTIONS_PER_QUESTION {
        return Err(AppError::MalformedResponse(format!(
            "question {} has {} options, expected {}",
            index + 1,
            options.len(),
            OPTIONS_PER_QUESTION
        )));
    }

    let correct = options.iter().filter(|o| o.is_correct).count();
    if correct != CORRECT_OPTIONS_PER_QUESTION {
        return Err(AppError::MalformedResponse(format!(
            "question {} has {} correct options, expected {}",
            index + 1,
            correct,
            CORRECT_OPTIONS_PER_QUESTION
        )));
    }

    Ok(())
}
