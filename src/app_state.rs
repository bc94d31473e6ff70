use std::sync::Arc;

use crate::{
    config::Config,
    services::{
        ChatModel, DocumentLayoutEngine, DocumentTextExtractor, OpenAiChatModel, OptionShuffler,
        PdfTextExtractor, QuizGenerationService, QuizPromptBuilder,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_generation_service: Arc<QuizGenerationService>,
    pub text_extractor: Arc<dyn DocumentTextExtractor>,
    pub layout_engine: DocumentLayoutEngine,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let model: Arc<dyn ChatModel> = Arc::new(OpenAiChatModel::new(&config));
        Self::with_components(config, model, Arc::new(PdfTextExtractor))
    }

    /// Wires the state around caller-supplied model and extractor implementations.
    pub fn with_components(
        config: Config,
        model: Arc<dyn ChatModel>,
        text_extractor: Arc<dyn DocumentTextExtractor>,
    ) -> Self {
        let quiz_generation_service = QuizGenerationService::new(
            model,
            config.llm_model_name.clone(),
            QuizPromptBuilder::new(config.quiz_language.clone()),
            OptionShuffler::default(),
        )
        .with_strict_validation(config.strict_quiz_validation);

        Self {
            quiz_generation_service: Arc::new(quiz_generation_service),
            text_extractor,
            layout_engine: DocumentLayoutEngine::default(),
            config: Arc::new(config),
        }
    }
}
