pub mod document_layout;
pub mod http_helpers;
pub mod model_service;
pub mod option_shuffler;
pub mod prompt_builder;
pub mod quiz_generation_service;
pub mod response_sanitizer;
pub mod text_extraction_service;

pub use document_layout::{suggested_filename, DocumentLayoutEngine};
pub use model_service::{ChatModel, OpenAiChatModel};
pub use option_shuffler::{OptionShuffler, RandomIndex};
pub use prompt_builder::QuizPromptBuilder;
pub use quiz_generation_service::QuizGenerationService;
pub use text_extraction_service::{DocumentTextExtractor, PdfTextExtractor};
