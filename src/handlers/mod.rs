pub mod health_handler;
pub mod quiz_handler;

use actix_web::web;

use crate::errors::AppError;

pub use health_handler::health_check;
pub use quiz_handler::{assist_quiz, export_quiz, generate_quiz, generate_quiz_from_document};

/// Registers every route plus extractor configs that report bad input as
/// `VALIDATION_ERROR` JSON instead of actix's plain-text defaults.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .service(health_check)
    .service(generate_quiz)
    .service(generate_quiz_from_document)
    .service(assist_quiz)
    .service(export_quiz);
}
