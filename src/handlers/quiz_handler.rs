use std::sync::Arc;

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::{
        domain::RenderableQuiz,
        dto::{
            request::{AssistRequest, ExportQuery, GenerateFromDocumentQuery, GenerateQuizRequest},
            response::GeneratedQuizResponse,
        },
    },
    services::{
        http_helpers::{created_json, pdf_attachment, success_json},
        suggested_filename,
    },
};

#[post("/api/quiz/generate")]
pub async fn generate_quiz(
    state: web::Data<Arc<AppState>>,
    request: web::Json<GenerateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let draft = state
        .quiz_generation_service
        .generate_quiz(&request.topic, &request.difficulty, None, request.question_count)
        .await?;

    Ok(created_json(GeneratedQuizResponse::from_draft(
        &request.topic,
        &request.difficulty,
        draft,
    )))
}

#[post("/api/quiz/generate-from-document")]
pub async fn generate_quiz_from_document(
    state: web::Data<Arc<AppState>>,
    query: web::Query<GenerateFromDocumentQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    query.validate()?;

    if body.len() > state.config.max_document_bytes {
        return Err(AppError::ValidationError(format!(
            "document is {} bytes, the limit is {}",
            body.len(),
            state.config.max_document_bytes
        )));
    }

    let extractor = Arc::clone(&state.text_extractor);
    let source_text = web::block(move || extractor.extract_text_from_bytes(&body))
        .await
        .map_err(|e| AppError::InternalError(format!("extraction task failed: {}", e)))??;

    let draft = state
        .quiz_generation_service
        .generate_quiz(
            &query.topic,
            &query.difficulty,
            Some(&source_text),
            query.question_count,
        )
        .await?;

    Ok(created_json(GeneratedQuizResponse::from_draft(
        &query.topic,
        &query.difficulty,
        draft,
    )))
}

#[post("/api/quiz/assist")]
pub async fn assist_quiz(
    state: web::Data<Arc<AppState>>,
    request: web::Json<AssistRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let result = state
        .quiz_generation_service
        .assist(
            request.kind,
            &request.context,
            &request.difficulty,
            &request.existing_questions,
            &request.global_topic,
        )
        .await?;

    Ok(success_json(result))
}

#[post("/api/quiz/export")]
pub async fn export_quiz(
    state: web::Data<Arc<AppState>>,
    query: web::Query<ExportQuery>,
    quiz: web::Json<RenderableQuiz>,
) -> Result<HttpResponse, AppError> {
    let mode = query.into_inner().mode;
    let quiz = quiz.into_inner();
    let filename = suggested_filename(&quiz.title, mode);

    let engine = state.layout_engine;
    let bytes = web::block(move || engine.render_to_bytes(&quiz, mode))
        .await
        .map_err(|e| AppError::InternalError(format!("render task failed: {}", e)))??;

    log::info!("Exported {} ({} bytes)", filename, bytes.len());
    Ok(pdf_attachment(bytes, &filename))
}
