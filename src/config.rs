use std::env;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct Config {
    pub llm_api_key: SecretString,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub quiz_language: String,
    pub strict_quiz_validation: bool,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub max_document_bytes: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            llm_api_key: SecretString::from(env::var("LLM_API_KEY").unwrap_or_default()),
            llm_api_base_url: env::var("LLM_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.deepseek.com".to_string()),
            llm_model_name: env::var("LLM_MODEL_NAME")
                .unwrap_or_else(|_| "deepseek-chat".to_string()),
            quiz_language: env::var("QUIZ_LANGUAGE").unwrap_or_else(|_| "French".to_string()),
            strict_quiz_validation: env::var("STRICT_QUIZ_VALIDATION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            max_document_bytes: env::var("MAX_DOCUMENT_BYTES")
                .ok()
                .and_then(|b| b.parse().ok())
                .unwrap_or(10 * 1024 * 1024),
        }
    }

    /// Rejects configurations that cannot reach the model provider.
    pub fn validate_for_production(&self) -> AppResult<()> {
        if self.llm_api_key.expose_secret().trim().is_empty() {
            return Err(AppError::ValidationError(
                "LLM_API_KEY is not set. Export it or add it to .env".to_string(),
            ));
        }

        if self.llm_model_name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "LLM_MODEL_NAME must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn test_config() -> Self {
        Self {
            llm_api_key: SecretString::from("test_api_key".to_string()),
            llm_api_base_url: "http://127.0.0.1:9".to_string(),
            llm_model_name: "test-model".to_string(),
            quiz_language: "French".to_string(),
            strict_quiz_validation: false,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 3000,
            max_document_bytes: 1024 * 1024,
        }
    }
}
