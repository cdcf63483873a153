use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::application::services::prompts;

#[derive(Debug, Clone, Error)]
pub enum TextGenerationError {
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("{provider} API Error ({status}): {message}")]
    ApiError {
        provider: String,
        status: u16,
        message: String,
    },
    #[error("Nenhuma resposta gerada pelo {0}")]
    EmptyResponse(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("{0}")]
    ConfigurationError(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub response_schema: Option<Value>,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            response_schema: None,
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 8192,
        }
    }
}

impl GenerationOptions {
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedContent {
    Json(Value),
    Text(String),
}

impl GeneratedContent {
    /// Renders the content as chat text. JSON is shown as-is.
    pub fn into_text(self) -> String {
        match self {
            GeneratedContent::Text(text) => text,
            GeneratedContent::Json(Value::String(text)) => text,
            GeneratedContent::Json(value) => value.to_string(),
        }
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_content(
        &self,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<GeneratedContent, TextGenerationError>;

    /// Human-readable name used in logs and user messages.
    fn provider_name(&self) -> &str;

    async fn analyze_nota_tecnica(
        &self,
        extracted: &Value,
    ) -> Result<GeneratedContent, TextGenerationError> {
        let options = GenerationOptions::default()
            .with_schema(prompts::analysis_schema())
            .with_temperature(0.3);
        self.generate_content(&prompts::analysis_prompt(extracted), options)
            .await
    }

    async fn chat_response(
        &self,
        message: &str,
        context: &str,
    ) -> Result<GeneratedContent, TextGenerationError> {
        let options = GenerationOptions::default()
            .with_temperature(0.7)
            .with_max_output_tokens(2048);
        self.generate_content(&prompts::chat_prompt(message, context), options)
            .await
    }
}
