use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::ports::{
    GeneratedContent, GenerationOptions, TextGenerationError, TextGenerator,
};

#[derive(Serialize)]
struct InvokeRequest<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_json_schema: Option<&'a Value>,
}

#[derive(Deserialize)]
struct InvokeResponse {
    output: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct LlmGatewayConfig {
    pub url: String,
    pub api_key: Option<String>,
}

/// Default LLM: a prompt-in, output-out HTTP gateway.
#[derive(Debug, Clone)]
pub struct LlmGatewayClient {
    client: Client,
    config: LlmGatewayConfig,
}

impl LlmGatewayClient {
    pub fn new(client: Client, config: LlmGatewayConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl TextGenerator for LlmGatewayClient {
    async fn generate_content(
        &self,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<GeneratedContent, TextGenerationError> {
        let request = InvokeRequest {
            prompt,
            response_json_schema: options.response_schema.as_ref(),
        };

        let mut builder = self.client.post(&self.config.url).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TextGenerationError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TextGenerationError::ApiError {
                provider: self.provider_name().to_string(),
                status: status.as_u16(),
                message: if message.is_empty() {
                    "Unknown error".to_string()
                } else {
                    message
                },
            });
        }

        let body: InvokeResponse = response
            .json()
            .await
            .map_err(|e| TextGenerationError::InvalidResponse(e.to_string()))?;

        match body.output {
            None | Some(Value::Null) => Err(TextGenerationError::EmptyResponse(
                self.provider_name().to_string(),
            )),
            Some(Value::String(text)) if options.response_schema.is_none() => {
                Ok(GeneratedContent::Text(text))
            }
            Some(Value::String(text)) => match serde_json::from_str::<Value>(&text) {
                Ok(value) if value.is_object() => Ok(GeneratedContent::Json(value)),
                _ => Ok(GeneratedContent::Text(text)),
            },
            Some(value) => Ok(GeneratedContent::Json(value)),
        }
    }

    fn provider_name(&self) -> &str {
        "Base44"
    }
}
