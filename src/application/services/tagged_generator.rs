use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{
    GeneratedContent, GenerationOptions, TextGenerationError, TextGenerator,
};
use crate::application::services::prompts;

/// Routes a provider without a native client through another generator,
/// tagging each prompt with the requested model.
pub struct TaggedGenerator {
    inner: Arc<dyn TextGenerator>,
    model: String,
    name: &'static str,
}

impl TaggedGenerator {
    pub fn new(inner: Arc<dyn TextGenerator>, model: String, name: &'static str) -> Self {
        Self { inner, model, name }
    }
}

#[async_trait]
impl TextGenerator for TaggedGenerator {
    async fn generate_content(
        &self,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<GeneratedContent, TextGenerationError> {
        tracing::debug!("Encaminhando prompt de {} para o LLM padrão", self.model);
        self.inner
            .generate_content(&prompts::tagged_prompt(&self.model, prompt), options)
            .await
    }

    fn provider_name(&self) -> &str {
        self.name
    }
}
