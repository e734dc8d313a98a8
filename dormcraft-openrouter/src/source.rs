use dormcraft_core::SuggestionSource;

use crate::client::OpenRouterClient;
use crate::error::OpenRouterError;
use crate::types::{GenerationParams, OpenRouterRequest};

pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

const SYSTEM_PROMPT: &str = "You arrange furniture in shared dorm rooms. \
Reply with a single JSON object and no other text.";

/// A [`SuggestionSource`] backed by an OpenRouter chat model.
///
/// Each call sends the rendered board context as the user prompt.
#[derive(Debug, Clone)]
pub struct OpenRouterSource {
    client: OpenRouterClient,
    model: String,
    system: Option<String>,
    params: Option<GenerationParams>,
}

impl OpenRouterSource {
    pub fn new(client: OpenRouterClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            system: Some(SYSTEM_PROMPT.to_string()),
            params: None,
        }
    }

    pub fn with_system(mut self, system: Option<String>) -> Self {
        self.system = system;
        self
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// The request sent for a given context payload.
    pub fn request_for(&self, context: &str) -> OpenRouterRequest {
        OpenRouterRequest {
            model: self.model.clone(),
            system: self.system.clone(),
            prompt: context.to_string(),
            params: self.params.clone(),
        }
    }
}

impl SuggestionSource for OpenRouterSource {
    type Error = OpenRouterError;

    fn generate(
        &self,
        context: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send {
        let request = self.request_for(context);
        async move { Ok(self.client.complete(&request).await?.text) }
    }
}
