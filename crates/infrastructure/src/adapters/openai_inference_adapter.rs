//! OpenAI inference adapter - Implements InferencePort using ai_core
//!
//! Works with any OpenAI-compatible chat completions backend, hosted or
//! self-hosted (llama.cpp server, vLLM, LM Studio).

use std::time::Instant;

use ai_core::{InferenceConfig, InferenceEngine, InferenceRequest, OpenAiInferenceEngine};
use application::{
    error::ApplicationError,
    ports::{InferencePort, InferenceResult},
};
use async_trait::async_trait;
use domain::Conversation;
use tracing::{debug, instrument};

/// Adapter for OpenAI-compatible inference servers
#[derive(Debug)]
pub struct OpenAiInferenceAdapter {
    engine: OpenAiInferenceEngine,
    system_prompt: Option<String>,
}

impl OpenAiInferenceAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: InferenceConfig) -> Result<Self, ApplicationError> {
        let engine = OpenAiInferenceEngine::new(config)
            .map_err(|e| ApplicationError::Inference(e.to_string()))?;

        Ok(Self {
            engine,
            system_prompt: None,
        })
    }

    /// Set the default system prompt
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Convert ai_core error to application error
    fn map_error(e: ai_core::InferenceError) -> ApplicationError {
        match e {
            ai_core::InferenceError::RateLimited => ApplicationError::RateLimited,
            ai_core::InferenceError::AuthenticationFailed(msg) => {
                ApplicationError::Configuration(format!("Inference API key rejected: {msg}"))
            },
            ai_core::InferenceError::ConnectionFailed(msg) => {
                ApplicationError::ExternalService(format!("Inference connection failed: {msg}"))
            },
            ai_core::InferenceError::Timeout(ms) => {
                ApplicationError::ExternalService(format!("Inference timeout after {ms}ms"))
            },
            other => ApplicationError::Inference(other.to_string()),
        }
    }

    async fn run(&self, request: InferenceRequest) -> Result<InferenceResult, ApplicationError> {
        let start = Instant::now();

        let response = self
            .engine
            .generate(request)
            .await
            .map_err(Self::map_error)?;

        #[allow(clippy::cast_possible_truncation)]
        let latency_ms = start.elapsed().as_millis() as u64;

        debug!(
            model = %response.model,
            tokens = ?response.usage.as_ref().map(|u| u.total_tokens),
            latency_ms = latency_ms,
            "Inference completed"
        );

        Ok(InferenceResult {
            content: response.content,
            model: response.model,
            tokens_used: response.usage.map(|u| u.total_tokens),
            latency_ms,
        })
    }
}

#[async_trait]
impl InferencePort for OpenAiInferenceAdapter {
    #[instrument(skip(self, message), fields(message_len = message.len()))]
    async fn generate(&self, message: &str) -> Result<InferenceResult, ApplicationError> {
        #[allow(clippy::option_if_let_else)]
        let request = match &self.system_prompt {
            Some(system) => InferenceRequest::with_system(system, message),
            None => InferenceRequest::simple(message),
        };

        self.run(request).await
    }

    #[instrument(skip(self, conversation), fields(conversation_id = %conversation.id))]
    async fn generate_with_context(
        &self,
        conversation: &Conversation,
    ) -> Result<InferenceResult, ApplicationError> {
        let mut messages: Vec<ai_core::InferenceMessage> = Vec::new();

        // The conversation's own system prompt wins over the adapter default
        if let Some(system) = conversation
            .system_prompt
            .as_ref()
            .or(self.system_prompt.as_ref())
        {
            messages.push(ai_core::InferenceMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }

        for msg in &conversation.messages {
            messages.push(ai_core::InferenceMessage::from(msg));
        }

        self.run(InferenceRequest::from_messages(messages)).await
    }

    #[instrument(skip(self, system_prompt, message))]
    async fn generate_with_system(
        &self,
        system_prompt: &str,
        message: &str,
    ) -> Result<InferenceResult, ApplicationError> {
        self.run(InferenceRequest::with_system(system_prompt, message))
            .await
    }

    async fn is_healthy(&self) -> bool {
        self.engine.health_check().await.unwrap_or(false)
    }

    fn current_model(&self) -> String {
        self.engine.default_model().to_string()
    }
}
