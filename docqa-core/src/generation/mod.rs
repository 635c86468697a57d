//! Answer generation
//!
//! Turns a question plus retrieved chunks into a single grounded request for
//! a hosted chat model.

pub mod prompt;

pub use prompt::{build_context, SYSTEM_PROMPT};

use crate::index::ScoredChunk;
use crate::providers::ProviderError;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Language model error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Language model returned no answer ({0})")]
    EmptyResponse(String),
}

pub type Result<T> = std::result::Result<T, GenerationError>;

/// One request to the chat model
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    /// `None` leaves the output length up to the provider
    pub max_output_tokens: Option<u32>,
}

/// Trait for chat completion providers (allows mocking)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn generate(&self, request: &ChatRequest) -> Result<String>;
}

/// A generated answer and the context it was conditioned on
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<ScoredChunk>,
}

/// Builds prompts and calls the chat model
#[derive(Clone)]
pub struct AnswerGenerator {
    model: Arc<dyn ChatModel>,
    temperature: f32,
}

impl AnswerGenerator {
    pub fn new(model: Arc<dyn ChatModel>, temperature: f32) -> Self {
        Self { model, temperature }
    }

    pub fn request(&self, question: &str, context: &[ScoredChunk]) -> ChatRequest {
        ChatRequest {
            system: prompt::system_message(context),
            user: question.to_string(),
            temperature: self.temperature,
            max_output_tokens: None,
        }
    }

    pub async fn generate(&self, question: &str, context: Vec<ScoredChunk>) -> Result<Answer> {
        let request = self.request(question, &context);
        debug!(
            context_chunks = context.len(),
            prompt_chars = request.system.len(),
            "generating answer"
        );

        let text = self.model.generate(&request).await?;

        Ok(Answer {
            text: text.trim().to_string(),
            sources: context,
        })
    }
}
