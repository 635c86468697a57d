//! Question-answering pipeline over one PDF
//!
//! Initialization runs three steps in order:
//! 1. Load - extract page text from the document
//! 2. Chunk - split pages into overlapping segments
//! 3. Index - embed every segment into the in-memory index
//!
//! Each question then goes through retrieval and answer generation.

pub mod config;
pub mod session;

pub use config::PipelineConfig;
pub use session::{Session, SessionState};

use crate::document::{DocumentLoader, LoadError, PdfLoader};
use crate::embeddings::{Embedder, EmbeddingError, PageChunker};
use crate::generation::{Answer, AnswerGenerator, ChatModel, GenerationError};
use crate::index::EmbeddingIndex;
use crate::providers::gemini::{GeminiChat, GeminiClient, GeminiConfig, GeminiEmbedder};
use crate::providers::{self, ProviderError};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Failures while building the pipeline. Fatal for the session.
#[derive(Error, Debug)]
pub enum InitError {
    #[error("Provider setup failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("No model backends configured")]
    NoBackends,

    #[error("Failed to load document: {0}")]
    Load(#[from] LoadError),

    #[error("No text could be extracted from {}", path.display())]
    EmptyCorpus { path: PathBuf },

    #[error("Failed to build embedding index: {0}")]
    Embedding(#[from] EmbeddingError),
}

/// Failures while answering one question. The session stays usable.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Question is empty")]
    EmptyQuestion,

    #[error("Retrieval failed: {0}")]
    Retrieval(#[source] EmbeddingError),

    #[error("Answer generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Pipeline unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, QueryError>;

/// External capabilities the pipeline is built from
#[derive(Clone)]
pub struct Backends {
    pub loader: Arc<dyn DocumentLoader>,
    pub embedder: Arc<dyn Embedder>,
    pub chat: Arc<dyn ChatModel>,
}

impl Backends {
    /// PDF loading plus Gemini embeddings and chat sharing one HTTP client
    pub fn gemini(config: GeminiConfig) -> providers::Result<Self> {
        let client = GeminiClient::new(config)?;
        Ok(Self {
            loader: Arc::new(PdfLoader::new()),
            embedder: Arc::new(GeminiEmbedder::new(client.clone())),
            chat: Arc::new(GeminiChat::new(client)),
        })
    }
}

/// Summary of the indexed corpus
#[derive(Debug, Clone)]
pub struct CorpusStats {
    pub document: PathBuf,
    pub pages: usize,
    pub chunks: usize,
    pub dimension: usize,
    pub built_at: DateTime<Utc>,
}

/// A built retriever and generator
pub struct Pipeline {
    index: EmbeddingIndex,
    generator: AnswerGenerator,
    top_k: usize,
    stats: CorpusStats,
}

impl Pipeline {
    /// Load, chunk and index the configured document
    pub async fn build(
        config: &PipelineConfig,
        backends: Backends,
    ) -> std::result::Result<Self, InitError> {
        let path = config.document_path.clone();
        info!(document = %path.display(), "loading document");

        let loader = backends.loader;
        let load_path = path.clone();
        let pages = tokio::task::spawn_blocking(move || loader.load(&load_path))
            .await
            .map_err(|e| LoadError::Interrupted(e.to_string()))??;

        let chunker = PageChunker::new(config.chunker.clone());
        let chunks = chunker.chunk_pages(&pages);
        info!(pages = pages.len(), chunks = chunks.len(), "document chunked");

        if chunks.is_empty() {
            return Err(InitError::EmptyCorpus { path });
        }

        let index = EmbeddingIndex::build(backends.embedder, chunks).await?;

        let stats = CorpusStats {
            document: path,
            pages: pages.len(),
            chunks: index.len(),
            dimension: index.dimension(),
            built_at: Utc::now(),
        };
        info!(
            entries = stats.chunks,
            dimension = stats.dimension,
            "embedding index ready"
        );

        Ok(Self {
            index,
            generator: AnswerGenerator::new(backends.chat, config.temperature),
            top_k: config.top_k,
            stats,
        })
    }

    pub fn stats(&self) -> &CorpusStats {
        &self.stats
    }

    /// Retrieve context for `question` and generate an answer from it
    pub async fn answer(&self, question: &str) -> Result<Answer> {
        let question = question.trim();
        if question.is_empty() {
            return Err(QueryError::EmptyQuestion);
        }

        let context = self
            .index
            .query(question, self.top_k)
            .await
            .map_err(QueryError::Retrieval)?;

        Ok(self.generator.generate(question, context).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_error_display() {
        let err = InitError::EmptyCorpus {
            path: PathBuf::from("paper.pdf"),
        };
        assert_eq!(err.to_string(), "No text could be extracted from paper.pdf");

        let err = InitError::from(ProviderError::MissingApiKey("GOOGLE_API_KEY"));
        assert_eq!(
            err.to_string(),
            "Provider setup failed: Missing API key: set GOOGLE_API_KEY"
        );
    }

    #[test]
    fn test_query_error_display() {
        let err = QueryError::Retrieval(EmbeddingError::Provider(ProviderError::Timeout));
        assert_eq!(
            err.to_string(),
            "Retrieval failed: Embedding provider error: Request timed out"
        );
    }

    #[test]
    fn test_gemini_backends() {
        assert!(Backends::gemini(GeminiConfig::new("test-key")).is_ok());
    }
}
