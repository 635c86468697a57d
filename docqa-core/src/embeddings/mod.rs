//! Embeddings module for semantic retrieval
//!
//! Provides page chunking and the embedding provider abstraction.

pub mod chunker;
pub mod model;

pub use chunker::{Chunk, ChunkerConfig, PageChunker};
pub use model::Embedder;

#[cfg(test)]
pub use model::{HashEmbedder, MockEmbedder};

use crate::providers::ProviderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("Embedding provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Malformed embedding response: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, EmbeddingError>;
