//! Embedding index over document chunks
//!
//! Holds one vector per chunk, computed by the same embedder later used for
//! queries, and answers top-k similarity queries.

pub mod vector_store;

pub use vector_store::{cosine_similarity, VectorStore};

use crate::embeddings::{Chunk, Embedder, EmbeddingError, Result};
use std::sync::Arc;
use tracing::debug;

/// A retrieved chunk with its similarity to the query
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

/// Chunks paired with their embeddings
pub struct EmbeddingIndex {
    embedder: Arc<dyn Embedder>,
    chunks: Vec<Chunk>,
    store: VectorStore,
}

impl EmbeddingIndex {
    /// Embed every chunk and store the entries in chunk order
    pub async fn build(embedder: Arc<dyn Embedder>, chunks: Vec<Chunk>) -> Result<Self> {
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = embedder.embed_batch(&texts).await?;

        if vectors.len() != chunks.len() {
            return Err(EmbeddingError::Malformed(format!(
                "Chunk count {} != embedding count {}",
                chunks.len(),
                vectors.len()
            )));
        }

        let store = VectorStore::new(vectors).map_err(EmbeddingError::Malformed)?;
        debug!(
            entries = store.len(),
            dimension = store.dimension(),
            "embedding index built"
        );

        Ok(Self {
            embedder,
            chunks,
            store,
        })
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.store.dimension()
    }

    /// Embed `text` and return up to `k` chunks, most similar first
    pub async fn query(&self, text: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        let query = self.embedder.embed(text).await?;

        if !self.store.is_empty() && query.len() != self.store.dimension() {
            return Err(EmbeddingError::Malformed(format!(
                "Query embedding has dimension {}, expected {}",
                query.len(),
                self.store.dimension()
            )));
        }

        let results: Vec<ScoredChunk> = self
            .store
            .search(&query, k)
            .into_iter()
            .map(|(i, score)| ScoredChunk {
                chunk: self.chunks[i].clone(),
                score,
            })
            .collect();

        debug!(
            k,
            returned = results.len(),
            top_score = results.first().map(|r| r.score),
            "retrieval complete"
        );

        Ok(results)
    }
}
