//! Embedding provider abstraction
//!
//! The hosted Gemini embedder lives in `providers::gemini`. Tests use the
//! offline feature-hashing embedder below.

use super::Result;
use async_trait::async_trait;

/// Trait for embedding providers (allows mocking)
///
/// The same instance must embed both the corpus and the queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate embeddings for a batch of texts, one vector per input in input order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Generate embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Deterministic bag-of-words embedder using feature hashing
///
/// Texts that share words get similar vectors, which is enough to exercise
/// retrieval without a network provider.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dim: usize,
}

#[cfg(test)]
impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// Hash every lowercase alphanumeric token into a signed bucket, then L2 normalize
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.dim];

        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let hash = token
                .to_lowercase()
                .bytes()
                .fold(0xcbf29ce484222325u64, |acc, b| {
                    (acc ^ b as u64).wrapping_mul(0x100000001b3)
                });
            let bucket = (hash % self.dim as u64) as usize;
            let sign = if (hash >> 63) == 0 { 1.0 } else { -1.0 };
            embedding[bucket] += sign;
        }

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            embedding.iter_mut().for_each(|x| *x /= norm);
        }

        embedding
    }
}

#[cfg(test)]
impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_text(text))
    }
}
