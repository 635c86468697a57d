//! Pipeline configuration

use crate::embeddings::ChunkerConfig;
use std::path::{Path, PathBuf};

/// Source document, relative to the working directory
pub const DOCUMENT_PATH: &str = "GOT-OCR-2.0-paper.pdf";

/// Target chunk length in characters
pub const CHUNK_SIZE: usize = 1000;

/// Characters shared by adjacent chunks of a page
pub const CHUNK_OVERLAP: usize = 200;

/// Chunks retrieved per question
pub const TOP_K: usize = 10;

pub const TEMPERATURE: f32 = 0.0;

/// Configuration for building and querying the pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// PDF to index
    pub document_path: PathBuf,
    pub chunker: ChunkerConfig,
    /// Number of chunks handed to the model as context
    pub top_k: usize,
    pub temperature: f32,
}

impl PipelineConfig {
    pub fn new(document_path: impl AsRef<Path>) -> Self {
        Self {
            document_path: document_path.as_ref().to_path_buf(),
            chunker: ChunkerConfig::default(),
            top_k: TOP_K,
            temperature: TEMPERATURE,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(DOCUMENT_PATH)
    }
}
