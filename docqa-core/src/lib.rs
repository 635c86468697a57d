pub mod document;
pub mod embeddings;
pub mod generation;
pub mod index;
pub mod pipeline;
pub mod providers;

pub use document::{DocumentLoader, Page, PdfLoader};
pub use generation::Answer;
pub use index::{EmbeddingIndex, ScoredChunk};
pub use pipeline::{
    Backends, CorpusStats, InitError, Pipeline, PipelineConfig, QueryError, Session, SessionState,
};
