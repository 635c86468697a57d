//! Prompt assembly for grounded answers

use crate::index::ScoredChunk;

/// Instruction placed ahead of the retrieved context
pub const SYSTEM_PROMPT: &str = "You are an assistant for question-answering tasks. \
Use the following pieces of retrieved context to answer \
the question. If you don't know the answer, say that you \
don't know. Use three sentences maximum and keep the \
answer concise.";

/// Separator between retrieved chunk texts
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Chunk texts in retrieval order
pub fn build_context(chunks: &[ScoredChunk]) -> String {
    chunks
        .iter()
        .map(|c| c.chunk.text.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

/// System instruction with the context appended
pub fn system_message(chunks: &[ScoredChunk]) -> String {
    format!("{}\n\n{}", SYSTEM_PROMPT, build_context(chunks))
}
