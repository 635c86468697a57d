use docqa_core::providers::gemini::{CHAT_MODEL, EMBEDDING_MODEL};
use docqa_core::Session;

pub fn run(session: &Session) -> anyhow::Result<()> {
    let Some(stats) = session.stats() else {
        anyhow::bail!("index is not ready");
    };
    let config = session.config();

    println!("docqa Statistics");
    println!("================");
    println!();
    println!("Document:        {}", stats.document.display());
    println!("Pages:           {}", stats.pages);
    println!("Chunks:          {}", stats.chunks);
    println!(
        "Chunk size:      {} chars ({} overlap)",
        config.chunker.max_chunk_chars, config.chunker.overlap_chars
    );
    println!("Dimension:       {}", stats.dimension);
    println!("Top k:           {}", config.top_k);
    println!("Embedding model: {}", EMBEDDING_MODEL);
    println!("Chat model:      {}", CHAT_MODEL);
    println!(
        "Indexed at:      {}",
        stats.built_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    Ok(())
}
