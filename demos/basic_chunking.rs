//! Basic Token-Bounded Chunking
//!
//! The minimal example: chunk text to fit a model's context budget.
//!
//! ```bash
//! RUST_LOG=pagechunk=debug cargo run --example basic_chunking
//! ```

use pagechunk::{ChunkerConfig, TextChunker};
use tracing_subscriber::EnvFilter;

fn main() -> pagechunk::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let document = "Machine learning models learn patterns from data. \
        They generalize these patterns to make predictions. \
        This is fundamentally different from traditional programming. \
        Deep learning extends this with multiple hidden layers. \
        Each layer learns increasingly abstract representations. \
        Early layers detect edges; later layers recognize objects.";

    // Small budgets so the short document splits.
    let chunker = TextChunker::new(ChunkerConfig::new(30, 10))?;
    let chunks = chunker.chunk_text(document, None);

    println!("Document: {} tokens", chunker.count_tokens(document));
    println!("Chunks: {}\n", chunks.len());

    for chunk in &chunks {
        println!(
            "[{}] {} tokens, chars {}..{}: \"{}\"",
            chunk.chunk_index, chunk.token_count, chunk.start_char, chunk.end_char, chunk.content
        );
    }

    // Adjacent chunks repeat up to 10 tokens of trailing sentences.
    Ok(())
}
