//! Page-Aware Chunking
//!
//! Chunks a paged document and shows which pages each chunk cites.
//! Budgets come from the environment when set:
//!
//! ```bash
//! CHUNK_SIZE=60 CHUNK_OVERLAP=15 RUST_LOG=pagechunk=trace \
//!     cargo run --example page_chunking
//! ```

use pagechunk::{ChunkerConfig, TextChunker};
use tracing_subscriber::EnvFilter;

fn main() -> pagechunk::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let pages = [
        (
            1,
            "Photosynthesis converts light energy into chemical energy. \
             It takes place in the chloroplasts of plant cells.",
        ),
        (
            2,
            "The light-dependent reactions occur in the thylakoid membranes. \
             Water is split and oxygen is released as a by-product.",
        ),
        (
            3,
            "The Calvin cycle uses ATP and NADPH to fix carbon dioxide. \
             Its product is a three-carbon sugar used to build glucose.",
        ),
        (
            4,
            "Rates of photosynthesis depend on light intensity, carbon dioxide \
             concentration and temperature, each of which can become limiting.",
        ),
    ];

    let config = ChunkerConfig::new(40, 10).with_env_overrides()?;
    let chunker = TextChunker::new(config)?;
    let chunks = chunker.chunk_by_pages(&pages);

    println!(
        "{} pages -> {} chunks (size {}, overlap {})\n",
        pages.len(),
        chunks.len(),
        chunker.chunk_size(),
        chunker.chunk_overlap()
    );

    for chunk in &chunks {
        println!("{chunk}");
        println!("    \"{}\"\n", chunk.content);
    }

    Ok(())
}
