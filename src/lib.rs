//! # pagechunk
//!
//! Token-bounded text chunking for documents that come in pages.
//!
//! ## The Problem
//!
//! A language model sees a fixed number of tokens at a time. A 300-page PDF
//! does not fit, so it has to be cut into pieces, and each piece should:
//!
//! - fit the token budget of the model that will read it
//! - end on a sentence boundary, not mid-thought
//! - repeat a little of the previous piece, so context carries over
//! - know which pages it came from, so answers can cite them
//!
//! ## How It Works
//!
//! ```text
//! pages ──join──▶ text + page map
//!                   │
//!                   ▼
//!               sentences ──greedy pack──▶ chunks ──page map──▶ page numbers
//!                   │                        ▲
//!                   └── too big? split on words ┘
//! ```
//!
//! 1. Pages are joined with a blank line; the offset where each page starts
//!    is recorded in a [`PageMap`].
//! 2. The text is split after `.`, `!` or `?` followed by whitespace.
//! 3. Sentences are packed into a chunk until the next one would exceed
//!    `chunk_size` tokens. The chunk is emitted and the next one is seeded
//!    with trailing sentences worth at most `chunk_overlap` tokens.
//! 4. A sentence that alone exceeds `chunk_size` is split on words, with a
//!    three-word carry between pieces.
//! 5. Each chunk is attributed to the pages that begin inside its span.
//!
//! Tokens are counted with a [`TokenCounter`]; the default is
//! [`TiktokenCounter`] with the `cl100k_base` encoding.
//!
//! ## Quick Start
//!
//! ```rust
//! use pagechunk::{ChunkerConfig, TextChunker};
//!
//! let chunker = TextChunker::new(ChunkerConfig::new(100, 20)).unwrap();
//!
//! let text: String = (0..50)
//!     .map(|i| format!("This is sentence number {i}."))
//!     .collect::<Vec<_>>()
//!     .join(" ");
//!
//! let chunks = chunker.chunk_text(&text, None);
//! assert!(chunks.len() > 1);
//! for (i, chunk) in chunks.iter().enumerate() {
//!     assert_eq!(chunk.chunk_index, i);
//!     assert!(chunk.token_count <= 100);
//! }
//! ```
//!
//! ## Custom Token Counters
//!
//! Any `Fn(&str) -> usize` works, which keeps tests independent of a BPE:
//!
//! ```rust
//! use std::sync::Arc;
//! use pagechunk::{ChunkerConfig, TextChunker};
//!
//! let words = |text: &str| text.split_whitespace().count();
//! let chunker = TextChunker::with_counter(ChunkerConfig::new(6, 3), Arc::new(words)).unwrap();
//!
//! let chunks = chunker.chunk_text("a b c. d e f. g h i.", None);
//! assert_eq!(chunks[0].content, "a b c. d e f.");
//! assert_eq!(chunks[1].content, "d e f. g h i.");
//! ```
//!
//! ## Configuration
//!
//! | Setting | Default | Meaning |
//! |---------|---------|---------|
//! | `chunk_size` | 1000 | Token budget per chunk |
//! | `chunk_overlap` | 200 | Token budget of context carried forward |
//! | `encoding` | `cl100k_base` | Tokenizer; unknown names fall back |
//!
//! Invalid budgets (`chunk_size == 0`, `chunk_overlap >= chunk_size`) are
//! rejected when the chunker is built. Chunking itself never fails.

mod chunk;
mod chunker;
mod config;
mod error;
mod pages;
mod sentence;
mod tokens;
mod words;

pub use chunk::Chunk;
pub use chunker::TextChunker;
pub use config::{ChunkerConfig, ENV_CHUNK_ENCODING, ENV_CHUNK_OVERLAP, ENV_CHUNK_SIZE};
pub use error::{Error, Result};
pub use pages::{pages_for_range, PageMap, PAGE_SEPARATOR};
pub use tokens::{Encoding, TiktokenCounter, TokenCounter};
