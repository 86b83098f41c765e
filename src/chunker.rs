//! Token-bounded sentence packing with overlap.
//!
//! ## The Algorithm
//!
//! One greedy pass over the sentences:
//!
//! ```text
//! chunk_size = 10, chunk_overlap = 4, sentence tokens in brackets
//!
//! S1[3] S2[3] S3[3] S4[3] S5[12] S6[2]
//!
//! S1 S2 S3          9 tokens, S4 would make 12 -> flush chunk 0
//!       S3 S4       seed with S3 (3 <= 4), then add S4
//!       S3 S4 | S5  S5 alone exceeds 10 -> flush chunk 1, word-split S5
//!                   into chunks 2.., no overlap after a word split
//!             S6    final flush
//! ```
//!
//! The overlap tail is the longest run of trailing sentences whose tokens
//! fit `chunk_overlap`. If the tail plus the incoming sentence would exceed
//! `chunk_size`, sentences are dropped from the front of the tail so
//! sentence-built chunks stay within budget.
//!
//! ## Offsets
//!
//! A chunk starts where its first sentence starts in the source text, and
//! ends `content.chars().count()` characters later.

use std::sync::Arc;

use crate::pages::pages_for_range;
use crate::sentence::{split_sentences, Sentence};
use crate::words::split_long;
use crate::{Chunk, ChunkerConfig, PageMap, Result, TiktokenCounter, TokenCounter};

/// Splits document text into overlapping, token-bounded chunks.
///
/// Sentences are kept whole where possible; a sentence larger than the
/// budget is split on words. Configuration is fixed at construction and the
/// chunker holds no per-call state, so one instance can serve many threads.
///
/// ## Example
///
/// ```rust
/// use pagechunk::{ChunkerConfig, TextChunker};
///
/// let chunker = TextChunker::new(ChunkerConfig::new(100, 20)).unwrap();
///
/// let chunks = chunker.chunk_by_pages(&[
///     (1, "Page one text."),
///     (2, "Page two text."),
///     (3, "Page three text."),
/// ]);
///
/// assert_eq!(chunks.len(), 1);
/// assert_eq!(chunks[0].page_numbers, vec![1, 2, 3]);
/// ```
#[derive(Clone)]
pub struct TextChunker {
    config: ChunkerConfig,
    counter: Arc<dyn TokenCounter>,
}

impl TextChunker {
    /// Create a chunker counting tokens with the configured tiktoken encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if the budgets are invalid (see
    /// [`ChunkerConfig::validate`]) or the tokenizer cannot be loaded.
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        config.validate()?;
        let counter = TiktokenCounter::for_encoding(&config.encoding)?;
        Ok(Self {
            config,
            counter: Arc::new(counter),
        })
    }

    /// Create a chunker with a custom token counter.
    ///
    /// `config.encoding` is informational only in this case.
    ///
    /// # Errors
    ///
    /// Returns an error if the budgets are invalid.
    pub fn with_counter(config: ChunkerConfig, counter: Arc<dyn TokenCounter>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, counter })
    }

    /// Create a chunker with 1000-token chunks, 200 tokens of overlap and
    /// `cl100k_base`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tokenizer cannot be loaded.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ChunkerConfig::default())
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Token budget per chunk.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.config.chunk_size
    }

    /// Token budget for carried-over context.
    #[must_use]
    pub fn chunk_overlap(&self) -> usize {
        self.config.chunk_overlap
    }

    /// Count tokens in `text`.
    #[must_use]
    pub fn count_tokens(&self, text: &str) -> usize {
        self.counter.count_tokens(text)
    }

    /// Expected number of chunks for a document of `total_tokens` tokens.
    ///
    /// Useful for pre-allocation. Approximate: sentence boundaries rarely
    /// line up with the budget.
    #[must_use]
    pub fn estimate_chunks(&self, total_tokens: usize) -> usize {
        if total_tokens == 0 {
            return 0;
        }
        let size = self.config.chunk_size;
        if total_tokens <= size {
            return 1;
        }
        let step = size - self.config.chunk_overlap;
        1 + (total_tokens - size).div_ceil(step)
    }

    /// Split pages into chunks that record which pages they span.
    ///
    /// Page texts are joined with a blank line (see
    /// [`PAGE_SEPARATOR`](crate::PAGE_SEPARATOR)); offsets refer to the
    /// joined text.
    pub fn chunk_by_pages<S: AsRef<str>>(&self, pages: &[(u32, S)]) -> Vec<Chunk> {
        let (text, page_map) = PageMap::from_pages(pages);
        self.chunk_text(&text, Some(&page_map))
    }

    /// Split text into overlapping chunks.
    ///
    /// Without a page map every chunk's `page_numbers` is empty. Empty or
    /// whitespace-only text yields no chunks.
    pub fn chunk_text(&self, text: &str, page_map: Option<&PageMap>) -> Vec<Chunk> {
        if text.trim().is_empty() {
            return vec![];
        }

        let size = self.config.chunk_size;
        let mut chunks = Vec::new();
        let mut pending = Accumulator::default();

        for sentence in split_sentences(text) {
            let tokens = self.counter.count_tokens(&sentence.text());

            if tokens > size {
                if !pending.is_empty() {
                    chunks.push(self.build_chunk(&pending, chunks.len(), page_map));
                    pending = Accumulator::default();
                }
                tracing::trace!(
                    tokens,
                    start = sentence.start,
                    "sentence exceeds chunk size, splitting on words"
                );
                let pieces = split_long(
                    sentence.body,
                    sentence.start,
                    size,
                    self.counter.as_ref(),
                    page_map,
                );
                for mut piece in pieces {
                    piece.chunk_index = chunks.len();
                    chunks.push(piece);
                }
                continue;
            }

            if pending.tokens + tokens > size && !pending.is_empty() {
                chunks.push(self.build_chunk(&pending, chunks.len(), page_map));
                pending = pending.into_overlap(self.config.chunk_overlap, tokens, size);
            }

            pending.push(sentence, tokens);
        }

        if !pending.is_empty() {
            chunks.push(self.build_chunk(&pending, chunks.len(), page_map));
        }

        tracing::debug!(
            chunks = chunks.len(),
            bytes = text.len(),
            chunk_size = size,
            "chunked text"
        );
        chunks
    }

    fn build_chunk(
        &self,
        pending: &Accumulator<'_>,
        index: usize,
        page_map: Option<&PageMap>,
    ) -> Chunk {
        let content = pending.content();
        let token_count = self.counter.count_tokens(&content);
        let start = pending.start();
        let end = start + content.chars().count();
        Chunk::new(
            content,
            index,
            token_count,
            start,
            pages_for_range(start, end, page_map),
        )
    }
}

impl std::fmt::Debug for TextChunker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextChunker")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Sentences waiting to become the next chunk.
#[derive(Debug, Default)]
struct Accumulator<'a> {
    sentences: Vec<(Sentence<'a>, usize)>,
    tokens: usize,
}

impl<'a> Accumulator<'a> {
    fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    fn push(&mut self, sentence: Sentence<'a>, tokens: usize) {
        self.sentences.push((sentence, tokens));
        self.tokens += tokens;
    }

    /// Source offset of the first pending sentence.
    fn start(&self) -> usize {
        self.sentences.first().map_or(0, |(s, _)| s.start)
    }

    /// Pending sentences joined, without trailing whitespace.
    fn content(&self) -> String {
        let mut content = String::new();
        for (sentence, _) in &self.sentences {
            content.push_str(sentence.body);
            if sentence.trailing_space {
                content.push(' ');
            }
        }
        content.truncate(content.trim_end().len());
        content
    }

    /// Seed for the next chunk: the trailing sentences that fit `overlap`,
    /// trimmed from the front until `incoming` more tokens fit `size`.
    fn into_overlap(self, overlap: usize, incoming: usize, size: usize) -> Self {
        let mut tail = Vec::new();
        let mut tokens = 0;
        for (sentence, count) in self.sentences.into_iter().rev() {
            if tokens + count > overlap {
                break;
            }
            tokens += count;
            tail.push((sentence, count));
        }
        tail.reverse();

        let mut skip = 0;
        while skip < tail.len() && tokens + incoming > size {
            tokens -= tail[skip].1;
            skip += 1;
        }
        tail.drain(..skip);

        Self {
            sentences: tail,
            tokens,
        }
    }
}
