//! The Chunk type: a token-counted piece of a document with page attribution.

use serde::{Deserialize, Serialize};

/// A chunk of document text, sized for a language-model context budget.
///
/// ## Character Offsets
///
/// `start_char` and `end_char` are offsets into the concatenated source text,
/// counted in characters (Unicode scalar values), not bytes. The end offset is
/// always `start_char + content.chars().count()`:
///
/// ```rust
/// use pagechunk::Chunk;
///
/// let chunk = Chunk::new("Grüße aus Köln.", 0, 4, 6, vec![2]);
/// assert_eq!(chunk.len(), 15);
/// assert_eq!(chunk.span(), 6..21);
/// ```
///
/// Because sentences are re-joined with single spaces, the offsets locate the
/// chunk approximately; the source may contain longer whitespace runs.
///
/// ## Overlap
///
/// Adjacent chunks repeat a few trailing sentences so each one carries the
/// context it started in:
///
/// ```text
/// Chunk 0: "S1 S2 S3 S4"
/// Chunk 1:       "S3 S4 S5 S6"   <- S3 S4 fit the overlap token budget
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// The chunk text.
    pub content: String,
    /// Zero-based position of this chunk in the sequence.
    pub chunk_index: usize,
    /// Character offset where this chunk starts.
    pub start_char: usize,
    /// Character offset where this chunk ends (exclusive).
    pub end_char: usize,
    /// Number of tokens in `content` under the chunker's encoding.
    pub token_count: usize,
    /// Pages this chunk spans, ascending and without duplicates.
    pub page_numbers: Vec<u32>,
}

impl Chunk {
    /// Create a new chunk starting at `start_char`.
    ///
    /// The end offset is derived from the content length.
    #[must_use]
    pub fn new(
        content: impl Into<String>,
        chunk_index: usize,
        token_count: usize,
        start_char: usize,
        page_numbers: Vec<u32>,
    ) -> Self {
        let content = content.into();
        let end_char = start_char + content.chars().count();
        Self {
            content,
            chunk_index,
            start_char,
            end_char,
            token_count,
            page_numbers,
        }
    }

    /// The length of this chunk in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end_char - self.start_char
    }

    /// Whether this chunk is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// The character span of this chunk in the source text.
    #[must_use]
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start_char..self.end_char
    }

    /// The first page this chunk touches, if known.
    #[must_use]
    pub fn first_page(&self) -> Option<u32> {
        self.page_numbers.first().copied()
    }

    /// The last page this chunk touches, if known.
    #[must_use]
    pub fn last_page(&self) -> Option<u32> {
        self.page_numbers.last().copied()
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunk {{ index: {}, span: {}..{}, tokens: {}, pages: {:?} }}",
            self.chunk_index, self.start_char, self.end_char, self.token_count, self.page_numbers
        )
    }
}
