//! Token counting.
//!
//! Chunk budgets only mean something if they are counted with the same
//! subword scheme the downstream model uses. A chunk of 1000 `cl100k_base`
//! tokens may be 1100 tokens under another encoding.
//!
//! The chunker depends only on the [`TokenCounter`] trait, so any tokenizer
//! can be plugged in. [`TiktokenCounter`] covers the OpenAI BPE encodings.

use std::sync::Arc;

use tiktoken_rs::CoreBPE;

use crate::{Error, Result};

/// Counts tokens in a string.
///
/// Implementations must be deterministic: the same text always yields the
/// same count.
///
/// Closures work too, which is handy for tests:
///
/// ```rust
/// use pagechunk::TokenCounter;
///
/// let words = |text: &str| text.split_whitespace().count();
/// assert_eq!(words.count_tokens("one two three"), 3);
/// ```
pub trait TokenCounter: Send + Sync {
    /// Number of tokens in `text`.
    fn count_tokens(&self, text: &str) -> usize;
}

impl<F> TokenCounter for F
where
    F: Fn(&str) -> usize + Send + Sync,
{
    fn count_tokens(&self, text: &str) -> usize {
        self(text)
    }
}

/// BPE encodings understood by [`TiktokenCounter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// GPT-4 / GPT-3.5 encoding.
    #[default]
    Cl100kBase,
    /// GPT-4o encoding.
    O200kBase,
    /// Codex encoding.
    P50kBase,
    /// Edit-model encoding.
    P50kEdit,
    /// GPT-3 encoding (also known as `gpt2`).
    R50kBase,
}

impl Encoding {
    /// Look up an encoding by its tiktoken name.
    ///
    /// ```rust
    /// use pagechunk::Encoding;
    ///
    /// assert_eq!(Encoding::from_name("o200k_base"), Some(Encoding::O200kBase));
    /// assert_eq!(Encoding::from_name("gpt2"), Some(Encoding::R50kBase));
    /// assert_eq!(Encoding::from_name("klingon"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "cl100k_base" => Some(Self::Cl100kBase),
            "o200k_base" => Some(Self::O200kBase),
            "p50k_base" => Some(Self::P50kBase),
            "p50k_edit" => Some(Self::P50kEdit),
            "r50k_base" | "gpt2" => Some(Self::R50kBase),
            _ => None,
        }
    }

    /// The tiktoken name of this encoding.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cl100kBase => "cl100k_base",
            Self::O200kBase => "o200k_base",
            Self::P50kBase => "p50k_base",
            Self::P50kEdit => "p50k_edit",
            Self::R50kBase => "r50k_base",
        }
    }

    fn load(self) -> Result<CoreBPE> {
        let bpe = match self {
            Self::Cl100kBase => tiktoken_rs::cl100k_base(),
            Self::O200kBase => tiktoken_rs::o200k_base(),
            Self::P50kBase => tiktoken_rs::p50k_base(),
            Self::P50kEdit => tiktoken_rs::p50k_edit(),
            Self::R50kBase => tiktoken_rs::r50k_base(),
        };
        bpe.map_err(|e| Error::Tokenizer(format!("failed to load {}: {e}", self.name())))
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Token counter backed by a tiktoken BPE.
///
/// Special-token text such as `<|endoftext|>` is counted as ordinary text.
///
/// ```rust
/// use pagechunk::{Encoding, TiktokenCounter, TokenCounter};
///
/// let counter = TiktokenCounter::for_encoding("not-a-real-encoding").unwrap();
/// assert_eq!(counter.encoding(), Encoding::Cl100kBase); // fell back
/// assert!(counter.count_tokens("Hello world") > 0);
/// ```
#[derive(Clone)]
pub struct TiktokenCounter {
    bpe: Arc<CoreBPE>,
    encoding: Encoding,
}

impl TiktokenCounter {
    /// Load a specific encoding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Tokenizer`] if the BPE ranks cannot be loaded.
    pub fn new(encoding: Encoding) -> Result<Self> {
        Ok(Self {
            bpe: Arc::new(encoding.load()?),
            encoding,
        })
    }

    /// Load an encoding by name, falling back to `cl100k_base` when the
    /// name is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Tokenizer`] only if the resolved encoding itself
    /// cannot be loaded.
    pub fn for_encoding(name: &str) -> Result<Self> {
        let encoding = Encoding::from_name(name).unwrap_or_else(|| {
            tracing::warn!(
                requested = name,
                fallback = Encoding::default().name(),
                "unknown tokenizer encoding, using fallback"
            );
            Encoding::default()
        });
        Self::new(encoding)
    }

    /// The encoding actually in use.
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }
}

impl TokenCounter for TiktokenCounter {
    fn count_tokens(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }
}

impl std::fmt::Debug for TiktokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiktokenCounter")
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}
