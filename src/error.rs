//! Error types for pagechunk.

/// Errors that can occur while configuring a chunker.
///
/// Chunking itself never fails: malformed input degrades to coarser chunks
/// or empty page attribution. Only construction is fallible.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid chunk size (must be > 0).
    #[error("invalid chunk size: {0} (must be > 0)")]
    InvalidChunkSize(usize),

    /// Overlap is not strictly smaller than the chunk size.
    #[error("overlap {overlap} must be smaller than chunk size {size}")]
    OverlapExceedsSize {
        /// The chunk size.
        size: usize,
        /// The overlap that was too large.
        overlap: usize,
    },

    /// The default tokenizer encoding could not be loaded.
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// A configuration document or override could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for pagechunk operations.
pub type Result<T> = std::result::Result<T, Error>;
