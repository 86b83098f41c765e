//! Chunker configuration.
//!
//! ## Budgets Are Tokens
//!
//! Both `chunk_size` and `chunk_overlap` are measured in tokens of the
//! configured encoding, because the consumer is a language model whose
//! context window is a token count:
//!
//! ```text
//! chunk_size = 1000, chunk_overlap = 200
//!
//! Chunk 0: [S1 .. S9 ]              <= 1000 tokens
//! Chunk 1:         [S8 S9 .. S17]   S8 S9 <= 200 tokens carried over
//! ```
//!
//! The overlap must be strictly smaller than the chunk size, otherwise a
//! chunk could consist of nothing but carried-over text. Bad settings are
//! rejected at construction, never mid-document.
//!
//! ## Sources
//!
//! A config can be built in code, parsed from TOML, and then adjusted with
//! `CHUNK_SIZE`, `CHUNK_OVERLAP` and `CHUNK_ENCODING` environment variables.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Environment variable overriding [`ChunkerConfig::chunk_size`].
pub const ENV_CHUNK_SIZE: &str = "CHUNK_SIZE";
/// Environment variable overriding [`ChunkerConfig::chunk_overlap`].
pub const ENV_CHUNK_OVERLAP: &str = "CHUNK_OVERLAP";
/// Environment variable overriding [`ChunkerConfig::encoding`].
pub const ENV_CHUNK_ENCODING: &str = "CHUNK_ENCODING";

/// Token budgets and tokenizer choice for a chunker.
///
/// # Examples
///
/// ```rust
/// use pagechunk::ChunkerConfig;
///
/// let config = ChunkerConfig::default();
/// assert_eq!(config.chunk_size, 1000);
/// assert_eq!(config.chunk_overlap, 200);
/// assert_eq!(config.encoding, "cl100k_base");
///
/// let config = ChunkerConfig::new(100, 20).with_encoding("o200k_base");
/// assert!(config.validate().is_ok());
///
/// assert!(ChunkerConfig::new(100, 100).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Token budget per chunk.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Token budget for the tail carried into the next chunk.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Tokenizer encoding name, e.g. `cl100k_base`.
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    200
}

fn default_encoding() -> String {
    crate::Encoding::default().name().to_string()
}

impl ChunkerConfig {
    /// Create a config with the default encoding.
    #[must_use]
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            encoding: default_encoding(),
        }
    }

    /// Set the chunk size.
    #[must_use]
    pub fn with_chunk_size(self, chunk_size: usize) -> Self {
        Self { chunk_size, ..self }
    }

    /// Set the overlap budget.
    #[must_use]
    pub fn with_chunk_overlap(self, chunk_overlap: usize) -> Self {
        Self {
            chunk_overlap,
            ..self
        }
    }

    /// Set the tokenizer encoding name.
    ///
    /// Unknown names are accepted here; the token counter falls back to the
    /// default encoding when it is built.
    #[must_use]
    pub fn with_encoding(self, encoding: impl Into<String>) -> Self {
        Self {
            encoding: encoding.into(),
            ..self
        }
    }

    /// Check the budgets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChunkSize`] if `chunk_size == 0`, or
    /// [`Error::OverlapExceedsSize`] if `chunk_overlap >= chunk_size`.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::InvalidChunkSize(self.chunk_size));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(Error::OverlapExceedsSize {
                size: self.chunk_size,
                overlap: self.chunk_overlap,
            });
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    ///
    /// Missing keys take their defaults.
    ///
    /// ```rust
    /// use pagechunk::ChunkerConfig;
    ///
    /// let config = ChunkerConfig::from_toml_str("chunk_size = 512").unwrap();
    /// assert_eq!(config.chunk_size, 512);
    /// assert_eq!(config.chunk_overlap, 200);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on malformed TOML, or a validation error.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `CHUNK_SIZE`, `CHUNK_OVERLAP` and `CHUNK_ENCODING` from the
    /// process environment, then validate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a numeric variable does not parse, or a
    /// validation error for the resulting budgets.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(value) = lookup(ENV_CHUNK_SIZE) {
            self.chunk_size = parse_budget(ENV_CHUNK_SIZE, &value)?;
        }
        if let Some(value) = lookup(ENV_CHUNK_OVERLAP) {
            self.chunk_overlap = parse_budget(ENV_CHUNK_OVERLAP, &value)?;
        }
        if let Some(value) = lookup(ENV_CHUNK_ENCODING) {
            self.encoding = value.trim().to_string();
        }
        self.validate()?;
        Ok(self)
    }
}

fn parse_budget(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("{key}={value:?} is not a token count: {e}")))
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self::new(default_chunk_size(), default_chunk_overlap())
    }
}
