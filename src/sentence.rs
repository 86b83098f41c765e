//! Sentence splitting.
//!
//! A sentence ends at `.`, `!` or `?` followed by whitespace:
//!
//! ```text
//! "It works. Really?\n\nYes!"
//!          ^        ^^^
//!          split    split (the whole whitespace run is consumed)
//!
//! -> ["It works. ", "Really? ", "Yes!"]
//! ```
//!
//! Every sentence except the last gets exactly one trailing space, so
//! joining sentences reads naturally even when the source separated them
//! with newlines or runs of spaces. Whitespace inside a sentence is kept.
//!
//! This is deliberately simple: "Dr. Smith" splits after "Dr.". Chunk
//! boundaries only need to be plausible, and overlap repairs the damage.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("sentence boundary pattern is valid"));

/// One sentence, borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Sentence<'a> {
    /// The trimmed sentence text.
    pub(crate) body: &'a str,
    /// Whether a single space follows the body.
    pub(crate) trailing_space: bool,
    /// Character offset of `body` in the source.
    pub(crate) start: usize,
}

impl<'a> Sentence<'a> {
    /// The normalized sentence text, including its trailing space.
    pub(crate) fn text(&self) -> Cow<'a, str> {
        if self.trailing_space {
            Cow::Owned(format!("{} ", self.body))
        } else {
            Cow::Borrowed(self.body)
        }
    }
}

/// Split `text` into sentences.
///
/// Empty or whitespace-only input yields no sentences, and no returned
/// sentence is blank.
pub(crate) fn split_sentences(text: &str) -> Vec<Sentence<'_>> {
    // Raw pieces as (byte offset, slice); terminators stay with their sentence.
    let mut pieces = Vec::new();
    let mut from = 0;
    for m in BOUNDARY.find_iter(text) {
        // Terminators are single-byte ASCII.
        pieces.push((from, &text[from..=m.start()]));
        from = m.end();
    }
    pieces.push((from, &text[from..]));

    let last = pieces.len() - 1;
    let mut sentences = Vec::with_capacity(pieces.len());
    let mut cursor = CharCursor::new(text);

    for (i, (offset, piece)) in pieces.into_iter().enumerate() {
        let body = piece.trim();
        if body.is_empty() {
            continue;
        }
        let leading = piece.len() - piece.trim_start().len();
        sentences.push(Sentence {
            body,
            trailing_space: i < last,
            start: cursor.advance_to(offset + leading),
        });
    }

    sentences
}

/// Converts increasing byte offsets into character offsets without
/// rescanning from the start each time.
struct CharCursor<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            byte: 0,
            chars: 0,
        }
    }

    fn advance_to(&mut self, byte: usize) -> usize {
        debug_assert!(byte >= self.byte, "offsets must not go backwards");
        self.chars += self.text[self.byte..byte].chars().count();
        self.byte = byte;
        self.chars
    }
}
