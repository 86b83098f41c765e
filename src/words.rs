//! Word-level fallback for sentences that exceed the chunk budget.
//!
//! Words are packed greedily until the next one would overflow the budget.
//! The last three words of each piece are repeated at the start of the next:
//!
//! ```text
//! budget = 6 tokens, 1 token per word
//!
//! "a b c d e f g h i j"
//!  [a b c d e f]
//!        [d e f g h i]
//!              [g h i j]
//! ```
//!
//! The carry is counted in words, then shortened from the front if it would
//! leave no room for the next word. A single word larger than the budget still becomes its own oversized
//! piece; there is nothing smaller to split on.

use crate::pages::pages_for_range;
use crate::{Chunk, PageMap, TokenCounter};

/// Words repeated at the start of the next piece.
pub(crate) const CARRY_WORDS: usize = 3;

/// Split one oversized sentence into word-packed chunks.
///
/// `start_char` is the sentence's offset in the source. Returned chunks are
/// indexed from zero; the caller renumbers them into its own sequence.
pub(crate) fn split_long(
    text: &str,
    start_char: usize,
    chunk_size: usize,
    counter: &dyn TokenCounter,
    page_map: Option<&PageMap>,
) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut words: Vec<&str> = Vec::new();
    let mut tokens = 0;
    let mut start = start_char;

    for word in text.split_whitespace() {
        let word_tokens = counter.count_tokens(&format!("{word} "));

        if tokens + word_tokens > chunk_size && !words.is_empty() {
            let chunk = build_piece(&words, chunks.len(), start, counter, page_map);
            let end = chunk.end_char;
            chunks.push(chunk);

            let (carry, carry_tokens) = carry_tail(&words, word_tokens, chunk_size, counter);
            start = end - carry.join(" ").chars().count();
            words = carry;
            tokens = carry_tokens;
        }

        words.push(word);
        tokens += word_tokens;
    }

    if !words.is_empty() {
        chunks.push(build_piece(&words, chunks.len(), start, counter, page_map));
    }

    chunks
}

/// The words to repeat in the next piece, and their token count.
///
/// Pieces of [`CARRY_WORDS`] words or fewer carry nothing. Leading carry
/// words are dropped while they would push the incoming word over budget.
fn carry_tail<'a>(
    words: &[&'a str],
    incoming_tokens: usize,
    chunk_size: usize,
    counter: &dyn TokenCounter,
) -> (Vec<&'a str>, usize) {
    if words.len() <= CARRY_WORDS {
        return (Vec::new(), 0);
    }

    let mut carry = &words[words.len() - CARRY_WORDS..];
    loop {
        let carry_tokens = counter.count_tokens(&carry.join(" "));
        if carry.is_empty() || carry_tokens + incoming_tokens <= chunk_size {
            return (carry.to_vec(), carry_tokens);
        }
        carry = &carry[1..];
    }
}

fn build_piece(
    words: &[&str],
    index: usize,
    start: usize,
    counter: &dyn TokenCounter,
    page_map: Option<&PageMap>,
) -> Chunk {
    let content = words.join(" ");
    let token_count = counter.count_tokens(&content);
    let end = start + content.chars().count();
    Chunk::new(
        content,
        index,
        token_count,
        start,
        pages_for_range(start, end, page_map),
    )
}
