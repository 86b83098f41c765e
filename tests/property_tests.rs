//! Property-based tests for token-bounded chunking.
//!
//! These tests verify the invariants every chunk sequence must keep:
//! - Indices: `0, 1, .., n-1` with no gaps
//! - Offsets: `end_char - start_char` equals the content length
//! - Tokens: `token_count` is the counter's value for the content
//! - Budget: no chunk exceeds `chunk_size`
//! - Pages: ascending, no duplicates
//! - Coverage: every input word appears in some chunk

use std::collections::BTreeSet;
use std::sync::Arc;

use pagechunk::{Chunk, ChunkerConfig, TextChunker};
use proptest::prelude::*;

// =============================================================================
// Test Generators
// =============================================================================

/// One token per whitespace-delimited word.
fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn word_chunker(size: usize, overlap: usize) -> TextChunker {
    TextChunker::with_counter(ChunkerConfig::new(size, overlap), Arc::new(word_count)).unwrap()
}

/// Generate text with sentence-like structure and occasional long sentences.
fn sentence_like_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (
            prop::string::string_regex("[A-Za-z]{1,12}").unwrap(),
            0usize..12,
            prop::sample::select(vec![" ", "  ", "\n", "\n\n", "\t "]),
        ),
        1..60,
    )
    .prop_map(|words| {
        let mut result = String::new();
        for (word, roll, gap) in words {
            result.push_str(&word);
            match roll {
                0 => result.push('.'),
                1 => result.push('!'),
                2 => result.push('?'),
                _ => {}
            }
            result.push_str(gap);
        }
        result
    })
}

/// Generate a list of pages with increasing page numbers.
fn page_list() -> impl Strategy<Value = Vec<(u32, String)>> {
    prop::collection::vec((1u32..3, sentence_like_text()), 1..6).prop_map(|pages| {
        let mut number = 0;
        pages
            .into_iter()
            .map(|(step, text)| {
                number += step;
                (number, text)
            })
            .collect()
    })
}

/// Budgets with overlap strictly below size.
fn budgets() -> impl Strategy<Value = (usize, usize)> {
    (1usize..40).prop_flat_map(|size| (Just(size), 0..size))
}

// =============================================================================
// Invariant Helpers
// =============================================================================

fn indices_sequential(chunks: &[Chunk]) -> bool {
    chunks.iter().enumerate().all(|(i, c)| c.chunk_index == i)
}

fn offsets_consistent(chunks: &[Chunk]) -> bool {
    chunks
        .iter()
        .all(|c| c.end_char - c.start_char == c.content.chars().count())
}

fn pages_strictly_ascending(chunks: &[Chunk]) -> bool {
    chunks
        .iter()
        .all(|c| c.page_numbers.windows(2).all(|w| w[0] < w[1]))
}

fn words_of(text: &str) -> BTreeSet<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|w| !w.is_empty())
        .collect()
}

fn covers_words(chunks: &[Chunk], text: &str) -> bool {
    let chunk_words: BTreeSet<String> = chunks.iter().flat_map(|c| words_of(&c.content)).collect();
    words_of(text).is_subset(&chunk_words)
}

// =============================================================================
// Sequence Invariants
// =============================================================================

proptest! {
    #[test]
    fn chunk_indices_sequential(text in sentence_like_text(), (size, overlap) in budgets()) {
        let chunks = word_chunker(size, overlap).chunk_text(&text, None);
        prop_assert!(indices_sequential(&chunks));
    }

    #[test]
    fn chunk_offsets_consistent(text in sentence_like_text(), (size, overlap) in budgets()) {
        let chunks = word_chunker(size, overlap).chunk_text(&text, None);
        prop_assert!(offsets_consistent(&chunks));
    }

    #[test]
    fn chunk_token_counts_match(text in sentence_like_text(), (size, overlap) in budgets()) {
        let chunks = word_chunker(size, overlap).chunk_text(&text, None);
        for chunk in &chunks {
            prop_assert_eq!(chunk.token_count, word_count(&chunk.content));
        }
    }

    #[test]
    fn chunks_respect_budget(text in sentence_like_text(), (size, overlap) in budgets()) {
        // With one token per word no single word can exceed the budget.
        let chunks = word_chunker(size, overlap).chunk_text(&text, None);
        for chunk in &chunks {
            prop_assert!(
                chunk.token_count <= size,
                "chunk {} has {} tokens > {}",
                chunk.chunk_index,
                chunk.token_count,
                size
            );
        }
    }

    #[test]
    fn chunks_not_blank(text in sentence_like_text(), (size, overlap) in budgets()) {
        let chunks = word_chunker(size, overlap).chunk_text(&text, None);
        for chunk in &chunks {
            prop_assert!(!chunk.content.trim().is_empty());
            prop_assert_eq!(chunk.content.trim(), chunk.content.as_str());
        }
    }

    #[test]
    fn chunks_cover_all_words(text in sentence_like_text(), (size, overlap) in budgets()) {
        let chunks = word_chunker(size, overlap).chunk_text(&text, None);
        prop_assert!(covers_words(&chunks, &text));
    }

    #[test]
    fn chunk_starts_within_text(text in sentence_like_text(), (size, overlap) in budgets()) {
        let len = text.chars().count();
        let chunks = word_chunker(size, overlap).chunk_text(&text, None);
        for chunk in &chunks {
            prop_assert!(chunk.start_char < len);
        }
    }
}

// =============================================================================
// Page Attribution
// =============================================================================

proptest! {
    #[test]
    fn page_numbers_strictly_ascending(pages in page_list(), (size, overlap) in budgets()) {
        let chunks = word_chunker(size, overlap).chunk_by_pages(&pages);
        prop_assert!(pages_strictly_ascending(&chunks));
    }

    #[test]
    fn page_numbers_come_from_input(pages in page_list(), (size, overlap) in budgets()) {
        let known: BTreeSet<u32> = pages.iter().map(|(n, _)| *n).collect();
        let chunks = word_chunker(size, overlap).chunk_by_pages(&pages);
        for chunk in &chunks {
            for page in &chunk.page_numbers {
                prop_assert!(known.contains(page));
            }
        }
    }

    #[test]
    fn paged_chunks_cover_all_words(pages in page_list(), (size, overlap) in budgets()) {
        let chunks = word_chunker(size, overlap).chunk_by_pages(&pages);
        let joined: Vec<&str> = pages.iter().map(|(_, t)| t.as_str()).collect();
        prop_assert!(covers_words(&chunks, &joined.join("\n\n")));
    }
}

// =============================================================================
// Consistency
// =============================================================================

proptest! {
    #[test]
    fn chunking_is_deterministic(text in sentence_like_text(), (size, overlap) in budgets()) {
        let chunker = word_chunker(size, overlap);
        prop_assert_eq!(chunker.chunk_text(&text, None), chunker.chunk_text(&text, None));
    }

    #[test]
    fn single_chunk_when_under_budget(text in sentence_like_text()) {
        let total = word_count(&text);
        prop_assume!(total > 0);
        let chunks = word_chunker(total, 0).chunk_text(&text, None);
        prop_assert_eq!(chunks.len(), 1);
        prop_assert_eq!(chunks[0].chunk_index, 0);
    }
}
