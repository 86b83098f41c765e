//! Page attribution.
//!
//! Documents arrive as pages. Before chunking they are joined into one text
//! with a blank line between pages, and the offset at which each page begins
//! is recorded:
//!
//! ```text
//! pages:  (1, "Page one text.")  (2, "Page two text.")  (3, "...")
//! text:   "Page one text.\n\nPage two text.\n\n..."
//!          ^                 ^                 ^
//! map:     0 -> 1            16 -> 2           32 -> 3
//! ```
//!
//! A chunk covering `start..=end` is attributed to every page that begins
//! inside that range. A page that begins before `start` is only picked up
//! when it directly continues an already attributed page; the map records
//! page starts, not page ends, so a chunk that starts mid-page and ends
//! on the same page gets no attribution.

use std::collections::{BTreeMap, BTreeSet};

/// Separator placed between page texts when they are joined.
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Character offset at which each page begins, mapped to its page number.
///
/// ```rust
/// use pagechunk::PageMap;
///
/// let (text, map) = PageMap::from_pages(&[(1, "Page one."), (2, "Page two.")]);
/// assert_eq!(text, "Page one.\n\nPage two.");
/// assert_eq!(map.page_at(12), Some(2));
/// assert_eq!(map.pages_for_range(0, 20), vec![1, 2]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMap {
    starts: BTreeMap<usize, u32>,
}

impl PageMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Join pages with [`PAGE_SEPARATOR`], recording where each one starts.
    ///
    /// Offsets are character offsets into the returned text.
    pub fn from_pages<S: AsRef<str>>(pages: &[(u32, S)]) -> (String, Self) {
        let mut map = Self::new();
        let mut text = String::new();
        let mut offset = 0;

        for (i, (page, page_text)) in pages.iter().enumerate() {
            if i > 0 {
                text.push_str(PAGE_SEPARATOR);
                offset += PAGE_SEPARATOR.len();
            }
            let page_text = page_text.as_ref();
            map.insert(offset, *page);
            text.push_str(page_text);
            offset += page_text.chars().count();
        }

        (text, map)
    }

    /// Record that `page` begins at character `offset`.
    pub fn insert(&mut self, offset: usize, page: u32) {
        self.starts.insert(offset, page);
    }

    /// Number of recorded pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    /// Whether no pages are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Iterate `(offset, page)` pairs in offset order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.starts.iter().map(|(&offset, &page)| (offset, page))
    }

    /// The page whose text contains `offset`.
    #[must_use]
    pub fn page_at(&self, offset: usize) -> Option<u32> {
        self.starts
            .range(..=offset)
            .next_back()
            .map(|(_, &page)| page)
    }

    /// Pages spanned by the character range `start..=end`.
    ///
    /// Returned ascending, without duplicates.
    #[must_use]
    pub fn pages_for_range(&self, start: usize, end: usize) -> Vec<u32> {
        let mut pages = BTreeSet::new();

        for (offset, page) in self.iter() {
            if offset > end {
                break;
            }
            let continues = pages
                .last()
                .is_some_and(|&last: &u32| page.checked_sub(1) == Some(last));
            if offset >= start || continues {
                pages.insert(page);
            }
        }

        pages.into_iter().collect()
    }
}

/// Pages spanned by `start..=end`, or none when there is no map.
#[must_use]
pub fn pages_for_range(start: usize, end: usize, page_map: Option<&PageMap>) -> Vec<u32> {
    page_map.map_or_else(Vec::new, |map| map.pages_for_range(start, end))
}

impl FromIterator<(usize, u32)> for PageMap {
    fn from_iter<I: IntoIterator<Item = (usize, u32)>>(iter: I) -> Self {
        Self {
            starts: iter.into_iter().collect(),
        }
    }
}
