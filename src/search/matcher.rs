//! Literal substring matching with optional case folding.
//!
//! Case folding is done per character with [`char::to_lowercase`], which can
//! change byte lengths (`'İ'` folds to two chars). Matches found in the folded
//! copy are mapped back to byte ranges of the original text, so callers can
//! slice the original for previews.

use std::ops::Range;

/// Fold a string for case-insensitive comparison
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Folded copy of a text plus, for each folded byte, the byte offset of the
/// original char that produced it
struct FoldedText {
    folded: String,
    origin: Vec<usize>,
}

impl FoldedText {
    fn new(text: &str) -> Self {
        let mut folded = String::with_capacity(text.len());
        let mut origin = Vec::with_capacity(text.len());

        for (offset, ch) in text.char_indices() {
            for lower in ch.to_lowercase() {
                let before = folded.len();
                folded.push(lower);
                origin.extend(std::iter::repeat_n(offset, folded.len() - before));
            }
        }

        Self { folded, origin }
    }

    /// Map a range in the folded copy back onto `original`
    fn to_original(&self, original: &str, range: Range<usize>) -> Range<usize> {
        let start = self.origin[range.start];
        let last = self.origin[range.end - 1];
        let end = last + original[last..].chars().next().map_or(0, char::len_utf8);
        start..end
    }
}

/// A prepared query
#[derive(Debug, Clone)]
pub struct Matcher {
    needle: String,
    case_sensitive: bool,
}

impl Matcher {
    pub fn new(query: &str, case_sensitive: bool) -> Self {
        let needle = if case_sensitive { query.to_string() } else { fold_case(query) };
        Self { needle, case_sensitive }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn is_match(&self, text: &str) -> bool {
        if self.is_empty() {
            return false;
        }
        if self.case_sensitive {
            text.contains(self.needle.as_str())
        } else {
            fold_case(text).contains(self.needle.as_str())
        }
    }

    /// Byte range of the first occurrence in `text`
    pub fn find_first(&self, text: &str) -> Option<Range<usize>> {
        if self.is_empty() {
            return None;
        }
        if self.case_sensitive {
            return text.find(self.needle.as_str()).map(|start| start..start + self.needle.len());
        }

        let folded = FoldedText::new(text);
        folded
            .folded
            .find(self.needle.as_str())
            .map(|start| folded.to_original(text, start..start + self.needle.len()))
    }

    /// Byte ranges of every non-overlapping occurrence in `text`, in order
    pub fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        if self.is_empty() {
            return Vec::new();
        }
        if self.case_sensitive {
            return text
                .match_indices(self.needle.as_str())
                .map(|(start, m)| start..start + m.len())
                .collect();
        }

        let folded = FoldedText::new(text);
        let mut ranges: Vec<Range<usize>> = Vec::new();
        for (start, m) in folded.folded.match_indices(self.needle.as_str()) {
            let range = folded.to_original(text, start..start + m.len());
            // A char that folds to several chars can yield two folded matches
            // mapping onto the same original char.
            if ranges.last().is_some_and(|prev| range.start < prev.end) {
                continue;
            }
            ranges.push(range);
        }
        ranges
    }
}
