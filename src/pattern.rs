//! Predicates applied to log stream chunks.

/// A text-matching predicate applied to each raw log chunk.
///
/// Implemented for [regex::Regex] and for plain strings, where matching
/// means substring containment.
pub trait OutputPattern {
    /// Whether this pattern matches the given chunk.
    fn is_match(&self, chunk: &str) -> bool;
}

impl OutputPattern for regex::Regex {
    fn is_match(&self, chunk: &str) -> bool {
        regex::Regex::is_match(self, chunk)
    }
}

impl OutputPattern for str {
    fn is_match(&self, chunk: &str) -> bool {
        chunk.contains(self)
    }
}

impl OutputPattern for String {
    fn is_match(&self, chunk: &str) -> bool {
        chunk.contains(self.as_str())
    }
}
