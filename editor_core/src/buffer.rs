//! Scratch buffer for in-progress edits, backed by ropey.

use ropey::Rope;

/// A text buffer backed by a rope data structure.
///
/// Holds uncommitted text while a file is being edited. It is never
/// highlighted; only committed content is.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    /// Creates a new empty text buffer.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Creates a text buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Replaces the whole buffer.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    /// Returns true if the buffer holds exactly `text`.
    pub fn matches(&self, text: &str) -> bool {
        if self.rope.len_bytes() != text.len() {
            return false;
        }
        let mut rest = text.as_bytes();
        for chunk in self.rope.chunks() {
            let (head, tail) = rest.split_at(chunk.len());
            if head != chunk.as_bytes() {
                return false;
            }
            rest = tail;
        }
        true
    }

    /// Returns the total number of characters in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Inserts a string at the given character index.
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        let idx = char_idx.min(self.len_chars());
        self.rope.insert(idx, text);
    }

    /// Removes text in the given character range.
    pub fn remove(&mut self, start: usize, end: usize) {
        let start = start.min(self.len_chars());
        let end = end.min(self.len_chars());
        if start < end {
            self.rope.remove(start..end);
        }
    }

    /// Returns the entire buffer as a string.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buf = TextBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len_chars(), 0);
        assert!(buf.matches(""));
    }

    #[test]
    fn test_insert_and_remove() {
        let mut buf = TextBuffer::new();
        buf.insert(0, "hello");
        buf.insert(5, " world");
        assert_eq!(buf.text(), "hello world");

        buf.remove(5, 11);
        assert_eq!(buf.text(), "hello");

        // Out of range indices clamp
        buf.insert(100, "!");
        buf.remove(3, 100);
        assert_eq!(buf.text(), "hel");
    }

    #[test]
    fn test_matches() {
        let buf = TextBuffer::from_text("fn main() {}\n");
        assert!(buf.matches("fn main() {}\n"));
        assert!(!buf.matches("fn main() {}"));
        assert!(!buf.matches("fn main() {]\n"));
    }

    #[test]
    fn test_matches_across_chunks() {
        let long = "héllo wörld\n".repeat(2000);
        let buf = TextBuffer::from_text(&long);
        assert!(buf.matches(&long));

        let mut other = long.clone();
        other.pop();
        other.push('x');
        assert!(!buf.matches(&other));
    }

    #[test]
    fn test_set_text_replaces_everything() {
        let mut buf = TextBuffer::from_text("old text");
        buf.set_text("new");
        assert_eq!(buf.len_chars(), 3);
        assert!(buf.matches("new"));
        assert!(!buf.matches("old text"));
    }
}
