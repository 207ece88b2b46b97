//! Searching lines while respecting escaped markup.
//!
//! A character preceded by an odd number of consecutive [`ESCAPE_CHARACTER`]s is escaped and
//! never matches a markup delimiter. Searches return `None` instead of failing.

use crate::LineBuffer;

/// Escapes the character that follows it. Escape markers are removed from the final output.
pub const ESCAPE_CHARACTER: char = '\\';

impl LineBuffer {
    /// Check if the line has no text at all.
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    /// Check if the line is empty or only contains whitespace.
    pub fn is_empty_or_whitespace(&self) -> bool {
        self.as_str().chars().all(char::is_whitespace)
    }

    /// Check if the line is non-empty and made up entirely of `c`.
    pub fn is_exclusively(&self, c: char) -> bool {
        !self.is_empty() && self.as_str().chars().all(|other| other == c)
    }

    /// Check if the line starts with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.as_str().starts_with(prefix)
    }

    /// Find the first `c` at or after `start`.
    pub fn index_of(&self, c: char, start: usize, ignore_case: bool) -> Option<usize> {
        self.as_str()[start..]
            .char_indices()
            .find(|(_, other)| {
                if ignore_case {
                    other.to_lowercase().eq(c.to_lowercase())
                } else {
                    *other == c
                }
            })
            .map(|(index, _)| start + index)
    }

    /// Find the first occurrence of `needle` at or after `start`.
    ///
    /// `ignore_case` only folds ASCII letters.
    pub fn find(&self, needle: &str, start: usize, ignore_case: bool) -> Option<usize> {
        let haystack = &self.as_str().as_bytes()[start..];
        let needle = needle.as_bytes();
        if needle.is_empty() {
            return Some(start);
        }
        haystack
            .windows(needle.len())
            .position(|window| {
                if ignore_case {
                    window.eq_ignore_ascii_case(needle)
                } else {
                    window == needle
                }
            })
            .map(|index| start + index)
    }

    /// Like [`index_of`](LineBuffer::index_of), but skips escaped matches.
    pub fn unescaped_index_of(&self, c: char, start: usize) -> Option<usize> {
        let mut search_from = start;
        while search_from < self.len() {
            let index = self.index_of(c, search_from, false)?;
            if !self.is_escaped(index) {
                return Some(index);
            }
            search_from = index + c.len_utf8();
        }
        None
    }

    /// Like [`find`](LineBuffer::find), but skips matches whose first character is escaped.
    pub fn unescaped_find(&self, needle: &str, start: usize) -> Option<usize> {
        let mut search_from = start;
        while search_from < self.len() {
            let index = self.find(needle, search_from, false)?;
            if !self.is_escaped(index) {
                return Some(index);
            }
            search_from = index + needle.len().max(1);
        }
        None
    }

    /// Find the first whitespace character at or after `start`.
    pub fn index_of_whitespace(&self, start: usize) -> Option<usize> {
        self.as_str()[start..]
            .char_indices()
            .find(|(_, c)| c.is_whitespace())
            .map(|(index, _)| start + index)
    }

    /// Check if the character at `index` is escaped.
    pub fn is_escaped(&self, index: usize) -> bool {
        let preceding_escapes = self.as_str().as_bytes()[..index]
            .iter()
            .rev()
            .take_while(|byte| **byte == ESCAPE_CHARACTER as u8)
            .count();
        // An even count means the escapes escape each other.
        preceding_escapes % 2 == 1
    }
}

/// Drop every escape marker, keeping the character after it. `\\` becomes `\`.
pub(crate) fn remove_escapes(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == ESCAPE_CHARACTER {
            if let Some(escaped) = chars.next() {
                output.push(escaped);
            }
        } else {
            output.push(c);
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescaped_index_of_skips_escaped_chars() {
        let line = LineBuffer::new(r"\[a] [b]");
        assert_eq!(line.index_of('[', 0, false), Some(1));
        assert_eq!(line.unescaped_index_of('[', 0), Some(5));
    }

    #[test]
    fn escaped_escape_does_not_escape() {
        let line = LineBuffer::new(r"\\*a*");
        assert!(!line.is_escaped(2));
        assert_eq!(line.unescaped_index_of('*', 0), Some(2));
    }

    #[test]
    fn unescaped_find_skips_escaped_needles() {
        let line = LineBuffer::new(r"\**x**");
        assert_eq!(line.unescaped_find("**", 0), Some(4));
    }

    #[test]
    fn searches_return_none_past_the_end() {
        let line = LineBuffer::new("abc");
        assert_eq!(line.unescaped_index_of('a', 3), None);
        assert_eq!(line.find("a", 3, false), None);
        assert_eq!(line.index_of_whitespace(3), None);
    }

    #[test]
    fn find_can_ignore_case() {
        let line = LineBuffer::new("see HTTP://x.com");
        assert_eq!(line.find("http://", 0, false), None);
        assert_eq!(line.find("http://", 0, true), Some(4));
    }

    #[test]
    fn index_of_can_ignore_case() {
        let line = LineBuffer::new("abcD");
        assert_eq!(line.index_of('d', 0, true), Some(3));
        assert_eq!(line.index_of('d', 0, false), None);
    }

    #[test]
    fn index_of_whitespace_handles_multibyte_text() {
        let line = LineBuffer::new("é\u{a0}x y");
        assert_eq!(line.index_of_whitespace(0), Some(2));
        assert_eq!(line.index_of_whitespace(4), Some(5));
    }

    #[test]
    fn is_exclusively_requires_content() {
        assert!(!LineBuffer::new("").is_exclusively('='));
        assert!(LineBuffer::new("===").is_exclusively('='));
        assert!(!LineBuffer::new("== ").is_exclusively('='));
    }

    #[test]
    fn empty_or_whitespace() {
        assert!(LineBuffer::new("").is_empty_or_whitespace());
        assert!(LineBuffer::new(" \t").is_empty_or_whitespace());
        assert!(!LineBuffer::new(" \t").is_empty());
    }

    #[test]
    fn remove_escapes_keeps_escaped_chars() {
        assert_eq!(remove_escapes(r"\*a\* \\ \"), r"*a* \ ");
    }
}
