//! Text processing module for storyvoice
//!
//! Provides sentence splitting and size-bounded chunk building.

mod chunker;
mod sentence;

pub use chunker::{build_chunks, Chunk};
pub use sentence::{split_sentences, TERMINATORS};

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WORD_REGEX: Regex = Regex::new(r"\S+").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// Split text into sentences, then group them into chunks of at most
/// `max_size` characters
pub fn segment_text(text: &str, max_size: usize) -> Vec<Chunk> {
    let sentences = split_sentences(text);
    build_chunks(&sentences, max_size)
}

/// Summary figures for a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStats {
    pub characters: usize,
    pub words: usize,
    pub sentences: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        Self {
            characters: text.chars().count(),
            words: count_words(text),
            sentences: split_sentences(text).len(),
        }
    }
}

/// Count whitespace-delimited words
pub fn count_words(text: &str) -> usize {
    WORD_REGEX.find_iter(text).count()
}

/// Collapse whitespace and cut to at most `max_chars` characters, for logs
pub fn preview(text: &str, max_chars: usize) -> String {
    let collapsed = WHITESPACE_REGEX.replace_all(text.trim(), " ");
    if collapsed.chars().count() <= max_chars {
        return collapsed.into_owned();
    }
    let mut cut: String = collapsed.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_text() {
        let text = "This is sentence one. This is sentence two. This is sentence three.";
        let chunks = segment_text(text, 50);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "This is sentence one. This is sentence two.");
        assert_eq!(chunks[1].text, "This is sentence three.");
    }

    #[test]
    fn test_segment_empty_text() {
        assert!(segment_text("", 100).is_empty());
    }

    #[test]
    fn test_text_stats() {
        let stats = TextStats::of("Hello  world.\nHow are you?");
        assert_eq!(stats.words, 5);
        assert_eq!(stats.sentences, 2);
        assert_eq!(stats.characters, 26);
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("  a\n\n b  ", 10), "a b");
        assert_eq!(preview("héllo wörld", 5), "héllo...");
    }
}
