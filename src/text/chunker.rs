//! Size-bounded chunk building

/// One unit of synthesis work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position in the chunk sequence (0-based)
    pub index: usize,
    /// Text sent to the synthesis service
    pub text: String,
}

impl Chunk {
    /// Length in characters
    pub fn len(&self) -> usize {
        char_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the chunk is a single word that alone exceeds `max_size`
    pub fn is_oversized_word(&self, max_size: usize) -> bool {
        self.len() > max_size && !self.text.contains(char::is_whitespace)
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Accumulates text into chunks of at most `max_size` characters
struct ChunkAccumulator {
    max_size: usize,
    chunks: Vec<Chunk>,
    buffer: String,
    buffer_len: usize,
}

impl ChunkAccumulator {
    fn new(max_size: usize) -> Self {
        Self {
            max_size,
            chunks: Vec::new(),
            buffer: String::new(),
            buffer_len: 0,
        }
    }

    /// Would appending `piece_len` characters (plus a space) overflow the buffer?
    fn would_overflow(&self, piece_len: usize) -> bool {
        let separator = usize::from(self.buffer_len > 0);
        self.buffer_len + separator + piece_len > self.max_size
    }

    fn append(&mut self, piece: &str, piece_len: usize) {
        if self.buffer_len > 0 {
            self.buffer.push(' ');
            self.buffer_len += 1;
        }
        self.buffer.push_str(piece);
        self.buffer_len += piece_len;
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let index = self.chunks.len();
        self.chunks.push(Chunk {
            index,
            text: std::mem::take(&mut self.buffer),
        });
        self.buffer_len = 0;
    }

    /// Pack an oversized sentence word by word; the last group is flushed too
    fn push_words(&mut self, sentence: &str) {
        self.flush();
        for word in sentence.split_whitespace() {
            let word_len = char_len(word);
            if self.would_overflow(word_len) {
                self.flush();
            }
            self.append(word, word_len);
        }
        self.flush();
    }

    fn push_sentence(&mut self, sentence: &str) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            return;
        }

        let sentence_len = char_len(sentence);
        if sentence_len > self.max_size {
            self.push_words(sentence);
            return;
        }

        if self.would_overflow(sentence_len) {
            self.flush();
        }
        self.append(sentence, sentence_len);
    }

    fn finish(mut self) -> Vec<Chunk> {
        self.flush();
        self.chunks
    }
}

/// Group sentences into chunks of at most `max_size` characters.
///
/// Sentences are joined with a single space. A sentence longer than
/// `max_size` is split on whitespace and packed into its own chunks; a single
/// word longer than `max_size` is kept whole. A `max_size` of zero is
/// treated as one.
pub fn build_chunks<S: AsRef<str>>(sentences: &[S], max_size: usize) -> Vec<Chunk> {
    let mut acc = ChunkAccumulator::new(max_size.max(1));
    for sentence in sentences {
        acc.push_sentence(sentence.as_ref());
    }
    acc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::split_sentences;

    fn texts(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    fn non_whitespace(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn test_oversized_sentence_is_word_split() {
        let chunks = build_chunks(&["Hello world.", "Hi."], 10);
        assert_eq!(texts(&chunks), vec!["Hello", "world.", "Hi."]);
        let indices: Vec<usize> = chunks.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_sentences_are_packed() {
        let chunks = build_chunks(&["One.", "Two.", "Three.", "Four."], 10);
        assert_eq!(texts(&chunks), vec!["One. Two.", "Three.", "Four."]);
    }

    #[test]
    fn test_sentence_exactly_filling_the_limit() {
        let chunks = build_chunks(&["abcd.", "efghi.", "jk."], 5);
        // "efghi." is 6 chars and gets its own word chunk
        assert_eq!(texts(&chunks), vec!["abcd.", "efghi.", "jk."]);

        let chunks = build_chunks(&["ab.", "c."], 6);
        assert_eq!(texts(&chunks), vec!["ab. c."]);
    }

    #[test]
    fn test_indivisible_word_kept_verbatim() {
        let word = "Supercalifragilisticexpialidocious";
        let sentence = format!("A {} b.", word);
        let chunks = build_chunks(&[sentence.as_str()], 8);
        assert_eq!(texts(&chunks), vec!["A", word, "b."]);
        assert!(chunks[1].is_oversized_word(8));
    }

    #[test]
    fn test_no_sentences_no_chunks() {
        let empty: [&str; 0] = [];
        assert!(build_chunks(&empty, 100).is_empty());
        assert!(build_chunks(&["   "], 100).is_empty());
    }

    #[test]
    fn test_zero_max_size_does_not_lose_words() {
        let chunks = build_chunks(&["a b c."], 0);
        assert_eq!(texts(&chunks), vec!["a", "b", "c."]);
    }

    #[test]
    fn test_size_bound_and_coverage() {
        let text = "The quick brown fox jumps over the lazy dog. \
                    Pack my box with five dozen liquor jugs! \
                    How vexingly quick daft zebras jump? \
                    Sphinx of black quartz, judge my vow. \
                    Antidisestablishmentarianism is long.";
        for max_size in [1, 5, 12, 20, 40, 80, 500] {
            let sentences = split_sentences(text);
            let chunks = build_chunks(&sentences, max_size);

            for chunk in &chunks {
                assert!(!chunk.is_empty());
                assert!(
                    chunk.len() <= max_size || chunk.is_oversized_word(max_size),
                    "chunk {:?} exceeds {}",
                    chunk.text,
                    max_size
                );
            }

            let joined: String = chunks.iter().map(|c| c.text.as_str()).collect();
            assert_eq!(non_whitespace(&joined), non_whitespace(text));
        }
    }

    #[test]
    fn test_chunking_adds_no_terminators() {
        let text = "First sentence here. A much longer second sentence that will \
                    need to be broken across several chunks! Third? Fourth";
        let sentences = split_sentences(text);
        for max_size in [8, 16, 30, 1000] {
            let chunks = build_chunks(&sentences, max_size);
            let joined = texts(&chunks).join(" ");
            assert_eq!(split_sentences(&joined).len(), sentences.len());
        }
    }

    #[test]
    fn test_multibyte_length_counts_characters() {
        // 5 characters, 10 bytes
        let chunks = build_chunks(&["ééééé", "ü."], 8);
        assert_eq!(texts(&chunks), vec!["ééééé ü."]);
    }
}
