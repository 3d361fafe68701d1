//! Punctuation-based sentence splitting

/// Characters that end a sentence
pub const TERMINATORS: [char; 3] = ['.', '?', '!'];

/// Split text into trimmed sentences, keeping each terminator.
///
/// Every `.`, `?` and `!` ends a sentence, including those inside
/// abbreviations ("Mr. Smith") or decimals ("3.14"). Text after the last
/// terminator becomes a final sentence of its own. Empty pieces are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for (pos, ch) in text.char_indices() {
        if TERMINATORS.contains(&ch) {
            let end = pos + ch.len_utf8();
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, piece: &str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}
