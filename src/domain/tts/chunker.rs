/// Maximum number of characters sent to the synthesizer in one call
pub const MAX_SEGMENT_LENGTH: usize = 2000;

/// An ordered, immutable slice of the input text sized for one synthesis call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    index: usize,
    text: String,
}

impl TextSegment {
    /// Position of the segment in the input text
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split normalized text into synthesis-sized segments.
///
/// Sentences (ending in `.`, `!` or `?` followed by whitespace) are packed
/// greedily into segments of at most `max_length` characters. A sentence that
/// alone exceeds the limit is cut into `max_length`-sized slices with no
/// regard for word boundaries. Empty input yields a single empty segment.
pub fn chunk_text(text: &str, max_length: usize) -> Vec<TextSegment> {
    let max_length = max_length.max(1);
    let normalized = normalize_whitespace(text);

    if normalized.chars().count() <= max_length {
        return vec![TextSegment {
            index: 0,
            text: normalized,
        }];
    }

    let mut pieces: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for sentence in split_sentences(&normalized) {
        let sentence_len = sentence.chars().count();
        let fits = if current.is_empty() {
            sentence_len <= max_length
        } else {
            current_len + 1 + sentence_len <= max_length
        };

        if fits {
            if !current.is_empty() {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(sentence);
            current_len += sentence_len;
            continue;
        }

        if !current.is_empty() {
            pieces.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if sentence_len > max_length {
            pieces.extend(hard_split(sentence, max_length));
        } else {
            current.push_str(sentence);
            current_len = sentence_len;
        }
    }

    if !current.is_empty() {
        pieces.push(current);
    }

    pieces
        .into_iter()
        .enumerate()
        .map(|(index, text)| TextSegment { index, text })
        .collect()
}

/// Split at every space that directly follows sentence-ending punctuation.
/// Expects whitespace-normalized input.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut after_terminal = false;

    for (i, c) in text.char_indices() {
        if c == ' ' && after_terminal {
            sentences.push(&text[start..i]);
            start = i + 1;
        }
        after_terminal = matches!(c, '.' | '!' | '?');
    }
    sentences.push(&text[start..]);

    sentences
}

fn hard_split(sentence: &str, max_length: usize) -> Vec<String> {
    let chars: Vec<char> = sentence.chars().collect();
    chars
        .chunks(max_length)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
