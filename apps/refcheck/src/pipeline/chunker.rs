use std::collections::VecDeque;

/// Recursive character splitter.
///
/// Text is split on the coarsest separator it contains; pieces still longer
/// than `chunk_size` are split again with the next separator, down to single
/// characters. Adjacent small pieces are merged back up to `chunk_size`, and
/// each chunk repeats up to `chunk_overlap` characters from the end of the
/// previous one. Lengths are counted in characters.
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: &'static [&'static str],
}

pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// The empty separator means "split into characters".
const SEPARATORS: &[&str] = &["\n\n", "\n", ". ", " ", ""];

impl RecursiveChunker {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size - 1),
            separators: SEPARATORS,
        }
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        self.split_with(text, self.separators)
    }

    fn split_with(&self, text: &str, separators: &[&str]) -> Vec<String> {
        let idx = separators
            .iter()
            .position(|s| s.is_empty() || text.contains(s))
            .unwrap_or(separators.len());
        let separator = separators.get(idx).copied().unwrap_or("");
        let finer = separators.get(idx + 1..).unwrap_or(&[]);

        let pieces: Vec<&str> = if separator.is_empty() {
            text.char_indices()
                .map(|(i, c)| &text[i..i + c.len_utf8()])
                .collect()
        } else {
            text.split(separator).filter(|p| !p.is_empty()).collect()
        };

        let mut chunks = Vec::new();
        let mut small: Vec<&str> = Vec::new();
        for piece in pieces {
            if char_len(piece) < self.chunk_size {
                small.push(piece);
                continue;
            }
            if !small.is_empty() {
                chunks.extend(self.merge(&small, separator));
                small.clear();
            }
            if finer.is_empty() {
                chunks.push(piece.to_string());
            } else {
                chunks.extend(self.split_with(piece, finer));
            }
        }
        if !small.is_empty() {
            chunks.extend(self.merge(&small, separator));
        }
        chunks
    }

    fn merge(&self, pieces: &[&str], separator: &str) -> Vec<String> {
        let separator_len = char_len(separator);
        let mut chunks = Vec::new();
        let mut window: VecDeque<&str> = VecDeque::new();
        let mut total = 0;

        for &piece in pieces {
            let len = char_len(piece);
            let joiner = if window.is_empty() { 0 } else { separator_len };

            if total + len + joiner > self.chunk_size && !window.is_empty() {
                push_joined(&mut chunks, &window, separator);

                // Drop from the front until only the overlap remains and the
                // next piece fits.
                while total > self.chunk_overlap
                    || (total > 0 && total + len + separator_len > self.chunk_size)
                {
                    let extra = if window.len() > 1 { separator_len } else { 0 };
                    match window.pop_front() {
                        Some(front) => total -= char_len(front) + extra,
                        None => break,
                    }
                }
            }

            window.push_back(piece);
            total += len;
            if window.len() > 1 {
                total += separator_len;
            }
        }
        push_joined(&mut chunks, &window, separator);
        chunks
    }
}

impl Default for RecursiveChunker {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
    }
}

fn push_joined(chunks: &mut Vec<String>, window: &VecDeque<&str>, separator: &str) {
    let joined = window.iter().copied().collect::<Vec<_>>().join(separator);
    let joined = joined.trim();
    if !joined.is_empty() {
        chunks.push(joined.to_string());
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunks = RecursiveChunker::default().split("  Jane Doe\nEngineer  ");
        assert_eq!(chunks, vec!["Jane Doe\nEngineer"]);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        assert!(RecursiveChunker::default().split("").is_empty());
    }

    #[test]
    fn test_paragraphs_are_kept_apart_when_too_big_together() {
        let text = format!("{}\n\n{}", "a".repeat(600), "b".repeat(600));
        let chunks = RecursiveChunker::default().split(&text);
        assert_eq!(chunks, vec!["a".repeat(600), "b".repeat(600)]);
    }

    #[test]
    fn test_overlap_repeats_tail_of_previous_chunk() {
        let chunks = RecursiveChunker::new(10, 4).split("aa bb cc dd ee ff");
        assert_eq!(chunks, vec!["aa bb cc", "cc dd ee", "ee ff"]);
    }

    #[test]
    fn test_unbroken_text_falls_back_to_characters() {
        let text = "x".repeat(2500);
        let chunks = RecursiveChunker::default().split(&text);
        assert!(chunks.len() >= 3);
        assert_eq!(chunks[0].len(), DEFAULT_CHUNK_SIZE);
        assert!(chunks.iter().all(|c| c.chars().count() <= DEFAULT_CHUNK_SIZE));
    }

    #[test]
    fn test_long_prose_respects_chunk_size() {
        let text = "Managed a team of five engineers. ".repeat(120);
        let chunks = RecursiveChunker::default().split(&text);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= DEFAULT_CHUNK_SIZE));
    }
}
