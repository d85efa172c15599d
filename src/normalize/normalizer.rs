//! Key normalizer
//!
//! Produces the binary sort key for a heading: diacritics folded, configured
//! punctuation dropped, case folded, whitespace collapsed. The resulting
//! UTF-8 bytes compare in browse order.

use super::diacritics::strip_diacritics;

/// Punctuation dropped from sort keys unless a source configures its own set.
pub const DEFAULT_DROP_CHARS: &str = "[]',./-";

/// Maximum byte length of a term used as a sort anchor or display value.
const MAX_TERM_BYTES: usize = 255;

/// Deterministic display-text to sort-key function.
///
/// Not injective: distinct texts may normalize identically, in which case
/// the builder's assignment order breaks the tie.
#[derive(Debug, Clone)]
pub struct Normalizer {
    drop_chars: Vec<char>,
}

impl Normalizer {
    /// Normalizer with the default dropped-punctuation set
    pub fn new() -> Self {
        Self::with_drop_chars(DEFAULT_DROP_CHARS)
    }

    /// Normalizer with a source-specific dropped-punctuation set
    pub fn with_drop_chars(drop_chars: &str) -> Self {
        Self {
            drop_chars: drop_chars.chars().collect(),
        }
    }

    /// Compute the binary sort key for a heading.
    pub fn normalize(&self, text: &str) -> Vec<u8> {
        let folded = strip_diacritics(text);

        let mut out = String::with_capacity(folded.len());
        let mut pending_space = false;

        for ch in folded.chars() {
            if self.drop_chars.contains(&ch) {
                continue;
            }
            if ch.is_whitespace() {
                pending_space = !out.is_empty();
                continue;
            }
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
        }

        out.into_bytes()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncate an over-long term at a token boundary.
///
/// Terms longer than 255 bytes are cut at the first space at or after byte
/// 255; cutting at a space can never split a multi-byte character. A term
/// with no space past the limit is kept whole.
pub fn truncate_term(term: &str) -> &str {
    if term.len() <= MAX_TERM_BYTES {
        return term;
    }
    for (idx, ch) in term.char_indices() {
        if idx >= MAX_TERM_BYTES && ch == ' ' {
            return &term[..idx];
        }
    }
    term
}
