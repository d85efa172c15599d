//! Diacritic folding
//!
//! Decomposes to NFKD, drops combining marks, and substitutes the letters
//! that do not decompose into a base letter plus marks (digraphs, crossed
//! and slashed letters, a few Greek letters common in catalog data).

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold diacritics and special letters into plain ASCII-ish text.
///
/// Case is preserved; callers fold case separately.
pub fn strip_diacritics(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);

    for ch in text.nfkd() {
        if is_combining_mark(ch) {
            continue;
        }

        match ch {
            '\u{00C6}' => out.push_str("AE"), // AE digraph
            '\u{00E6}' => out.push_str("ae"),
            '\u{0152}' => out.push_str("OE"), // OE digraph
            '\u{0153}' => out.push_str("oe"),
            '\u{00DE}' => out.push_str("TH"), // Icelandic thorn
            '\u{00FE}' => out.push_str("th"),
            '\u{0110}' => out.push('D'), // crossed D
            '\u{0111}' => out.push('d'),
            '\u{00D0}' => out.push('D'), // eth
            '\u{00F0}' => out.push('d'),
            '\u{0130}' => out.push('I'), // Turkish I
            '\u{0131}' => out.push('i'),
            '\u{0141}' => out.push('L'), // Polish L
            '\u{0142}' => out.push('l'),
            '\u{00D8}' => out.push('O'), // slashed O
            '\u{00F8}' => out.push('o'),
            '\u{0391}' => out.push('A'), // alpha
            '\u{03B1}' => out.push('a'),
            '\u{0392}' => out.push('B'), // beta
            '\u{03B2}' => out.push('b'),
            '\u{0393}' => out.push('G'), // gamma
            '\u{03B3}' => out.push('g'),
            _ => out.push(ch),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combining_marks_removed() {
        assert_eq!(strip_diacritics("Dvořák"), "Dvorak");
        assert_eq!(strip_diacritics("Müller"), "Muller");
        assert_eq!(strip_diacritics("café"), "cafe");
    }

    #[test]
    fn test_digraphs() {
        assert_eq!(strip_diacritics("Æsop"), "AEsop");
        assert_eq!(strip_diacritics("œuvre"), "oeuvre");
        assert_eq!(strip_diacritics("Þórbergur"), "THorbergur");
    }

    #[test]
    fn test_special_letters() {
        assert_eq!(strip_diacritics("Łódź"), "Lodz");
        assert_eq!(strip_diacritics("Søren"), "Soren");
        assert_eq!(strip_diacritics("Đorđe"), "Dorde");
    }

    #[test]
    fn test_plain_ascii_untouched() {
        assert_eq!(strip_diacritics("Smith, John"), "Smith, John");
    }
}
