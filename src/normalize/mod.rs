//! Sort-key normalization for browse headings
//!
//! Display text is folded into a comparable byte key so that the byte-wise
//! lexicographic order of keys is the browse order shown to users.
//!
//! # Invariants
//!
//! - `normalize` is pure and deterministic
//! - Two texts differing only in case, diacritics, or dropped punctuation
//!   produce identical keys
//! - Truncation never splits a multi-byte character

mod diacritics;
mod normalizer;

pub use diacritics::strip_diacritics;
pub use normalizer::{truncate_term, Normalizer, DEFAULT_DROP_CHARS};
