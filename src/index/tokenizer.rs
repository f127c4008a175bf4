//! Text tokenization for the in-memory index.
//!
//! Tokenization policy is the index side's concern; the scoring core never
//! sees raw text. This is the reference policy used by
//! [`InMemIndex`](crate::index::InMemIndex): unicode word boundaries,
//! lowercased.

use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

/// Tokenize text into lowercased words.
pub fn tokenize(text: &str) -> Vec<String> {
  text
    .unicode_words()
    .map(|word| word.to_lowercase())
    .collect()
}

/// Count term occurrences in a text, as floats for use in `TermStats`.
pub fn term_counts(text: &str) -> HashMap<String, f64> {
  let mut counts = HashMap::new();

  for token in tokenize(text) {
    *counts.entry(token).or_insert(0.0) += 1.0;
  }

  counts
}
