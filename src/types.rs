//! Core data types for the rankeval harness.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Type alias for document identifiers.
///
/// Using a dedicated type alias makes it easier to change the underlying type
/// of the identifier in the future if needed. It also improves readability.
pub type DocId = u64;

/// Type alias for query identifiers, used to look up relevance judgments.
pub type QueryId = u64;

/// The sufficient statistics for scoring one (query term, document) pair.
///
/// A `TermStats` value is created fresh by the statistics provider for every
/// pair the retriever scores, and is read-only to the ranking function. All
/// fields are non-negative; `avg_dl` is strictly positive for any non-empty
/// collection, and `doc_count` never exceeds `num_docs`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermStats {
  /// Number of documents in the collection containing the term.
  pub doc_count: u64,
  /// Total number of documents in the collection.
  pub num_docs: u64,
  /// Number of occurrences of the term in the scored document.
  pub doc_term_count: f64,
  /// Length of the scored document, in tokens.
  pub doc_size: f64,
  /// Average document length across the collection, in tokens.
  pub avg_dl: f64,
  /// Weight of the term within the query, usually its query frequency.
  pub query_term_weight: f64,
}

/// A single query term together with its in-query weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryTerm {
  /// The normalized term text.
  pub text: String,
  /// The term's weight within the query, usually its frequency.
  pub weight: f64,
}

/// A parsed query: the unique terms to score, each with its weight.
///
/// Terms are held in first-occurrence order so that retrieval over the same
/// query text always walks posting lists in the same order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
  /// The unique query terms with their weights.
  pub terms: Vec<QueryTerm>,
}

impl Query {
  /// Builds a query from raw text using the crate's reference tokenizer.
  ///
  /// Tokenization policy belongs to the index side of the system; this
  /// helper exists for hosts that start from a raw query line (one per line
  /// of a query file) and use the in-memory collaborators.
  pub fn from_text(text: &str) -> Self {
    let mut terms: Vec<QueryTerm> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for token in crate::index::tokenizer::tokenize(text) {
      match seen.get(&token) {
        Some(&at) => terms[at].weight += 1.0,
        None => {
          seen.insert(token.clone(), terms.len());
          terms.push(QueryTerm { text: token, weight: 1.0 });
        }
      }
    }

    Self { terms }
  }

  /// Returns `true` when the query has no scoreable terms.
  pub fn is_empty(&self) -> bool {
    self.terms.is_empty()
  }
}

/// One entry of a ranked result list.
///
/// Ranked lists are ordered by `score` descending; documents with equal
/// scores are ordered by ascending `doc_id` so that retrieval output is
/// reproducible run to run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
  /// The identifier of the matched document.
  pub doc_id: DocId,
  /// The accumulated relevance score across all query terms.
  pub score: f64,
}

impl ScoredDocument {
  /// Creates a new scored document entry.
  pub fn new(doc_id: DocId, score: f64) -> Self {
    Self { doc_id, score }
  }
}
