//! The narrow interfaces this crate requires from its index collaborators.

use crate::types::{DocId, QueryId, QueryTerm, TermStats};
use std::collections::HashSet;

/// A trait supplying the per-term, per-document statistics the rankers need.
///
/// `StatsProvider` abstracts over the inverted index: how postings are
/// built, stored, and read is entirely the provider's business. The scoring
/// core only asks which documents a term matches and for the sufficient
/// statistics of each (term, document) pair.
///
/// All answers must be consistent with a single fixed collection snapshot
/// for the duration of one query. The `Send` and `Sync` bounds allow one
/// provider to serve parallel batch workers; every method is read-only.
pub trait StatsProvider: Send + Sync {
  /// Returns the total number of documents in the collection.
  fn num_docs(&self) -> u64;

  /// Returns the posting list for a term: every document containing it.
  ///
  /// An unknown term yields an empty list. A document id must appear at
  /// most once per posting list; the retriever accumulates scores by id,
  /// so a repeated candidate would be double-counted.
  fn candidates(&self, term: &str) -> Vec<DocId>;

  /// Builds the statistics tuple for one (query term, document) pair.
  ///
  /// The returned `TermStats` is created fresh for the pair and carries the
  /// query term's weight through to the ranking function. Returns `None`
  /// when the pair is unknown, which for a document previously reported by
  /// [`candidates`](Self::candidates) is a contract violation the caller
  /// surfaces as an error.
  fn lookup(&self, term: &QueryTerm, doc_id: DocId) -> Option<TermStats>;
}

/// A trait supplying ground-truth relevance judgments.
///
/// The evaluator only ever reads judgments; ownership and storage of the
/// judgment data stay with the implementer.
pub trait JudgmentStore: Send + Sync {
  /// Returns the set of documents judged relevant for a query.
  ///
  /// Queries without judgments yield an empty set, which the evaluator
  /// scores as an average precision of zero.
  fn relevant_documents(&self, query_id: QueryId) -> HashSet<DocId>;
}
