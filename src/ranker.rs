//! The `RankingFunction` trait, which defines the scoring contract.

use crate::error::Result;
use crate::types::TermStats;

/// A trait for relevance-scoring strategies.
///
/// A `RankingFunction` converts the statistics of one (query term, document)
/// pair into that term's partial contribution to the document's relevance
/// score. The retriever sums these contributions over every term shared
/// between the query and the document, so one retriever and one evaluator
/// can drive any number of statistically distinct ranking formulas.
///
/// Implementations must be pure: the score depends only on the supplied
/// `TermStats` and the parameters fixed at construction. No hidden state, no
/// I/O. The `Send` and `Sync` bounds allow one ranker to be shared by
/// parallel batch workers.
pub trait RankingFunction: Send + Sync {
  /// Scores one term-document pair.
  ///
  /// # Arguments
  ///
  /// * `stats` - The sufficient statistics for the pair, supplied by the
  ///   statistics provider. The provider contract guarantees a non-zero
  ///   `doc_count` for any term it reported as matching; a violation makes
  ///   the formula undefined and is returned as
  ///   [`Error::UndefinedScore`](crate::error::Error::UndefinedScore)
  ///   rather than leaking a NaN into the accumulated scores.
  ///
  /// # Returns
  ///
  /// The term's partial relevance score. Finite for every valid input.
  fn score_term(&self, stats: &TermStats) -> Result<f64>;
}
