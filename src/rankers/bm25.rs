//! The ATIRE formulation of the Okapi BM25 ranking function.

use crate::error::Result;
use crate::ranker::RankingFunction;
use crate::rankers::{check_common_params, check_stats, length_norm, query_term_smoothing};
use crate::types::TermStats;

/// ATIRE-style BM25.
///
/// Scores a term-document pair as `TF * IDF * QTF` with
/// `IDF = log2(num_docs / doc_count)` and the classic saturating
/// term-frequency normalization. The plain `num_docs / doc_count` IDF goes
/// to zero when a term occurs in every document and is undefined when
/// `doc_count` is zero, which the provider contract rules out.
#[derive(Debug, Clone, Copy)]
pub struct Bm25 {
  /// Term-frequency saturation. Higher values let repeated terms keep
  /// raising the score; lower values saturate quickly. Must be `>= 0`.
  pub k1: f64,
  /// Document-length normalization, from 0.0 (none) to 1.0 (full).
  pub b: f64,
  /// Query-term-frequency smoothing. Must be `>= 0`.
  pub k3: f64,
}

impl Default for Bm25 {
  /// The reference parameter set: `k1 = 1.2, b = 0.75, k3 = 500`.
  fn default() -> Self {
    Self {
      k1: 1.2,
      b: 0.75,
      k3: 500.0,
    }
  }
}

impl Bm25 {
  /// Creates a BM25 ranker, validating the parameters.
  pub fn new(k1: f64, b: f64, k3: f64) -> Result<Self> {
    check_common_params(k1, b, k3)?;
    Ok(Self { k1, b, k3 })
  }
}

impl RankingFunction for Bm25 {
  fn score_term(&self, stats: &TermStats) -> Result<f64> {
    check_stats(stats)?;

    let idf = (stats.num_docs as f64 / stats.doc_count as f64).log2();
    let tf = ((self.k1 + 1.0) * stats.doc_term_count)
      / (self.k1 * length_norm(self.b, stats) + stats.doc_term_count);
    let qtf = query_term_smoothing(self.k3, stats.query_term_weight);

    Ok(tf * idf * qtf)
  }
}
