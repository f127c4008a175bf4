//! The BM25+ ranking function.

use crate::error::Result;
use crate::ranker::RankingFunction;
use crate::rankers::{check_common_params, check_delta, check_stats, length_norm, query_term_smoothing};
use crate::types::TermStats;

/// BM25+, a lower-bounded variant of BM25.
///
/// Keeps the classic saturating term-frequency normalization but adds a
/// flat `delta` to it, so any document containing a query term earns at
/// least `delta * IDF * QTF` no matter how long it is. Uses the Robertson
/// odds-style `IDF = log2(1 + (num_docs - doc_count + 0.5) / (doc_count +
/// 0.5))`, which never reaches zero.
#[derive(Debug, Clone, Copy)]
pub struct Bm25Plus {
  /// Term-frequency saturation. Must be `>= 0`.
  pub k1: f64,
  /// Document-length normalization, from 0.0 (none) to 1.0 (full).
  pub b: f64,
  /// Query-term-frequency smoothing. Must be `>= 0`.
  pub k3: f64,
  /// Flat lower bound added to the term-frequency component. Must be
  /// `>= 0`; 1.0 is the usual default.
  pub delta: f64,
}

impl Default for Bm25Plus {
  /// The reference parameter set: `k1 = 1.8, b = 0.75, k3 = 500,
  /// delta = 1.0`.
  fn default() -> Self {
    Self {
      k1: 1.8,
      b: 0.75,
      k3: 500.0,
      delta: 1.0,
    }
  }
}

impl Bm25Plus {
  /// Creates a BM25+ ranker, validating the parameters.
  pub fn new(k1: f64, b: f64, k3: f64, delta: f64) -> Result<Self> {
    check_common_params(k1, b, k3)?;
    check_delta(delta)?;
    Ok(Self { k1, b, k3, delta })
  }
}

impl RankingFunction for Bm25Plus {
  fn score_term(&self, stats: &TermStats) -> Result<f64> {
    check_stats(stats)?;

    let idf = (1.0
      + (stats.num_docs as f64 - stats.doc_count as f64 + 0.5) / (stats.doc_count as f64 + 0.5))
      .log2();
    let tf = ((self.k1 + 1.0) * stats.doc_term_count)
      / (self.k1 * length_norm(self.b, stats) + stats.doc_term_count)
      + self.delta;
    let qtf = query_term_smoothing(self.k3, stats.query_term_weight);

    Ok(tf * idf * qtf)
  }
}
