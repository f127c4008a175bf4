//! The BM25L ranking function.

use crate::error::Result;
use crate::ranker::RankingFunction;
use crate::rankers::{check_common_params, check_delta, check_stats, length_norm, query_term_smoothing};
use crate::types::TermStats;

/// BM25L, a long-document correction of BM25.
///
/// Normalizes the raw term count by document length first
/// (`ctd = doc_term_count / ((1 - b) + b * doc_size / avg_dl)`) and shifts
/// it by `delta` before saturation, so very long documents are not starved
/// of term-frequency credit. The smoothed
/// `IDF = log2((num_docs + 1) / (doc_count + 0.5))` stays positive even for
/// a term occurring in every document.
#[derive(Debug, Clone, Copy)]
pub struct Bm25L {
  /// Term-frequency saturation. Must be `>= 0`.
  pub k1: f64,
  /// Document-length normalization, from 0.0 (none) to 1.0 (full).
  pub b: f64,
  /// Query-term-frequency smoothing. Must be `>= 0`.
  pub k3: f64,
  /// Shift applied to the length-normalized term count. Must be `>= 0`;
  /// 0.5 is the usual best-performing setting.
  pub delta: f64,
}

impl Default for Bm25L {
  /// The reference parameter set: `k1 = 1.2, b = 0.75, k3 = 500,
  /// delta = 0.5`.
  fn default() -> Self {
    Self {
      k1: 1.2,
      b: 0.75,
      k3: 500.0,
      delta: 0.5,
    }
  }
}

impl Bm25L {
  /// Creates a BM25L ranker, validating the parameters.
  pub fn new(k1: f64, b: f64, k3: f64, delta: f64) -> Result<Self> {
    check_common_params(k1, b, k3)?;
    check_delta(delta)?;
    Ok(Self { k1, b, k3, delta })
  }
}

impl RankingFunction for Bm25L {
  fn score_term(&self, stats: &TermStats) -> Result<f64> {
    check_stats(stats)?;

    let idf = ((stats.num_docs as f64 + 1.0) / (stats.doc_count as f64 + 0.5)).log2();
    let ctd = stats.doc_term_count / length_norm(self.b, stats);
    let tf = ((self.k1 + 1.0) * (ctd + self.delta)) / (self.k1 + ctd + self.delta);
    let qtf = query_term_smoothing(self.k3, stats.query_term_weight);

    Ok(tf * idf * qtf)
  }
}
