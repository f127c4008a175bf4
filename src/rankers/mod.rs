//! The built-in `RankingFunction` implementations.
//!
//! All three variants share the same term-frequency and query-term-frequency
//! shape and differ only in how they normalize inverse document frequency
//! and whether they shift the term-frequency component. The shared pieces
//! live here so the variants cannot drift apart.
//!
//! # Available rankers
//!
//! - [`Bm25`]: the ATIRE formulation of Okapi BM25.
//! - [`Bm25L`]: shifts the normalized term frequency by `delta` to correct
//!   BM25's bias against long documents.
//! - [`Bm25Plus`]: lower-bounds the term-frequency contribution by `delta`.
//!
//! All logarithms are base 2, so scores stay comparable across the three
//! variants and with the original reference values.

/// The ATIRE BM25 ranking function.
pub mod bm25;
/// The BM25L ranking function.
pub mod bm25l;
/// The BM25+ ranking function.
pub mod bm25plus;

pub use bm25::Bm25;
pub use bm25l::Bm25L;
pub use bm25plus::Bm25Plus;

use crate::error::{Error, Result};
use crate::types::TermStats;

/// Pivoted length normalization shared by every variant's TF component:
/// `(1 - b) + b * doc_size / avg_dl`.
pub(crate) fn length_norm(b: f64, stats: &TermStats) -> f64 {
  (1.0 - b) + b * stats.doc_size / stats.avg_dl
}

/// Query-term-frequency smoothing shared by every variant:
/// `(k3 + 1) * w / (k3 + w)`, saturating at `k3 + 1` for large weights.
pub(crate) fn query_term_smoothing(k3: f64, weight: f64) -> f64 {
  ((k3 + 1.0) * weight) / (k3 + weight)
}

/// Checks the provider contract before a formula divides by anything.
///
/// A term the provider reported as matching must have a non-zero document
/// frequency, and a non-empty collection has a positive average document
/// length. Violations make the formulas undefined.
pub(crate) fn check_stats(stats: &TermStats) -> Result<()> {
  if stats.doc_count == 0 {
    return Err(Error::undefined_score(
      "document frequency is zero for a matched term",
    ));
  }
  if stats.doc_count > stats.num_docs {
    return Err(Error::undefined_score(format!(
      "document frequency {} exceeds collection size {}",
      stats.doc_count, stats.num_docs
    )));
  }
  if stats.avg_dl <= 0.0 {
    return Err(Error::undefined_score(
      "average document length is not positive",
    ));
  }
  Ok(())
}

/// Validates the parameters common to every variant.
pub(crate) fn check_common_params(k1: f64, b: f64, k3: f64) -> Result<()> {
  if !(k1 >= 0.0) {
    return Err(Error::config("k1", format!("must be >= 0, got {k1}")));
  }
  if !(0.0..=1.0).contains(&b) {
    return Err(Error::config("b", format!("must be within [0, 1], got {b}")));
  }
  if !(k3 >= 0.0) {
    return Err(Error::config("k3", format!("must be >= 0, got {k3}")));
  }
  Ok(())
}

/// Validates the `delta` shift parameter of BM25L and BM25+.
pub(crate) fn check_delta(delta: f64) -> Result<()> {
  if !(delta >= 0.0) {
    return Err(Error::config(
      "delta",
      format!("must be >= 0, got {delta}"),
    ));
  }
  Ok(())
}
