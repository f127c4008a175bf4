//! Ranking-quality evaluation: average precision and running MAP.

use crate::error::{Error, Result};
use crate::types::{DocId, ScoredDocument};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Average precision of one ranked list against a relevant-document set.
///
/// Walks the first `k` entries in rank order (1-indexed); at every position
/// holding a relevant document it accumulates the precision at that
/// position, and the sum is divided by the total number of relevant
/// documents. Relevant documents the ranking missed therefore still drag
/// the score down.
///
/// A query with no known relevant documents scores exactly `0.0` by policy,
/// not as an error: query batches routinely contain unjudged queries and
/// they must not abort the run.
pub fn average_precision(
    ranked: &[ScoredDocument],
    relevant: &HashSet<DocId>,
    k: usize,
) -> f64 {
    if relevant.is_empty() {
        return 0.0;
    }

    let mut hits = 0u64;
    let mut precision_sum = 0.0;

    for (i, entry) in ranked.iter().take(k).enumerate() {
        if relevant.contains(&entry.doc_id) {
            hits += 1;
            precision_sum += hits as f64 / (i + 1) as f64;
        }
    }

    precision_sum / relevant.len() as f64
}

/// Running aggregate of average precision over one query batch.
///
/// A session is created per batch, fed exactly one [`record`](Self::record)
/// per query, read with
/// [`mean_average_precision`](Self::mean_average_precision), and then
/// dropped; there is no reset. Parallel batches keep one session per worker
/// and fold them together with [`merge`](Self::merge) instead of sharing a
/// locked accumulator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalSession {
    sum_ap: f64,
    query_count: u64,
}

impl EvalSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one query's average precision.
    ///
    /// Must be called exactly once per evaluated query; double-recording a
    /// query would weight it twice in the mean.
    pub fn record(&mut self, avg_p: f64) {
        self.sum_ap += avg_p;
        self.query_count += 1;
    }

    /// Number of queries recorded so far.
    pub fn query_count(&self) -> u64 {
        self.query_count
    }

    /// Mean average precision over every recorded query.
    ///
    /// Fails with [`Error::EmptySession`] when nothing has been recorded;
    /// the caller decides how to report an empty batch.
    pub fn mean_average_precision(&self) -> Result<f64> {
        if self.query_count == 0 {
            return Err(Error::EmptySession);
        }
        Ok(self.sum_ap / self.query_count as f64)
    }

    /// Fold another session into this one.
    ///
    /// The reduce step for parallel evaluation: workers record into local
    /// sessions and the batch merges them once at the end.
    pub fn merge(&mut self, other: EvalSession) {
        self.sum_ap += other.sum_ap;
        self.query_count += other.query_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(ids: &[DocId]) -> Vec<ScoredDocument> {
        ids.iter()
            .enumerate()
            .map(|(i, &id)| ScoredDocument::new(id, 1.0 - i as f64 * 0.1))
            .collect()
    }

    fn relevant(ids: &[DocId]) -> HashSet<DocId> {
        ids.iter().copied().collect()
    }

    #[test]
    fn no_relevant_documents_scores_zero() {
        let ap = average_precision(&ranked(&[1, 2, 3]), &HashSet::new(), 10);
        assert_eq!(ap, 0.0);
    }

    #[test]
    fn single_relevant_document_at_rank_one_is_perfect() {
        let ap = average_precision(&ranked(&[5, 2, 3]), &relevant(&[5]), 10);
        assert_eq!(ap, 1.0);
    }

    #[test]
    fn interleaved_hits_average_their_precisions() {
        // Hits at ranks 1 and 3: AP = (1/1 + 2/3) / 2.
        let ap = average_precision(&ranked(&[1, 2, 3, 4, 5]), &relevant(&[1, 3]), 10);
        assert!((ap - (1.0 + 2.0 / 3.0) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn cutoff_ignores_hits_beyond_k() {
        // The hit at rank 3 falls outside k = 2.
        let ap = average_precision(&ranked(&[1, 2, 3]), &relevant(&[1, 3]), 2);
        assert!((ap - 0.5).abs() < 1e-12);
    }

    #[test]
    fn missed_relevant_documents_lower_the_score() {
        // One of three relevant docs never retrieved.
        let ap = average_precision(&ranked(&[1, 3]), &relevant(&[1, 3, 99]), 10);
        assert!((ap - (1.0 + 1.0) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn map_is_the_plain_mean_of_recorded_aps() {
        let mut session = EvalSession::new();
        session.record(1.0);
        session.record(0.0);
        session.record(0.5);

        assert_eq!(session.query_count(), 3);
        assert!((session.mean_average_precision().unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn empty_session_refuses_to_produce_a_map() {
        let session = EvalSession::new();
        assert!(matches!(
            session.mean_average_precision(),
            Err(Error::EmptySession)
        ));
    }

    #[test]
    fn merge_behaves_like_sequential_recording() {
        let mut left = EvalSession::new();
        left.record(1.0);
        left.record(0.25);

        let mut right = EvalSession::new();
        right.record(0.75);

        left.merge(right);
        assert_eq!(left.query_count(), 3);
        assert!((left.mean_average_precision().unwrap() - 2.0 / 3.0).abs() < 1e-12);
    }
}
