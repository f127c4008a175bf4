//! Top-k retrieval over posting lists.

use crate::error::{Error, Result};
use crate::index::adapter::StatsProvider;
use crate::ranker::RankingFunction;
use crate::types::{DocId, Query, ScoredDocument};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use tracing::debug;

/// The top-k retriever: accumulates per-document scores across all query
/// terms and selects the k best.
///
/// The retriever is the piece that lets one evaluation pipeline drive any
/// [`RankingFunction`]: it owns a boxed ranker, asks the statistics provider
/// for each term's candidates and statistics, and sums the ranker's partial
/// scores per document. Only documents matching at least one query term are
/// ever touched (sparse accumulation), and selection uses a bounded
/// min-heap, so a retrieval costs time proportional to the posting lists
/// processed plus `O(n log k)`, never a full sort of the candidate set.
///
/// Output ordering is deterministic: score descending, equal scores by
/// ascending document id.
pub struct Retriever {
  /// The scoring strategy applied to every (term, document) pair.
  ranker: Box<dyn RankingFunction>,
}

impl Retriever {
  /// Creates a retriever around the given ranking function.
  pub fn new(ranker: Box<dyn RankingFunction>) -> Self {
    Self { ranker }
  }

  /// Retrieves the `k` highest-scoring documents for a query.
  ///
  /// # Arguments
  ///
  /// * `query` - The parsed query terms with their weights.
  /// * `provider` - The statistics provider for the collection snapshot.
  ///   Queried read-only; a provider that reports a candidate and then
  ///   fails to produce its statistics violates its contract and surfaces
  ///   as an error here.
  /// * `k` - How many documents to return. `0` yields an empty list.
  ///
  /// # Returns
  ///
  /// Up to `k` scored documents, best first.
  pub fn retrieve(
    &self,
    query: &Query,
    provider: &dyn StatsProvider,
    k: usize,
  ) -> Result<Vec<ScoredDocument>> {
    if k == 0 || query.is_empty() {
      return Ok(Vec::new());
    }

    let mut totals: HashMap<DocId, f64> = HashMap::new();

    for term in &query.terms {
      for doc_id in provider.candidates(&term.text) {
        let stats = provider.lookup(term, doc_id).ok_or_else(|| {
          Error::undefined_score(format!(
            "provider reported document {doc_id} as a candidate for '{}' but returned no statistics",
            term.text
          ))
        })?;

        let partial = self.ranker.score_term(&stats)?;
        *totals.entry(doc_id).or_insert(0.0) += partial;
      }
    }

    debug!(
      terms = query.terms.len(),
      candidates = totals.len(),
      k,
      "accumulated term scores"
    );

    // Bounded min-heap: the worst kept candidate sits on top and is evicted
    // whenever a better one arrives.
    let mut heap: BinaryHeap<Reverse<Candidate>> = BinaryHeap::with_capacity(k + 1);

    for (doc_id, score) in totals {
      let candidate = Candidate { score, doc_id };
      if heap.len() < k {
        heap.push(Reverse(candidate));
      } else if let Some(Reverse(worst)) = heap.peek() {
        if candidate > *worst {
          heap.pop();
          heap.push(Reverse(candidate));
        }
      }
    }

    let ranked = heap
      .into_sorted_vec()
      .into_iter()
      .map(|Reverse(c)| ScoredDocument::new(c.doc_id, c.score))
      .collect();

    Ok(ranked)
  }
}

/// A heap entry ordered best-first: higher score wins, equal scores go to
/// the smaller document id.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
  score: f64,
  doc_id: DocId,
}

impl Eq for Candidate {}

impl Ord for Candidate {
  fn cmp(&self, other: &Self) -> Ordering {
    // Scores are finite by the ranking contract, so total_cmp agrees with
    // the usual ordering.
    self
      .score
      .total_cmp(&other.score)
      .then_with(|| other.doc_id.cmp(&self.doc_id))
  }
}

impl PartialOrd for Candidate {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::index::memory::InMemIndex;
  use crate::rankers::Bm25;
  use crate::types::Query;

  fn retriever() -> Retriever {
    Retriever::new(Box::new(Bm25::default()))
  }

  fn corpus() -> InMemIndex {
    InMemIndex::from_documents([
      (1, "rust search engine"),
      (2, "search ranking with rust"),
      (3, "cooking recipes"),
      (4, "ranking search search"),
    ])
  }

  #[test]
  fn only_matching_documents_are_candidates() {
    let ranked = retriever()
      .retrieve(&Query::from_text("search"), &corpus(), 10)
      .unwrap();

    let ids: Vec<DocId> = ranked.iter().map(|d| d.doc_id).collect();
    assert!(!ids.contains(&3));
    assert_eq!(ids.len(), 3);
  }

  #[test]
  fn k_zero_returns_an_empty_list() {
    let ranked = retriever()
      .retrieve(&Query::from_text("search"), &corpus(), 0)
      .unwrap();
    assert!(ranked.is_empty());
  }

  #[test]
  fn empty_query_returns_an_empty_list() {
    let ranked = retriever().retrieve(&Query::default(), &corpus(), 10).unwrap();
    assert!(ranked.is_empty());
  }

  #[test]
  fn scores_come_out_descending() {
    let ranked = retriever()
      .retrieve(&Query::from_text("rust search ranking"), &corpus(), 10)
      .unwrap();

    for pair in ranked.windows(2) {
      assert!(pair[0].score >= pair[1].score);
    }
  }

  #[test]
  fn retrieval_is_deterministic() {
    let retriever = retriever();
    let corpus = corpus();
    let query = Query::from_text("rust search ranking");

    let first = retriever.retrieve(&query, &corpus, 3).unwrap();
    let second = retriever.retrieve(&query, &corpus, 3).unwrap();
    assert_eq!(first, second);
  }

  #[test]
  fn ties_break_by_ascending_doc_id() {
    // Two identical documents score identically; the smaller id must come
    // first, and must also win the single top-1 slot.
    let index = InMemIndex::from_documents([
      (9, "alpha beta"),
      (4, "alpha beta"),
      (7, "gamma delta"),
    ]);
    let retriever = retriever();
    let query = Query::from_text("alpha");

    let both = retriever.retrieve(&query, &index, 10).unwrap();
    assert_eq!(both[0].doc_id, 4);
    assert_eq!(both[1].doc_id, 9);
    assert_eq!(both[0].score, both[1].score);

    let top1 = retriever.retrieve(&query, &index, 1).unwrap();
    assert_eq!(top1.len(), 1);
    assert_eq!(top1[0].doc_id, 4);
  }

  #[test]
  fn scores_accumulate_across_terms() {
    let retriever = retriever();
    let corpus = corpus();

    let combined = retriever
      .retrieve(&Query::from_text("rust ranking"), &corpus, 10)
      .unwrap();
    let rust_only = retriever
      .retrieve(&Query::from_text("rust"), &corpus, 10)
      .unwrap();

    // Document 2 matches both terms, so its combined score must exceed its
    // single-term score.
    let combined_2 = combined.iter().find(|d| d.doc_id == 2).unwrap().score;
    let rust_2 = rust_only.iter().find(|d| d.doc_id == 2).unwrap().score;
    assert!(combined_2 > rust_2);
  }

  #[test]
  fn heap_selection_matches_a_full_sort() {
    let retriever = retriever();
    let corpus = corpus();
    let query = Query::from_text("rust search ranking");

    let all = retriever.retrieve(&query, &corpus, 100).unwrap();
    let top2 = retriever.retrieve(&query, &corpus, 2).unwrap();
    assert_eq!(&all[..2], &top2[..]);
  }
}
