//! In-memory reference implementations of the index collaborators.

use crate::index::adapter::{JudgmentStore, StatsProvider};
use crate::index::tokenizer::term_counts;
use crate::types::{DocId, QueryId, QueryTerm, TermStats};
use std::collections::{HashMap, HashSet};

/// In-memory inverted index over plain-text documents.
///
/// Enough collaborator to drive the scoring and evaluation core in tests
/// and demos; real deployments plug in their own [`StatsProvider`] over a
/// persistent index. Each document id is expected to be added once.
pub struct InMemIndex {
    postings: HashMap<String, HashMap<DocId, f64>>,
    doc_lengths: HashMap<DocId, f64>,
    total_length: f64,
}

impl InMemIndex {
    /// Create a new empty in-memory index.
    pub fn new() -> Self {
        Self {
            postings: HashMap::new(),
            doc_lengths: HashMap::new(),
            total_length: 0.0,
        }
    }

    /// Build an index from `(doc_id, text)` pairs.
    pub fn from_documents<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = (DocId, &'a str)>,
    {
        let mut index = Self::new();
        for (doc_id, text) in documents {
            index.add_document(doc_id, text);
        }
        index
    }

    /// Tokenize a document and fold it into the postings.
    pub fn add_document(&mut self, doc_id: DocId, text: &str) {
        let counts = term_counts(text);
        let length: f64 = counts.values().sum();

        for (term, count) in counts {
            self.postings.entry(term).or_default().insert(doc_id, count);
        }

        self.doc_lengths.insert(doc_id, length);
        self.total_length += length;
    }

    /// Average document length in tokens, 0.0 for an empty collection.
    pub fn avg_doc_len(&self) -> f64 {
        if self.doc_lengths.is_empty() {
            0.0
        } else {
            self.total_length / self.doc_lengths.len() as f64
        }
    }
}

impl Default for InMemIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsProvider for InMemIndex {
    fn num_docs(&self) -> u64 {
        self.doc_lengths.len() as u64
    }

    fn candidates(&self, term: &str) -> Vec<DocId> {
        let mut docs: Vec<DocId> = match self.postings.get(term) {
            Some(posting) => posting.keys().copied().collect(),
            None => return Vec::new(),
        };
        // Posting lists come out of a HashMap; sort so iteration order is
        // reproducible for callers that care.
        docs.sort_unstable();
        docs
    }

    fn lookup(&self, term: &QueryTerm, doc_id: DocId) -> Option<TermStats> {
        let posting = self.postings.get(&term.text)?;
        let doc_term_count = *posting.get(&doc_id)?;
        let doc_size = *self.doc_lengths.get(&doc_id)?;

        Some(TermStats {
            doc_count: posting.len() as u64,
            num_docs: self.num_docs(),
            doc_term_count,
            doc_size,
            avg_dl: self.avg_doc_len(),
            query_term_weight: term.weight,
        })
    }
}

/// In-memory relevance judgments keyed by query id.
#[derive(Debug, Clone, Default)]
pub struct InMemJudgments {
    relevant: HashMap<QueryId, HashSet<DocId>>,
}

impl InMemJudgments {
    /// Create an empty judgment store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the set of relevant documents for a query.
    pub fn insert<I>(&mut self, query_id: QueryId, docs: I)
    where
        I: IntoIterator<Item = DocId>,
    {
        self.relevant
            .entry(query_id)
            .or_default()
            .extend(docs);
    }
}

impl JudgmentStore for InMemJudgments {
    fn relevant_documents(&self, query_id: QueryId) -> HashSet<DocId> {
        self.relevant.get(&query_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> InMemIndex {
        InMemIndex::from_documents([
            (1, "the quick brown fox"),
            (2, "the lazy dog"),
            (3, "quick quick slow"),
        ])
    }

    #[test]
    fn candidates_are_sorted_posting_lists() {
        let index = corpus();
        assert_eq!(index.candidates("quick"), vec![1, 3]);
        assert_eq!(index.candidates("the"), vec![1, 2]);
        assert!(index.candidates("missing").is_empty());
    }

    #[test]
    fn lookup_builds_consistent_stats() {
        let index = corpus();
        let term = QueryTerm {
            text: "quick".to_string(),
            weight: 2.0,
        };

        let stats = index.lookup(&term, 3).unwrap();
        assert_eq!(stats.doc_count, 2);
        assert_eq!(stats.num_docs, 3);
        assert_eq!(stats.doc_term_count, 2.0);
        assert_eq!(stats.doc_size, 3.0);
        assert!((stats.avg_dl - 10.0 / 3.0).abs() < 1e-12);
        assert_eq!(stats.query_term_weight, 2.0);
    }

    #[test]
    fn lookup_unknown_pair_is_none() {
        let index = corpus();
        let term = QueryTerm {
            text: "fox".to_string(),
            weight: 1.0,
        };
        assert!(index.lookup(&term, 2).is_none());
    }

    #[test]
    fn judgments_default_to_empty() {
        let mut judgments = InMemJudgments::new();
        judgments.insert(7, [1, 2]);

        assert_eq!(judgments.relevant_documents(7).len(), 2);
        assert!(judgments.relevant_documents(8).is_empty());
    }
}
