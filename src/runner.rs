//! Batch orchestration: feed queries through retrieval and evaluation.

use crate::config::RunnerConfig;
use crate::error::Result;
use crate::eval::{average_precision, EvalSession};
use crate::index::adapter::{JudgmentStore, StatsProvider};
use crate::ranker::RankingFunction;
use crate::retriever::Retriever;
use crate::types::{Query, QueryId};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One query's evaluated outcome within a batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryOutcome {
    /// The judgment identifier of the query.
    pub query_id: QueryId,
    /// The query's average precision at the configured cutoff.
    pub average_precision: f64,
}

/// The result of one batch run: per-query outcomes in query order, plus the
/// finished evaluation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Every evaluated query, in the order the source produced them.
    pub outcomes: Vec<QueryOutcome>,
    session: EvalSession,
}

impl BatchReport {
    /// Mean average precision over the batch.
    ///
    /// Fails with [`Error::EmptySession`](crate::error::Error::EmptySession)
    /// when the query source was empty.
    pub fn mean_average_precision(&self) -> Result<f64> {
        self.session.mean_average_precision()
    }

    /// The underlying evaluation session, e.g. for folding several batches
    /// together.
    pub fn session(&self) -> &EvalSession {
        &self.session
    }
}

/// Opens a query file as a lazy line iterator, one query per line.
///
/// The sequence is finite and not restartable mid-stream; call again to
/// restart from the beginning.
pub fn query_lines(path: impl AsRef<Path>) -> Result<impl Iterator<Item = io::Result<String>>> {
    let file = File::open(path)?;
    Ok(BufReader::new(file).lines())
}

/// Drives a query batch through retrieval and evaluation.
///
/// The runner is thin orchestration around the core: it owns the configured
/// [`Retriever`], numbers queries from `query_id_start` in source order,
/// looks up each query's judgments, and records average precision into a
/// fresh [`EvalSession`] per run.
pub struct QueryRunner {
    retriever: Retriever,
    top_k: usize,
    query_id_start: QueryId,
}

impl QueryRunner {
    /// Creates a runner from explicit parts.
    pub fn new(ranker: Box<dyn RankingFunction>, top_k: usize, query_id_start: QueryId) -> Self {
        Self {
            retriever: Retriever::new(ranker),
            top_k,
            query_id_start,
        }
    }

    /// Creates a runner from a validated configuration.
    ///
    /// Fails with a configuration error when the configured ranker
    /// parameters are out of range.
    pub fn from_config(config: &RunnerConfig) -> Result<Self> {
        Ok(Self::new(
            config.ranker.build()?,
            config.top_k,
            config.query_id_start,
        ))
    }

    /// Runs a batch sequentially.
    ///
    /// Consumes the query source line by line; query `n` of the source is
    /// evaluated against the judgments of `query_id_start + n`. Queries
    /// that tokenize to nothing retrieve an empty list and are still
    /// recorded, so every source line contributes to the mean.
    pub fn run<I>(
        &self,
        queries: I,
        provider: &dyn StatsProvider,
        judgments: &dyn JudgmentStore,
    ) -> Result<BatchReport>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        let mut session = EvalSession::new();
        let mut outcomes = Vec::new();

        for (offset, line) in queries.into_iter().enumerate() {
            let line = line?;
            let query_id = self.query_id_start + offset as QueryId;
            let outcome = self.evaluate_one(query_id, &line, provider, judgments)?;

            session.record(outcome.average_precision);
            outcomes.push(outcome);
        }

        info!(queries = session.query_count(), "batch complete");
        Ok(BatchReport { outcomes, session })
    }

    /// Runs a batch across rayon workers.
    ///
    /// The query source is drained up front (it is not restartable), the
    /// per-query work fans out, and each worker folds its results into a
    /// local [`EvalSession`]; the partial sessions are merged once at the
    /// end, so no lock is touched on the scoring path.
    #[cfg(feature = "parallel")]
    pub fn run_parallel<I>(
        &self,
        queries: I,
        provider: &dyn StatsProvider,
        judgments: &dyn JudgmentStore,
    ) -> Result<BatchReport>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        let lines: Vec<String> = queries.into_iter().collect::<io::Result<_>>()?;

        let (mut outcomes, session) = lines
            .par_iter()
            .enumerate()
            .map(|(offset, line)| {
                let query_id = self.query_id_start + offset as QueryId;
                self.evaluate_one(query_id, line, provider, judgments)
            })
            .try_fold(
                || (Vec::new(), EvalSession::new()),
                |(mut outcomes, mut session), outcome: Result<QueryOutcome>| {
                    let outcome = outcome?;
                    session.record(outcome.average_precision);
                    outcomes.push(outcome);
                    Ok((outcomes, session))
                },
            )
            .try_reduce(
                || (Vec::new(), EvalSession::new()),
                |(mut left, mut left_session), (right, right_session)| {
                    left.extend(right);
                    left_session.merge(right_session);
                    Ok((left, left_session))
                },
            )?;

        // Workers finish out of order; restore source order for reporting.
        outcomes.sort_unstable_by_key(|o| o.query_id);

        info!(queries = session.query_count(), "parallel batch complete");
        Ok(BatchReport { outcomes, session })
    }

    fn evaluate_one(
        &self,
        query_id: QueryId,
        line: &str,
        provider: &dyn StatsProvider,
        judgments: &dyn JudgmentStore,
    ) -> Result<QueryOutcome> {
        let query = Query::from_text(line.trim());
        let ranked = self.retriever.retrieve(&query, provider, self.top_k)?;
        let relevant = judgments.relevant_documents(query_id);
        let avg_p = average_precision(&ranked, &relevant, self.top_k);

        debug!(
            query_id,
            retrieved = ranked.len(),
            relevant = relevant.len(),
            average_precision = avg_p,
            "evaluated query"
        );

        Ok(QueryOutcome {
            query_id,
            average_precision: avg_p,
        })
    }
}
