//! Configuration structs for ranker selection and batch runs.
//!
//! Parsing configuration *files* is the host's job: these are plain serde
//! structs, so any format the host already reads (TOML, YAML, JSON) can
//! produce them. The harness only validates the values and builds the
//! configured ranker.

use crate::error::Result;
use crate::ranker::RankingFunction;
use crate::rankers::{Bm25, Bm25L, Bm25Plus};
use serde::{Deserialize, Serialize};

/// The ranking-function variants this harness ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankerKind {
    /// ATIRE-style BM25.
    Bm25,
    /// BM25L, shifted term-frequency normalization for long documents.
    Bm25L,
    /// BM25+, lower-bounded term-frequency contribution.
    Bm25Plus,
}

/// Ranker selection plus optional parameter overrides.
///
/// Any parameter left unset falls back to the selected variant's default
/// (`k1 = 1.2, b = 0.75, k3 = 500` for BM25 and BM25L, `delta = 0.5` for
/// BM25L, and `k1 = 1.8, delta = 1.0` for BM25+). `delta` is ignored by
/// plain BM25, which has no such parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankerConfig {
    /// Which ranking function to build.
    pub ranker: RankerKind,
    /// Term-frequency saturation, `>= 0`.
    #[serde(default)]
    pub k1: Option<f64>,
    /// Document-length normalization, within `[0, 1]`.
    #[serde(default)]
    pub b: Option<f64>,
    /// Query-term-frequency smoothing, `>= 0`.
    #[serde(default)]
    pub k3: Option<f64>,
    /// Free shift parameter for BM25L and BM25+, `>= 0`.
    #[serde(default)]
    pub delta: Option<f64>,
}

impl RankerConfig {
    /// Creates a configuration selecting `kind` with all-default parameters.
    pub fn new(kind: RankerKind) -> Self {
        Self {
            ranker: kind,
            k1: None,
            b: None,
            k3: None,
            delta: None,
        }
    }

    /// Builds the configured ranking function.
    ///
    /// Parameter validation happens inside each variant's constructor, so an
    /// out-of-range override surfaces here as [`Error::Config`].
    pub fn build(&self) -> Result<Box<dyn RankingFunction>> {
        let ranker: Box<dyn RankingFunction> = match self.ranker {
            RankerKind::Bm25 => {
                let base = Bm25::default();
                Box::new(Bm25::new(
                    self.k1.unwrap_or(base.k1),
                    self.b.unwrap_or(base.b),
                    self.k3.unwrap_or(base.k3),
                )?)
            }
            RankerKind::Bm25L => {
                let base = Bm25L::default();
                Box::new(Bm25L::new(
                    self.k1.unwrap_or(base.k1),
                    self.b.unwrap_or(base.b),
                    self.k3.unwrap_or(base.k3),
                    self.delta.unwrap_or(base.delta),
                )?)
            }
            RankerKind::Bm25Plus => {
                let base = Bm25Plus::default();
                Box::new(Bm25Plus::new(
                    self.k1.unwrap_or(base.k1),
                    self.b.unwrap_or(base.b),
                    self.k3.unwrap_or(base.k3),
                    self.delta.unwrap_or(base.delta),
                )?)
            }
        };

        Ok(ranker)
    }
}

/// Configuration for a batch evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Ranker selection and parameters.
    #[serde(flatten)]
    pub ranker: RankerConfig,
    /// How many documents to retrieve per query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Path of the query file, one query per line.
    #[serde(default = "default_query_path")]
    pub query_path: String,
    /// Judgment identifier of the first query in the file; subsequent lines
    /// are numbered consecutively from it.
    #[serde(default)]
    pub query_id_start: u64,
}

fn default_top_k() -> usize {
    10
}

fn default_query_path() -> String {
    "queries.txt".to_string()
}

impl RunnerConfig {
    /// Creates a runner configuration with default options for `kind`.
    pub fn new(kind: RankerKind) -> Self {
        Self {
            ranker: RankerConfig::new(kind),
            top_k: default_top_k(),
            query_path: default_query_path(),
            query_id_start: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn defaults_build() {
        for kind in [RankerKind::Bm25, RankerKind::Bm25L, RankerKind::Bm25Plus] {
            assert!(RankerConfig::new(kind).build().is_ok());
        }
    }

    #[test]
    fn out_of_range_override_is_a_config_error() {
        let mut config = RankerConfig::new(RankerKind::Bm25);
        config.b = Some(1.5);

        match config.build() {
            Err(Error::Config { field, .. }) => assert_eq!(field, "b"),
            other => panic!("expected config error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn runner_defaults_match_the_documented_ones() {
        let config = RunnerConfig::new(RankerKind::Bm25L);
        assert_eq!(config.top_k, 10);
        assert_eq!(config.query_path, "queries.txt");
        assert_eq!(config.query_id_start, 0);
    }
}
