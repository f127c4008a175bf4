//! A small hosting program around the harness: pick a ranker, run a query
//! batch, print one average precision per query and the final MAP.
//!
//! Usage: `eval_run [bm25|bm25l|bm25plus] [query-file]`. Without a query
//! file a built-in demo batch is used. Exits non-zero with a usage message
//! when the ranker name is not recognized.

use rankeval::prelude::*;
use std::io;

fn demo_corpus() -> InMemIndex {
    InMemIndex::from_documents([
        (1, "information retrieval evaluates ranked lists"),
        (2, "bm25 is a classic ranking function"),
        (3, "precision and recall measure retrieval quality"),
        (4, "ranking functions score documents for a query"),
        (5, "gardening tips for the summer"),
        (6, "mean average precision summarizes a query batch"),
    ])
}

fn demo_judgments() -> InMemJudgments {
    let mut judgments = InMemJudgments::new();
    judgments.insert(0, [2, 4]);
    judgments.insert(1, [3, 6]);
    judgments.insert(2, [1, 3]);
    judgments
}

fn demo_queries() -> Vec<io::Result<String>> {
    ["bm25 ranking function", "precision", "retrieval quality"]
        .iter()
        .map(|q| Ok(q.to_string()))
        .collect()
}

fn parse_ranker(name: &str) -> Option<RankerKind> {
    match name {
        "bm25" => Some(RankerKind::Bm25),
        "bm25l" => Some(RankerKind::Bm25L),
        "bm25plus" => Some(RankerKind::Bm25Plus),
        _ => None,
    }
}

fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let kind = match args.get(1).map(String::as_str) {
        None => RankerKind::Bm25,
        Some(name) => match parse_ranker(name) {
            Some(kind) => kind,
            None => {
                eprintln!("Usage: {} [bm25|bm25l|bm25plus] [query-file]", args[0]);
                return std::process::ExitCode::FAILURE;
            }
        },
    };

    let mut config = RunnerConfig::new(kind);
    if let Some(path) = args.get(2) {
        config.query_path = path.clone();
    }

    match run_batch(&config, args.get(2).is_some()) {
        Ok(map) => {
            println!("> Mean Average Precision: {map}");
            std::process::ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::ExitCode::FAILURE
        }
    }
}

fn run_batch(config: &RunnerConfig, from_file: bool) -> Result<f64> {
    let runner = QueryRunner::from_config(config)?;
    let corpus = demo_corpus();
    let judgments = demo_judgments();

    let report = if from_file {
        runner.run(query_lines(&config.query_path)?, &corpus, &judgments)?
    } else {
        runner.run(demo_queries(), &corpus, &judgments)?
    };

    for outcome in &report.outcomes {
        println!("{}", outcome.average_precision);
    }

    report.mean_average_precision()
}
