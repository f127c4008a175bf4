//! Runs the same query batch through all three ranking functions and
//! prints their mean average precision side by side.

use rankeval::prelude::*;
use std::io;

fn main() -> Result<()> {
    let corpus = InMemIndex::from_documents([
        (1, "the quick brown fox jumps over the lazy dog"),
        (2, "a fox is a small wild animal"),
        (3, "dogs are loyal animals and good companions"),
        (4, "the stock market closed higher today"),
        (5, "wild animals roam the open plains"),
        (6, "quick reflexes help a fox escape dogs"),
    ]);

    let mut judgments = InMemJudgments::new();
    judgments.insert(0, [1, 2, 6]);
    judgments.insert(1, [3, 6]);
    judgments.insert(2, [2, 5]);

    let batch = ["quick fox", "dogs", "wild animals"];

    for kind in [RankerKind::Bm25, RankerKind::Bm25L, RankerKind::Bm25Plus] {
        let runner = QueryRunner::from_config(&RunnerConfig::new(kind))?;
        let queries: Vec<io::Result<String>> =
            batch.iter().map(|q| Ok(q.to_string())).collect();

        let report = runner.run(queries, &corpus, &judgments)?;
        println!("{kind:?}: MAP = {:.4}", report.mean_average_precision()?);
    }

    Ok(())
}
