use rankeval::prelude::*;
use std::io::Write;

fn corpus() -> InMemIndex {
    InMemIndex::from_documents([
        (1, "the cat sat on the mat"),
        (2, "a dog chased the cat"),
        (3, "dogs and cats living together"),
        (4, "weather report for tomorrow"),
        (5, "cat videos on the internet"),
    ])
}

fn judgments() -> InMemJudgments {
    let mut judgments = InMemJudgments::new();
    judgments.insert(0, [1, 2, 5]); // "cat"
    judgments.insert(1, [2]); // "dog chased"
    judgments.insert(2, [4]); // "weather"
    judgments
}

fn write_queries(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn batch_over_a_query_file_reports_one_ap_per_line() {
    let file = write_queries(&["cat", "dog chased", "weather"]);
    let runner = QueryRunner::from_config(&RunnerConfig::new(RankerKind::Bm25)).unwrap();

    let report = runner
        .run(query_lines(file.path()).unwrap(), &corpus(), &judgments())
        .unwrap();

    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(
        report.outcomes.iter().map(|o| o.query_id).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );

    // "cat" matches exactly its three judged documents, so every retrieved
    // position is a hit and AP is 1.0; the other two queries put their
    // single relevant document somewhere in the list.
    assert_eq!(report.outcomes[0].average_precision, 1.0);
    for outcome in &report.outcomes {
        assert!(outcome.average_precision > 0.0);
        assert!(outcome.average_precision <= 1.0);
    }

    let mean = report
        .outcomes
        .iter()
        .map(|o| o.average_precision)
        .sum::<f64>()
        / 3.0;
    assert!((report.mean_average_precision().unwrap() - mean).abs() < 1e-12);
}

#[test]
fn the_three_variants_agree_on_ordering_for_a_plain_query() {
    // Different absolute scores, same ranking of clearly separated
    // documents: doc 2 is the only one matching both terms.
    for kind in [RankerKind::Bm25, RankerKind::Bm25L, RankerKind::Bm25Plus] {
        let retriever = Retriever::new(RankerConfig::new(kind).build().unwrap());
        let ranked = retriever
            .retrieve(&Query::from_text("dog chased"), &corpus(), 10)
            .unwrap();
        assert_eq!(ranked[0].doc_id, 2, "variant {kind:?}");
    }
}

#[test]
fn unjudged_queries_score_zero_without_aborting_the_batch() {
    let file = write_queries(&["cat", "unjudged nonsense"]);
    let runner = QueryRunner::from_config(&RunnerConfig::new(RankerKind::Bm25L)).unwrap();

    let report = runner
        .run(query_lines(file.path()).unwrap(), &corpus(), &judgments())
        .unwrap();

    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.outcomes[1].average_precision, 0.0);
}

#[test]
fn empty_query_file_reports_an_empty_session() {
    let file = write_queries(&[]);
    let runner = QueryRunner::from_config(&RunnerConfig::new(RankerKind::Bm25)).unwrap();

    let report = runner
        .run(query_lines(file.path()).unwrap(), &corpus(), &judgments())
        .unwrap();

    assert!(matches!(
        report.mean_average_precision(),
        Err(Error::EmptySession)
    ));
}

#[test]
fn missing_query_file_propagates_io_errors() {
    assert!(matches!(
        query_lines("definitely/not/a/real/path.txt"),
        Err(Error::Io(_))
    ));
}
