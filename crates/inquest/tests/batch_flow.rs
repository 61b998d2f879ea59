//! End-to-end batch scenarios: load, shuffle, fan out, persist.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use inquest_engine::job::{FnJob, JobError};
use inquest_engine::{
    BatchProgress, ConcurrencyGate, FanOutExecutor, ResultSink, load_queries, shuffle_queries,
};

#[tokio::test]
async fn five_queries_two_slots_uppercase() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("questions.txt");
    let output = dir.path().join("results.txt");
    std::fs::write(&input, "A\nB\nC\nD\nE\n").unwrap();

    let mut queries = load_queries(&input).await.unwrap();
    shuffle_queries(&mut queries);
    assert_eq!(queries.len(), 5);

    let executor = FanOutExecutor::new(ConcurrencyGate::new(2).unwrap());
    let job = Arc::new(FnJob(|q: String| async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        Ok(q.to_uppercase())
    }));

    let mut run = executor.dispatch(queries, job);
    let mut sink = ResultSink::create(&output).await.unwrap();
    let progress = BatchProgress::hidden(run.total() as u64);

    while let Some(completion) = run.next().await {
        if let Ok(answer) = completion.outcome {
            sink.append(&answer).await.unwrap();
        }
        progress.completed();
    }
    progress.finish();

    assert_eq!(sink.written(), 5);
    assert_eq!(progress.position(), 5);

    // Completion order is timing-dependent; the set of lines is not.
    let contents = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 5);
    let set: HashSet<&str> = lines.iter().copied().collect();
    assert_eq!(set, HashSet::from(["A", "B", "C", "D", "E"]));
}

#[tokio::test]
async fn failing_query_is_reported_not_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("questions.txt");
    let output = dir.path().join("results.txt");
    std::fs::write(&input, "one\ntwo\nthree\n").unwrap();

    let queries = load_queries(&input).await.unwrap();
    let executor = FanOutExecutor::new(ConcurrencyGate::new(3).unwrap());
    let job = Arc::new(FnJob(|q: String| async move {
        if q == "two" {
            Err::<String, JobError>("agent refused".into())
        } else {
            Ok(format!("answer: {q}"))
        }
    }));

    let mut run = executor.dispatch(queries, job);
    let mut sink = ResultSink::create(&output).await.unwrap();
    let mut failures = Vec::new();

    while let Some(completion) = run.next().await {
        match completion.outcome {
            Ok(answer) => sink.append(&answer).await.unwrap(),
            Err(err) => failures.push((completion.query.text, err.to_string())),
        }
    }

    let contents = std::fs::read_to_string(&output).unwrap();
    assert_eq!(contents.lines().count(), 2);
    assert!(!contents.contains("two"));
    assert_eq!(failures, vec![("two".to_string(), "agent refused".to_string())]);
}

#[tokio::test]
async fn multiline_answers_stay_on_one_line_each() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("results.txt");

    let executor = FanOutExecutor::new(ConcurrencyGate::new(4).unwrap());
    let job = Arc::new(FnJob(|q: String| async move {
        Ok(format!("{q}:\nline two\nline three"))
    }));

    let queries = vec![
        inquest_engine::Query::new("p", 0),
        inquest_engine::Query::new("q", 1),
        inquest_engine::Query::new("r", 2),
    ];
    let mut run = executor.dispatch(queries, job);
    let mut sink = ResultSink::create(&output).await.unwrap();
    while let Some(completion) = run.next().await {
        sink.append(&completion.outcome.unwrap()).await.unwrap();
    }

    let contents = std::fs::read_to_string(&output).unwrap();
    assert_eq!(contents.lines().count(), 3);
    for line in contents.lines() {
        assert!(line.contains("line two line three"));
    }
}
