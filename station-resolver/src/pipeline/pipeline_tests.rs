//! Batch-level tests for the worker pool and collector.

use std::time::Duration;

use super::*;
use crate::domain::Candidate;
use crate::resolver::{MockResolver, ResolveError};

fn station(i: usize) -> String {
    format!("駅{i}")
}

fn postal(i: usize) -> String {
    format!("{:07}", 1_000_000 + i)
}

fn address(i: usize) -> String {
    format!("東京都テスト区{i}丁目")
}

/// Resolver knowing stations 0..n. Earlier stations answer more slowly, so
/// completion order is roughly the reverse of input order.
fn resolver(n: usize) -> MockResolver {
    (0..n).fold(MockResolver::new(), |resolver, i| {
        resolver
            .with_station(
                station(i),
                vec![Candidate::new(station(i), "東京都", "テスト線", postal(i))],
            )
            .with_address(postal(i), address(i))
            .with_delay(station(i), Duration::from_millis(((n - i) * 3) as u64))
    })
}

fn records(n: usize) -> Vec<Vec<String>> {
    (0..n).map(|i| vec![station(i)]).collect()
}

fn rendered(results: &[ItemResult]) -> Vec<String> {
    results.iter().map(|r| r.render().to_string()).collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn output_follows_input_order() {
    let n = 20;
    let pipeline = Pipeline::new(resolver(n), PipelineConfig::new(n));

    let results = pipeline.run(records(n)).await;

    assert_eq!(results.len(), n);
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.index, i);
        assert_eq!(result.render(), address(i));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn failure_is_isolated_to_its_item() {
    let pipeline = Pipeline::new(
        resolver(5).with_station_failure(station(3)),
        PipelineConfig::default(),
    );

    let results = pipeline.run(records(5)).await;

    assert_eq!(
        rendered(&results),
        vec![address(0), address(1), address(2), "ERROR".to_string(), address(4)]
    );
    assert!(matches!(
        results[3].outcome,
        Outcome::Failed(ResolveError::Api { status: 503, .. })
    ));
    assert!(results.iter().filter(|r| r.is_error()).count() == 1);
}

#[tokio::test]
async fn no_match_is_distinct_from_failure() {
    let resolver = resolver(2).with_address_failure(postal(1));
    let pipeline = Pipeline::new(resolver, PipelineConfig::default());

    let results = pipeline
        .run(vec![
            vec![format!("{} (東西線)", station(0))],
            vec![station(1)],
            vec!["どこにもない駅".to_string()],
        ])
        .await;

    assert!(results[0].outcome.is_no_match());
    assert!(results[1].outcome.is_failed());
    assert!(results[2].outcome.is_no_match());
    assert_eq!(rendered(&results), vec!["ERROR", "ERROR", "ERROR"]);
}

#[tokio::test]
async fn hint_is_used_in_batch() {
    let resolver = MockResolver::new()
        .with_station(
            "府中",
            vec![
                Candidate::new("府中", "東京都", "京王線", "1830023"),
                Candidate::new("府中", "広島県", "JR福塩線", "7260005"),
            ],
        )
        .with_address("1830023", "東京都府中市宮町")
        .with_address("7260005", "広島県府中市府中町");
    let pipeline = Pipeline::new(resolver, PipelineConfig::default());

    let results = pipeline
        .run(vec![
            vec!["府中 (広島県)".to_string()],
            vec!["府中(京王線)".to_string()],
            vec!["府中".to_string()],
        ])
        .await;

    assert_eq!(
        rendered(&results),
        vec!["広島県府中市府中町", "東京都府中市宮町", "東京都府中市宮町"]
    );
}

#[tokio::test]
async fn empty_address_is_empty_cell() {
    let resolver = resolver(2).with_address(postal(1), "");
    let pipeline = Pipeline::new(resolver, PipelineConfig::default());

    let results = pipeline.run(records(2)).await;

    assert_eq!(rendered(&results), vec![address(0), String::new()]);
    assert!(!results[1].is_error());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn rerun_is_identical() {
    let pipeline = Pipeline::new(
        resolver(12).with_station_failure(station(5)),
        PipelineConfig::default(),
    );

    let first = rendered(&pipeline.run(records(12)).await);
    let second = rendered(&pipeline.run(records(12)).await);

    assert_eq!(first, second);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn worker_count_does_not_change_output() {
    let n = 15;
    let shared = Arc::new(resolver(n).with_station_failure(station(7)));

    let mut outputs = Vec::new();
    for workers in [1, 10, n] {
        let pipeline = Pipeline::with_shared(Arc::clone(&shared), PipelineConfig::new(workers));
        outputs.push(rendered(&pipeline.run(records(n)).await));
    }

    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[1], outputs[2]);
}

#[tokio::test]
async fn more_workers_than_jobs() {
    let pipeline = Pipeline::new(resolver(2), PipelineConfig::new(50));
    let results = pipeline.run(records(2)).await;
    assert_eq!(rendered(&results), vec![address(0), address(1)]);
}

#[tokio::test]
async fn empty_batch_yields_no_results() {
    let pipeline = Pipeline::new(resolver(0), PipelineConfig::default());
    assert!(pipeline.run(Vec::new()).await.is_empty());
}

#[tokio::test]
async fn empty_row_is_no_match() {
    let pipeline = Pipeline::new(resolver(1), PipelineConfig::default());
    let results = pipeline.run(vec![vec![], vec![station(0)]]).await;
    assert!(results[0].outcome.is_no_match());
    assert_eq!(results[1].render(), address(0));
}

#[tokio::test]
async fn each_job_is_resolved_once() {
    let n = 8;
    let shared = Arc::new(resolver(n));
    let pipeline = Pipeline::with_shared(Arc::clone(&shared), PipelineConfig::new(3));

    pipeline.run(records(n)).await;

    // One station lookup and one address lookup per job
    assert_eq!(shared.call_count(), 2 * n);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        /// Any batch size, pool size and set of failing items yields one
        /// result per row, in row order
        #[test]
        fn ordered_for_any_pool(
            n in 0usize..30,
            workers in 1usize..16,
            failing in proptest::collection::hash_set(0usize..30, 0..5),
        ) {
            let resolver = failing
                .iter()
                .fold(resolver(n), |r, &i| r.with_station_failure(station(i)));
            let pipeline = Pipeline::new(resolver, PipelineConfig::new(workers));

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(4)
                .enable_all()
                .build()
                .unwrap();
            let results = runtime.block_on(pipeline.run(records(n)));

            prop_assert_eq!(results.len(), n);
            for (i, result) in results.iter().enumerate() {
                prop_assert_eq!(result.index, i);
                if failing.contains(&i) {
                    prop_assert!(result.outcome.is_failed());
                } else {
                    let expected = address(i);
                    prop_assert_eq!(result.render(), expected.as_str());
                }
            }
        }
    }
}
