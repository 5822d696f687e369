//! Ranking Determinism
//!
//! Scores are pure functions of the corpus and query, and stable elevation
//! placement depends only on the query. Nothing here may drift between
//! calls or rebuilds.

use crate::common::*;
use mailsim::build_search_engine;

const QUERIES: &[&str] = &["budget", "pat", "offs", "Jane", "JD", "budget review"];

#[test]
fn repeated_queries_rank_identically() {
    let messages = corpus();
    let engine = build_search_engine(&messages, &search_condition(r#"{"quality": "standard"}"#));

    for query in QUERIES {
        let first = engine.search(query, false);
        for _ in 0..5 {
            let again = engine.search(query, false);
            assert_eq!(again.results, first.results, "query {:?} drifted", query);
            assert_eq!(again.searched, first.searched);
        }
    }
}

#[test]
fn rebuilt_stacks_agree() {
    let messages = corpus();
    let condition = r#"{"quality": "full", "promoted": ["m-1"]}"#;

    let one = build_search_engine(&messages, &search_condition(condition));
    let two = build_search_engine(&messages, &search_condition(condition));

    for query in QUERIES {
        assert_eq!(
            one.search(query, false).results,
            two.search(query, false).results,
            "query {:?} differs across builds",
            query
        );
    }
}

#[test]
fn stable_placement_depends_only_on_the_query() {
    let messages = corpus();
    // m-3 starts behind m-0, so the seeded draw decides its landing spot
    let engine = build_search_engine(
        &messages,
        &search_condition(r#"{"quality": "full", "promoted": ["m-3"]}"#),
    );

    let first = engine.search("pat", false);
    let mut sorted = first.results.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, vec![0, 3]);

    for _ in 0..10 {
        assert_eq!(engine.search("pat", false).results, first.results);
    }
}

#[test]
fn unstable_placement_preserves_membership() {
    let messages = corpus();
    let engine = build_search_engine(
        &messages,
        &search_condition(r#"{"quality": "full", "stable": false, "promoted": ["m-1"]}"#),
    );

    for _ in 0..20 {
        let mut results = engine.search("budget", false).results;
        results.sort_unstable();
        assert_eq!(results, vec![0, 1]);
    }
}

#[test]
fn quick_mode_agrees_on_exact_terms() {
    let messages = corpus();
    let engine = build_search_engine(&messages, &search_condition(r#"{"quality": "standard"}"#));

    // Whole indexed terms never need prefix expansion
    for query in ["budget", "pat", "Jane", "printer"] {
        assert_eq!(
            engine.search(query, true).results,
            engine.search(query, false).results,
            "query {:?} differs between quick and full",
            query
        );
    }
}
