//! Search Arm Scenarios
//!
//! The observable differences between quality arms: what matches, how
//! results are ordered, and where promoted messages land.

use crate::common::*;
use mailsim::{build_search_engine, convert_raw_emails, RawEmail, SegmentKind};

// ============================================================================
// Match Semantics
// ============================================================================

#[test]
fn baseline_arm_matches_substrings_in_corpus_order() {
    let messages = corpus();
    let engine = build_search_engine(&messages, &search_condition(r#"{"quality": "baseline"}"#));

    let outcome = engine.search("budget", false);
    assert!(outcome.searched);
    assert_eq!(outcome.results, vec![0, 1]);

    // Mid-word fragments match on this arm only
    assert_eq!(engine.search("udge", false).results, vec![0, 1]);
}

#[test]
fn ranked_arm_scores_by_term_weight() {
    let messages = corpus();
    let engine = build_search_engine(&messages, &search_condition(r#"{"quality": "standard"}"#));

    // m-1 carries the same subject hit in a shorter document
    assert_eq!(engine.search("budget", false).results, vec![1, 0]);

    // Mid-word fragments are not prefixes of any indexed key
    assert!(engine.search("udge", false).results.is_empty());
}

#[test]
fn blank_queries_return_the_whole_corpus_unsearched() {
    let messages = corpus();
    for quality in [r#"{"quality": "baseline"}"#, r#"{"quality": "standard"}"#] {
        let engine = build_search_engine(&messages, &search_condition(quality));
        let outcome = engine.search("  \t ", false);
        assert!(!outcome.searched);
        assert_eq!(outcome.results, vec![0, 1, 2, 3, 4]);
    }
}

#[test]
fn sender_names_and_initials_are_indexed() {
    let messages = corpus();
    let engine = build_search_engine(&messages, &search_condition(r#"{"quality": "standard"}"#));

    assert_eq!(engine.search("Jane", false).results, vec![2]);
    assert_eq!(engine.search("JD", false).results, vec![2]);
}

#[test]
fn equal_scores_fall_back_to_corpus_order() {
    let messages = corpus();
    let engine = build_search_engine(&messages, &search_condition(r#"{"quality": "standard"}"#));

    // m-0 and m-3 have identical tf and length for "pat"
    assert_eq!(engine.search("pat", false).results, vec![0, 3]);
}

#[test]
fn prefix_expansion_is_skipped_in_quick_mode() {
    let messages = corpus();
    let engine = build_search_engine(&messages, &search_condition(r#"{"quality": "standard"}"#));

    assert_eq!(engine.search("offs", false).results, vec![1]);
    assert!(engine.search("offs", true).results.is_empty());
}

// ============================================================================
// Elevation Placement
// ============================================================================

#[test]
fn full_arm_keeps_promoted_messages_in_front() {
    let messages = corpus();
    let engine = build_search_engine(
        &messages,
        &search_condition(r#"{"quality": "full", "promoted": ["m-1"]}"#),
    );

    // m-1 already ranks first; near-top placement never demotes it
    let outcome = engine.search("budget", false);
    assert_eq!(outcome.results, vec![1, 0]);

    let summary = engine.summarize(&outcome.results).unwrap();
    assert_eq!(summary.promoted_positions, vec![Some(0)]);
}

#[test]
fn standard_arm_pushes_promoted_messages_back() {
    let messages = corpus();
    let engine = build_search_engine(
        &messages,
        &search_condition(r#"{"quality": "standard", "promoted": ["m-1"]}"#),
    );

    // Same query, same scores, but placement runs from the far end
    let outcome = engine.search("budget", false);
    assert_eq!(outcome.results, vec![0, 1]);

    let summary = engine.summarize(&outcome.results).unwrap();
    assert_eq!(summary.promoted_positions, vec![Some(1)]);
}

#[test]
fn baseline_arm_has_no_elevation_summary() {
    let messages = corpus();
    let engine = build_search_engine(
        &messages,
        &search_condition(r#"{"quality": "baseline", "promoted": ["m-1"]}"#),
    );
    assert!(engine.summarize(&[0, 1]).is_none());
}

// ============================================================================
// Index Hints
// ============================================================================

#[test]
fn index_hints_lift_unmatched_messages() {
    let messages = corpus();
    let engine = build_search_engine(
        &messages,
        &search_condition(r#"{"quality": "standard", "augmented": {"budget": ["m-3"]}}"#),
    );

    // m-3 never mentions the term; the hint's flat boost puts it on top
    assert_eq!(engine.search("budget", false).results, vec![3, 1, 0]);
}

// ============================================================================
// Highlighting
// ============================================================================

#[test]
fn highlighters_cover_every_query_token_occurrence() {
    let messages = corpus();
    let engine = build_search_engine(&messages, &search_condition(r#"{"quality": "standard"}"#));

    let highlight = engine.create_highlighter("budget");
    let spans = highlight(&messages[0].subject);
    assert_eq!(spans.len(), 1);
    assert_eq!((spans[0].start, spans[0].length), (0, 6));

    assert!(highlight("Venue costs inside.").is_empty());
}

// ============================================================================
// Raw Corpus Conversion
// ============================================================================

#[test]
fn corpora_parse_from_raw_task_json() {
    let raw: Vec<RawEmail> = serde_json::from_str(
        r#"[
            {
                "id": "r-0",
                "from": {"fullName": "Ada Park", "email": "ada@corp.example"},
                "to": [{"fullName": "Bo Reyes", "email": "bo@corp.example"}],
                "cc": [],
                "bcc": [],
                "time": "2024-03-01T10:00:00Z",
                "subject": "Launch checklist",
                "body": [
                    [{"id": "s-0", "t": "Final review tomorrow."}],
                    [{"id": "s-1", "p": "link", "t": "https://tracker.corp.example"}]
                ],
                "read": false
            },
            {
                "id": "r-1",
                "from": {"fullName": "Bo Reyes", "email": "bo@corp.example"},
                "to": [{"fullName": "Ada Park", "email": "ada@corp.example"}],
                "cc": [],
                "bcc": [],
                "time": "2024-03-02T08:30:00Z",
                "subject": "Weekly digest",
                "body": [[{"id": "s-0", "t": "Nothing new."}]],
                "read": true
            }
        ]"#,
    )
    .expect("valid raw corpus");

    let messages = convert_raw_emails(raw).expect("convertible corpus");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].body.len(), 2);
    assert_eq!(messages[0].body[1][0].kind, SegmentKind::Link);
    assert!(messages[1].read);

    let engine = build_search_engine(&messages, &search_condition(r#"{"quality": "standard"}"#));
    assert_eq!(engine.search("checklist", false).results, vec![0]);
    // Link text is plain body text to the index
    assert_eq!(engine.search("tracker", false).results, vec![0]);
}
