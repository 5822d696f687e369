//! Detection Arm Scenarios
//!
//! Sampling against ground truth at each quality arm's targets, replay of
//! persisted label selections, and subject hints.

use crate::common::*;
use chrono::{DateTime, Utc};
use mailsim::{
    apply_hints, build_commitment_engine, CommitmentStatus, DetectAssembly, Email, Error,
};

fn labels_of(assembly: &DetectAssembly, messages: &[Email]) -> Vec<Option<mailsim::Commitment>> {
    messages
        .iter()
        .map(|message| assembly.engine.extract(message))
        .collect()
}

// ============================================================================
// Quality Arms
// ============================================================================

#[test]
fn baseline_arm_never_detects() {
    let messages = detection_corpus();
    let assembly =
        build_commitment_engine(&messages, &ground_truth_condition("baseline"), None).unwrap();

    assert!(assembly.selected_ids.is_none());
    assert!(labels_of(&assembly, &messages).iter().all(Option::is_none));
}

#[test]
fn exact_targets_label_the_ground_truth_exactly() {
    let messages = detection_corpus();
    let assembly =
        build_commitment_engine(&messages, &ground_truth_condition("variable-high"), None)
            .unwrap();

    let mut ids = assembly.selected_ids.unwrap();
    ids.sort();
    assert_eq!(ids, vec!["k-0".to_string(), "k-1".to_string()]);

    let named = assembly.engine.extract(&messages[0]).unwrap();
    assert_eq!(named.name, "Standup");
    assert_eq!(named.status, CommitmentStatus::Pending);
    let expected = DateTime::parse_from_rfc3339("2024-04-02T09:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    assert_eq!(named.time, Some(expected));
    assert!(!named.flagged);

    // Empty ground-truth names fall back to the subject
    let unnamed = assembly.engine.extract(&messages[1]).unwrap();
    assert_eq!(unnamed.name, "Coffee chat");
    assert_eq!(unnamed.status, CommitmentStatus::Accepted);
    assert!(unnamed.time.is_none());
    assert!(!unnamed.flagged);

    assert!(assembly.engine.extract(&messages[2]).is_none());
    assert!(assembly.engine.extract(&messages[3]).is_none());
}

#[test]
fn balanced_targets_add_one_false_positive() {
    let messages = detection_corpus();
    let assembly =
        build_commitment_engine(&messages, &ground_truth_condition("stable"), None).unwrap();

    // 0.8 recall rounds to both positives, 0.8 precision adds one negative
    assert_eq!(assembly.selected_ids.as_ref().unwrap().len(), 3);

    let labels = labels_of(&assembly, &messages);
    assert!(labels[0].as_ref().is_some_and(|c| !c.flagged));
    assert!(labels[1].as_ref().is_some_and(|c| !c.flagged));
    let flagged = labels
        .iter()
        .flatten()
        .filter(|label| label.flagged)
        .count();
    assert_eq!(flagged, 1);
}

#[test]
fn noisy_targets_drop_truth_and_add_noise() {
    let messages = detection_corpus();
    let assembly =
        build_commitment_engine(&messages, &ground_truth_condition("variable-low"), None).unwrap();

    // 0.6 recall keeps one of two positives, 0.6 precision adds one negative
    assert_eq!(assembly.selected_ids.as_ref().unwrap().len(), 2);

    let labels: Vec<_> = labels_of(&assembly, &messages).into_iter().flatten().collect();
    assert_eq!(labels.len(), 2);
    assert_eq!(labels.iter().filter(|label| label.flagged).count(), 1);
    assert_eq!(labels.iter().filter(|label| !label.flagged).count(), 1);
}

// ============================================================================
// Persisted Replay
// ============================================================================

#[test]
fn persisted_ids_replay_identical_labels() {
    let messages = detection_corpus();
    let trained =
        build_commitment_engine(&messages, &ground_truth_condition("stable"), None).unwrap();
    let ids = trained.selected_ids.clone().unwrap();

    let replayed = build_commitment_engine(
        &messages,
        &ground_truth_condition("stable"),
        Some(&ids),
    )
    .unwrap();

    assert!(replayed.selected_ids.is_none());
    assert_eq!(labels_of(&replayed, &messages), labels_of(&trained, &messages));
}

// ============================================================================
// Hints and Errors
// ============================================================================

#[test]
fn hinted_sessions_prefix_detected_subjects() {
    let messages = detection_corpus();
    let condition = detect_condition(
        r#"{
            "quality": "variable-high",
            "hinted": true,
            "commitments": {
                "k-0": {"name": "Standup", "time": "2024-04-02T09:00:00Z", "status": "pending"},
                "k-1": {"name": "", "time": "", "status": "accepted"}
            }
        }"#,
    );
    assert!(condition.hinted);

    let assembly = build_commitment_engine(&messages, &condition, None).unwrap();
    let hinted = apply_hints(&messages, assembly.engine.as_ref());

    assert_eq!(hinted[0].subject, "Save the date: Team meeting");
    assert_eq!(hinted[1].subject, "Save the date: Coffee chat");
    assert_eq!(hinted[2].subject, "Budget report");
    assert_eq!(hinted[3].subject, "Quarterly numbers");
    assert_eq!(messages[0].subject, "Team meeting");
}

#[test]
fn malformed_times_fail_assembly() {
    let messages = detection_corpus();
    let condition = detect_condition(
        r#"{
            "quality": "stable",
            "commitments": {
                "k-0": {"name": "Standup", "time": "next tuesday", "status": "pending"}
            }
        }"#,
    );

    let err = build_commitment_engine(&messages, &condition, None).unwrap_err();
    assert!(matches!(
        err,
        Error::TimeParse {
            field: "commitment time",
            ..
        }
    ));
}
