#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::collections::BTreeSet;

use modbridge_core::{
    Category, Config, CorrelationSession, ElementKey, MissingElement, NoopVisualizer,
    SessionOutcome,
};

use common::{missing_batch, ore_final, scripted, transcript, RecordingSink};

fn keys(missing: &[MissingElement]) -> BTreeSet<ElementKey> {
    missing.iter().map(MissingElement::key).collect()
}

#[test]
fn test_scenario_checkpoint_after_every_fifth_resolution() {
    // Given seven missing elements and the default checkpoint interval
    let config = Config::default();
    let final_ = ore_final();
    let missing = missing_batch(7);
    let mut operator = scripted(&["1"; 7]);
    let mut sink = RecordingSink::default();

    // When all seven are resolved
    let outcome = CorrelationSession::new(
        &config,
        Category::Blocks,
        &final_,
        &missing,
        &mut operator,
        NoopVisualizer,
        &mut sink,
    )
    .run()
    .unwrap();

    // Then exactly one periodic checkpoint was taken, after the fifth
    assert_eq!(outcome.resolved(), 7);
    assert_eq!(sink.checkpoints.len(), 1);
    assert_eq!(sink.checkpoints[0].mapping.len(), 5);
    assert_eq!(sink.checkpoints[0].remaining.len(), 2);
    assert!(transcript(&operator).contains("Progress saved after 5 replacements."));

    // And completion wrote the full mapping and removed the checkpoint
    assert_eq!(sink.finals[0].len(), 7);
    assert!(sink.cleared);
}

#[test]
fn test_scenario_exit_checkpoints_remaining() {
    // Given four missing elements
    let config = Config::default();
    let final_ = ore_final();
    let missing = missing_batch(4);
    let mut operator = scripted(&["1", "1", "-2"]);
    let mut sink = RecordingSink::default();

    // When the operator resolves two and exits
    let outcome = CorrelationSession::new(
        &config,
        Category::Blocks,
        &final_,
        &missing,
        &mut operator,
        NoopVisualizer,
        &mut sink,
    )
    .run()
    .unwrap();

    // Then remaining is exactly everything not yet mapped
    assert_eq!(
        outcome,
        SessionOutcome::Exited {
            resolved: 2,
            remaining: 2,
            persisted: true
        }
    );
    let checkpoint = sink.checkpoints.last().unwrap();
    let mapped: BTreeSet<ElementKey> = checkpoint.mapping.iter().map(|(k, _)| k.clone()).collect();
    let expected: BTreeSet<ElementKey> = keys(&missing).difference(&mapped).cloned().collect();
    assert_eq!(keys(&checkpoint.remaining), expected);
    assert!(sink.finals.is_empty());
    assert!(!sink.cleared);
}

#[test]
fn test_scenario_eof_behaves_like_exit() {
    let config = Config::default();
    let final_ = ore_final();
    let missing = missing_batch(3);
    let mut operator = scripted(&["1"]);
    let mut sink = RecordingSink::default();

    let outcome = CorrelationSession::new(
        &config,
        Category::Blocks,
        &final_,
        &missing,
        &mut operator,
        NoopVisualizer,
        &mut sink,
    )
    .run()
    .unwrap();

    assert_eq!(
        outcome,
        SessionOutcome::Exited {
            resolved: 1,
            remaining: 2,
            persisted: true
        }
    );
    assert_eq!(sink.checkpoints.last().unwrap().mapping.len(), 1);
}

#[test]
fn test_scenario_persistence_failure_exports_mapping() {
    // Given a sink that cannot write anything
    let config = Config::default();
    let final_ = ore_final();
    let missing = missing_batch(1);
    let mut operator = scripted(&["1"]);
    let mut sink = RecordingSink {
        fail_saves: true,
        ..RecordingSink::default()
    };

    // When the only element is resolved
    let outcome = CorrelationSession::new(
        &config,
        Category::Blocks,
        &final_,
        &missing,
        &mut operator,
        NoopVisualizer,
        &mut sink,
    )
    .run()
    .unwrap();

    // Then the operator is told and can copy the mapping from the terminal
    assert_eq!(
        outcome,
        SessionOutcome::Completed {
            resolved: 1,
            persisted: false
        }
    );
    let shown = transcript(&operator);
    assert!(shown.contains("Could not save the final mapping"));
    assert!(shown.contains("\"old:old_0\": "));
    assert!(!sink.cleared);
}
