#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use modbridge_core::errors::BridgeError;
use modbridge_core::logging_facility::test_capture::init_test_capture;
use modbridge_core::{
    compute_missing, log_op_end, log_op_error, log_op_start, Category, Config,
    CorrelationSession, NoopVisualizer,
};
use modbridge_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

use common::{ore_final, ore_origin, scripted, RecordingSink};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let start_events = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START)
    });
    assert!(start_events >= 1, "Should have captured a start event");
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one end event");
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = BridgeError::SnapshotUnavailable {
        path: "output/origin_blocks.json".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one error event");
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(events[0].field("err.code"), Some("ERR_NOT_FOUND"));
}

#[test]
fn test_compute_missing_logs_start_and_end() {
    let capture = init_test_capture();

    // Given two packs where one block disappeared
    let missing = compute_missing(&ore_origin(), &ore_final(), Category::Blocks);

    // Then the diff emits a start/end pair carrying the missing count
    assert_eq!(missing.len(), 1);
    capture.assert_event_exists("compute_missing", EVENT_START);
    let with_count = capture.count_events(|e| {
        e.op.as_deref() == Some("compute_missing")
            && e.event.as_deref() == Some(EVENT_END)
            && e.field("missing_count") == Some("1")
    });
    assert!(with_count >= 1);
}

#[test]
fn test_session_logs_carry_session_id() {
    let capture = init_test_capture();

    // Given a one-element session answered with rank 1
    let config = Config::default();
    let final_ = ore_final();
    let missing = compute_missing(&ore_origin(), &final_, Category::Blocks);
    let mut operator = scripted(&["1"]);
    let mut sink = RecordingSink::default();

    let mut session = CorrelationSession::new(
        &config,
        Category::Blocks,
        &final_,
        &missing,
        &mut operator,
        NoopVisualizer,
        &mut sink,
    );
    let session_id = session.session_id().as_str().to_string();
    session.run().unwrap();

    // Then both boundary events of this run are tagged with its id
    let ours: Vec<_> = capture
        .events_for_op("correlate_session")
        .into_iter()
        .filter(|e| e.field("session_id") == Some(session_id.as_str()))
        .collect();
    assert_eq!(ours.len(), 2);
    assert_eq!(ours[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(ours[1].event.as_deref(), Some(EVENT_END));
}
