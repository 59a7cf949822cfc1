#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::RecordingSender;
use intkey_core::dispatch::dispatch_with_context;
use intkey_core::logging_facility::test_capture::init_test_capture;
use intkey_core::{log_op_end, log_op_error, log_op_start, BindingTable, IntKeyError, SessionState};
use intkey_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use intkey_core_types::{RequestContext, RequestId};

fn dispatch_logged(request_id: &str, sender: &mut RecordingSender, args: &[&str]) {
    let ctx = RequestContext::with_request_id(RequestId::from_string(request_id.to_string()));
    let _ = dispatch_with_context(
        ctx,
        &SessionState::default(),
        sender,
        &mut BindingTable::new(),
        args,
    );
}

#[test]
fn test_successful_dispatch_logs_start_and_end() {
    let capture = init_test_capture();
    dispatch_logged("req-success", &mut RecordingSender::new(), &["create", "-k", "apple"]);

    let events = capture.events_for_request("req-success");
    let starts: Vec<_> = events
        .iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_START))
        .collect();
    let ends: Vec<_> = events
        .iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(starts.len(), 1);
    assert_eq!(ends.len(), 1);
    assert_eq!(starts[0].op.as_deref(), Some("dispatch"));
    assert_eq!(starts[0].command(), Some("create"));
    assert_eq!(ends[0].command(), Some("create"));
    assert_eq!(ends[0].field("commit"), Some("true"));
    assert!(ends[0].field("duration_ms").is_some());
    assert!(events
        .iter()
        .all(|e| e.event.as_deref() != Some(EVENT_END_ERROR)));
}

#[test]
fn test_failed_dispatch_logs_error_code() {
    let capture = init_test_capture();
    dispatch_logged(
        "req-bad-attestation",
        &mut RecordingSender::new(),
        &["disburse", "-a", "((\"key\" \"apple\"))"],
    );

    let events = capture.events_for_request("req-bad-attestation");
    let errors: Vec<_> = events
        .iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field("err.code"), Some("ERR_ATTESTATION_DECODE"));
    assert!(events.iter().all(|e| e.event.as_deref() != Some(EVENT_END)));
}

#[test]
fn test_usage_failure_logs_usage_code() {
    let capture = init_test_capture();
    dispatch_logged("req-usage", &mut RecordingSender::new(), &["create"]);

    let errors = capture.count_events(|e| {
        e.request_id() == Some("req-usage") && e.field("err.code") == Some("ERR_USAGE")
    });
    assert_eq!(errors, 1);
}

#[test]
fn test_submission_failure_logs_external_service_code() {
    let capture = init_test_capture();
    dispatch_logged(
        "req-submit",
        &mut RecordingSender::failing("enclave unreachable"),
        &["get", "-k", "apple"],
    );

    let errors = capture.count_events(|e| {
        e.request_id() == Some("req-submit")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field("err.code") == Some("ERR_EXTERNAL_SERVICE")
    });
    assert_eq!(errors, 1);
}

#[test]
fn test_macros_emit_canonical_events() {
    let capture = init_test_capture();

    log_op_start!("macro_check_op");
    log_op_end!("macro_check_op", duration_ms = 5);
    log_op_error!(
        "macro_check_op",
        IntKeyError::UnbalancedQuote,
        duration_ms = 1
    );

    capture.assert_event_exists("macro_check_op", EVENT_START);
    capture.assert_event_exists("macro_check_op", EVENT_END);
    capture.assert_event_exists("macro_check_op", EVENT_END_ERROR);
    assert_eq!(
        capture.count_events(|e| e.op.as_deref() == Some("macro_check_op")),
        3
    );
}

#[test]
fn test_start_event_names_requested_command() {
    let capture = init_test_capture();
    dispatch_logged(
        "req-start-flags",
        &mut RecordingSender::new(),
        &["-q", "-e", "http://enclave:7101", "get"],
    );
    dispatch_logged("req-start-unknown", &mut RecordingSender::new(), &["burn"]);

    let tagged = |request_id: &str| {
        capture
            .events_for_request(request_id)
            .into_iter()
            .find(|e| e.event.as_deref() == Some(EVENT_START))
            .and_then(|e| e.command().map(str::to_string))
    };

    assert_eq!(tagged("req-start-flags").as_deref(), Some("get"));
    assert_eq!(tagged("req-start-unknown").as_deref(), Some("-"));
}
