#![allow(clippy::unwrap_used, clippy::expect_used)]

//! `log` crate redirection tests
//!
//! `log` accepts one implementation per process, so this binary holds a
//! single test that walks through the whole lifecycle.

use quill_core_types::schema::FIELD_TARGET;
use quill_logging::redirect::{log_redirected, redirect_log};
use quill_logging::test_capture::capture_logger;
use quill_logging::{Options, Severity, Value};

#[test]
fn test_log_macros_reach_latest_logger() {
    let (first, first_capture) = capture_logger(&Options::default());
    redirect_log(&first);
    assert!(log_redirected());

    log::info!(target: "db::pool", "connections: {}", 4);
    log::debug!("below threshold");

    let entries = first_capture.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, Severity::INFO);
    assert_eq!(entries[0].message, "connections: 4");
    assert_eq!(entries[0].field(FIELD_TARGET), Some(&Value::from("db::pool")));

    let (second, second_capture) = capture_logger(&Options::default().with_level("debug"));
    redirect_log(&second);

    log::warn!("moved");
    log::debug!("now visible");

    assert_eq!(first_capture.entries().len(), 1);
    let severities: Vec<Severity> = second_capture
        .entries()
        .into_iter()
        .map(|e| e.severity)
        .collect();
    assert_eq!(severities, vec![Severity::WARN, Severity::DEBUG]);
}
