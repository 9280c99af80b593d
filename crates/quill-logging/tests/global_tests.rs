#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Process-wide logger tests
//!
//! The global logger is shared by every test in this binary, so each test
//! holds `SERIAL` while it swaps loggers.

use quill_core_types::schema::FIELD_REQUEST_ID;
use quill_logging::test_capture::capture_logger;
use quill_logging::{global, kv, Carrier, Logger, Options, RequestId, Severity, Value};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;

static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(PoisonError::into_inner)
}

#[test]
fn test_free_functions_use_replaced_logger() {
    let _serial = serial();
    let (logger, capture) = capture_logger(&Options::default());
    global::replace(logger);

    global::info("plain", &[]);
    global::warnw("sugared", kv!["k", "v"]);
    global::errorf(format_args!("formatted {}", 42));
    global::debug("filtered", &[]);

    let messages: Vec<String> = capture.entries().into_iter().map(|e| e.message).collect();
    assert_eq!(messages, vec!["plain", "sugared", "formatted 42"]);
}

#[test]
fn test_replace_returns_previous_logger() {
    let _serial = serial();
    let (first, _) = capture_logger(&Options::default());
    let (second, _) = capture_logger(&Options::default());

    global::replace(first.clone());
    let previous = global::replace(second.clone()).unwrap();

    assert!(Logger::ptr_eq(&previous, &first));
    assert!(Logger::ptr_eq(&global::logger(), &second));
}

#[test]
fn test_for_carrier_falls_back_to_global() {
    let _serial = serial();
    let (logger, capture) = capture_logger(&Options::default());
    global::replace(logger.named("global"));

    let carrier = Carrier::new().with_request_id(&RequestId::from_string("r-42"));
    global::for_carrier(&carrier).info("handled", &[]);

    let entry = &capture.entries()[0];
    assert_eq!(entry.logger.as_deref(), Some("global"));
    assert_eq!(entry.field(FIELD_REQUEST_ID), Some(&Value::from("r-42")));
}

#[test]
fn test_for_carrier_prefers_attached_logger() {
    let _serial = serial();
    let (global_logger, global_capture) = capture_logger(&Options::default());
    let (local, local_capture) = capture_logger(&Options::default());
    global::replace(global_logger);

    let carrier = quill_logging::attach(&Carrier::new(), local);
    global::for_carrier(&carrier).info("local", &[]);

    assert!(global_capture.entries().is_empty());
    local_capture.assert_entry_exists("local");
}

#[test]
fn test_verbosity_through_global() {
    let _serial = serial();
    let (logger, capture) = capture_logger(&Options::default());
    global::replace(logger);

    global::v(0).info("v0", &[]);
    global::v(2).info("v2", &[]);

    assert_eq!(capture.entries().len(), 1);
    assert!(!global::enabled(Severity::DEBUG));
}

#[test]
fn test_reads_during_replacement_see_a_whole_logger() {
    let _serial = serial();
    let unsampled = Options::default().with_sampling(None);
    let (a, capture_a) = capture_logger(&unsampled);
    let (b, capture_b) = capture_logger(&unsampled);
    global::replace(a.clone());

    let writer = thread::spawn(|| {
        for _ in 0..200 {
            global::info("racing", &[]);
        }
    });
    for i in 0..50 {
        global::replace(if i % 2 == 0 { b.clone() } else { a.clone() });
    }
    writer.join().unwrap();

    assert_eq!(capture_a.entries().len() + capture_b.entries().len(), 200);
    global::flush().unwrap();
}
