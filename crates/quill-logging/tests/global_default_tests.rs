#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Lazy global default tests
//!
//! The global logger is built on first use, so this binary holds a single
//! test that nothing else can initialize the global slot ahead of.

use quill_logging::test_capture::TestCapture;
use quill_logging::{global, Logger, Options, SeverityLog, Sink};
use std::io;

#[test]
fn test_lazy_default_leaves_bridges_with_configured_logger() {
    let (sink, capture) = TestCapture::new();
    let _app = Logger::builder(&Options::default())
        .output(sink)
        .error_output(Sink::writer("discard", io::sink()))
        .build()
        .unwrap();

    SeverityLog::global().info("bridged before").unwrap();
    log::info!("log before");

    // First use of the global slot builds the default logger.
    global::debug("filtered", &[]);

    SeverityLog::global().info("bridged after").unwrap();
    log::info!("log after");

    let messages: Vec<String> = capture.entries().into_iter().map(|e| e.message).collect();
    assert_eq!(
        messages,
        vec!["bridged before", "log before", "bridged after", "log after"]
    );

    // Explicit initialization does take the bridges over.
    let stderr_only = Options::default().with_output_paths(vec!["stderr".to_string()]);
    global::try_init(&stderr_only).unwrap();
    SeverityLog::global().info("bridged to global").unwrap();
    log::info!("log to global");

    assert_eq!(capture.entries().len(), 4);
}
