#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Concurrent logging tests
//!
//! Many threads share one logger and one sink; every call must produce
//! exactly one intact line.

use quill_logging::{kv, Logger, Options, Sink};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

const THREADS: usize = 8;
const CALLS_PER_THREAD: usize = 250;

#[test]
fn test_concurrent_calls_produce_one_line_each() {
    let buffer = SharedBuffer::default();
    let options = Options::default().with_sampling(None);
    let logger = Logger::builder(&options)
        .output(Sink::writer("buffer", buffer.clone()))
        .install_bridges(false)
        .build()
        .unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = logger.named(&format!("worker{}", t));
            thread::spawn(move || {
                for i in 0..CALLS_PER_THREAD {
                    logger.infow("tick", kv!["thread", t, "i", i]);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    logger.flush().unwrap();

    let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), THREADS * CALLS_PER_THREAD);
    for line in lines {
        let entry: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(entry["message"], "tick");
    }
}

#[test]
fn test_logger_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Logger>();
    assert_send_sync::<quill_logging::Carrier>();
}
