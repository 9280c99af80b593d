#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Verbosity mapping and verbosity-scoped view tests
//!
//! ## Scenarios Covered
//!
//! 1. Mapping is clamped and monotonically non-increasing
//! 2. Disabled views never evaluate their arguments
//! 3. Enabled views log at the mapped severity

use proptest::prelude::*;
use quill_logging::test_capture::capture_logger;
use quill_logging::{kv, to_severity, Arg, Options, Severity};
use std::cell::Cell;
use std::fmt;

proptest! {
    #[test]
    fn mapping_is_monotonic(a in any::<i32>(), b in any::<i32>()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(to_severity(hi) <= to_severity(lo));
    }

    #[test]
    fn mapping_is_clamped(v in any::<i32>()) {
        let s = to_severity(v).as_i8();
        prop_assert!((-127..=0).contains(&s));
        prop_assert_eq!(to_severity(v), to_severity(v.clamp(0, 127)));
    }
}

#[test]
fn test_out_of_range_levels() {
    assert_eq!(to_severity(200), to_severity(127));
    assert_eq!(to_severity(-5), to_severity(0));
    assert_eq!(to_severity(0), Severity::INFO);
}

#[test]
fn test_disabled_view_skips_sanitization() {
    let (logger, capture) = capture_logger(&Options::default().with_level("info"));
    let pulled = Cell::new(0);

    let kv = std::iter::from_fn(|| {
        pulled.set(pulled.get() + 1);
        None::<Arg>
    });
    let view = logger.v(5);
    assert!(!view.enabled());
    view.infow("expensive", kv);

    assert_eq!(pulled.get(), 0);
    assert!(capture.entries().is_empty());
}

#[test]
fn test_disabled_view_skips_formatting() {
    struct Counted<'a>(&'a Cell<u32>);
    impl fmt::Display for Counted<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.set(self.0.get() + 1);
            f.write_str("x")
        }
    }

    let (logger, _capture) = capture_logger(&Options::default());
    let formatted = Cell::new(0);

    logger.v(5).infof(format_args!("{}", Counted(&formatted)));

    assert_eq!(formatted.get(), 0);
}

#[test]
fn test_enabled_view_logs_at_mapped_severity() {
    let (logger, capture) = capture_logger(&Options::default());
    logger.set_level(to_severity(3));

    logger.v(3).infow("detail", kv!["n", 3]);
    logger.v(4).info("too detailed", &[]);

    let entries = capture.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, Severity::from_i8(-3));
    assert_eq!(entries[0].message, "detail");
}

#[test]
fn test_view_follows_level_changes() {
    let (logger, _capture) = capture_logger(&Options::default());
    let view = logger.v(1);
    assert!(!view.enabled());

    logger.set_level(Severity::DEBUG);
    assert!(view.enabled());
}
