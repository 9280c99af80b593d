//! Per-message sampling
//!
//! Entries are bucketed by (severity, message hash). Within one tick the
//! first `initial` entries of a bucket pass, then every `thereafter`-th.
//! Hash collisions share a bucket.

use crate::options::Sampling;
use crate::severity::Severity;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

const TICK: Duration = Duration::from_secs(1);
const BUCKETS: u64 = 4096;

struct Counter {
    reset_at: Instant,
    count: u64,
}

pub(crate) struct Sampler {
    sampling: Sampling,
    counters: Mutex<HashMap<(i8, u64), Counter>>,
}

impl Sampler {
    pub fn new(sampling: Sampling) -> Self {
        Self {
            sampling,
            counters: Mutex::new(HashMap::new()),
        }
    }

    pub fn allow(&self, severity: Severity, message: &str) -> bool {
        self.allow_at(severity, message, Instant::now())
    }

    fn allow_at(&self, severity: Severity, message: &str, now: Instant) -> bool {
        let mut hasher = DefaultHasher::new();
        message.hash(&mut hasher);
        let key = (severity.as_i8(), hasher.finish() % BUCKETS);

        let mut counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        let counter = counters.entry(key).or_insert(Counter {
            reset_at: now + TICK,
            count: 0,
        });
        if now >= counter.reset_at {
            counter.reset_at = now + TICK;
            counter.count = 0;
        }
        counter.count += 1;

        let n = counter.count;
        if n <= self.sampling.initial {
            return true;
        }
        match self.sampling.thereafter {
            0 => false,
            every => (n - self.sampling.initial) % every == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sampler(initial: u64, thereafter: u64) -> Sampler {
        Sampler::new(Sampling {
            initial,
            thereafter,
        })
    }

    #[test]
    fn test_initial_then_every_nth() {
        let s = sampler(2, 3);
        let now = Instant::now();
        let passed: Vec<bool> = (0..8)
            .map(|_| s.allow_at(Severity::INFO, "m", now))
            .collect();
        assert_eq!(
            passed,
            vec![true, true, false, false, true, false, false, true]
        );
    }

    #[test]
    fn test_zero_thereafter_drops_rest() {
        let s = sampler(1, 0);
        let now = Instant::now();
        assert!(s.allow_at(Severity::INFO, "m", now));
        assert!(!s.allow_at(Severity::INFO, "m", now));
    }

    #[test]
    fn test_counter_resets_each_tick() {
        let s = sampler(1, 0);
        let now = Instant::now();
        assert!(s.allow_at(Severity::INFO, "m", now));
        assert!(!s.allow_at(Severity::INFO, "m", now));
        assert!(s.allow_at(Severity::INFO, "m", now + TICK));
    }

    #[test]
    fn test_severities_counted_separately() {
        let s = sampler(1, 0);
        let now = Instant::now();
        assert!(s.allow_at(Severity::INFO, "m", now));
        assert!(s.allow_at(Severity::WARN, "m", now));
    }
}
