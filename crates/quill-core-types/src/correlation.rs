//! Correlation identifiers carried alongside requests
//!
//! These are the typed forms of the ambient identifiers a request-scoped
//! carrier hands to the logging facade.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a single inbound request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a fresh, time-ordered RequestId (UUIDv7)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Wrap an identifier received from upstream (e.g. an `X-Request-Id` header)
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of the background watcher (reconciler, poller, cron job) that
/// produced a unit of work
///
/// Unlike [`RequestId`] this is never generated; watchers are named by
/// the code that spawns them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WatcherId(String);

impl WatcherId {
    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WatcherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
