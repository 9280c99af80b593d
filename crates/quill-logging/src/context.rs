//! Request-scoped logger propagation
//!
//! A [`Carrier`] is an immutable bag of request-scoped values passed down a
//! call chain. It can hold a logger and the ambient identifiers (request
//! id, username, watcher) that [`Logger::for_carrier`] copies into fields.
//! Adding a value returns a new carrier sharing the old one as its tail.

use crate::field::{Field, Value};
use crate::logger::Logger;
use quill_core_types::schema::{FIELD_REQUEST_ID, FIELD_USERNAME, FIELD_WATCHER};
use quill_core_types::{RequestId, WatcherId};
use std::fmt;
use std::sync::Arc;

/// Well-known identifiers copied from a carrier into log fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmbientKey {
    RequestId,
    Username,
    Watcher,
}

impl AmbientKey {
    /// In the order they are attached
    pub const ALL: [AmbientKey; 3] = [
        AmbientKey::RequestId,
        AmbientKey::Username,
        AmbientKey::Watcher,
    ];

    pub fn field_name(self) -> &'static str {
        match self {
            AmbientKey::RequestId => FIELD_REQUEST_ID,
            AmbientKey::Username => FIELD_USERNAME,
            AmbientKey::Watcher => FIELD_WATCHER,
        }
    }
}

// Not exported: nothing outside this module can build the logger slot key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Logger,
    Ambient(AmbientKey),
}

enum Stored {
    Logger(Logger),
    Value(Value),
}

struct Entry {
    key: Key,
    stored: Stored,
    parent: Option<Arc<Entry>>,
}

#[derive(Clone, Default)]
pub struct Carrier {
    head: Option<Arc<Entry>>,
}

impl fmt::Debug for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        let mut cursor = self.head.as_deref();
        while let Some(entry) = cursor {
            list.entry(&entry.key);
            cursor = entry.parent.as_deref();
        }
        list.finish()
    }
}

impl Carrier {
    pub fn new() -> Self {
        Self::default()
    }

    fn with(&self, key: Key, stored: Stored) -> Carrier {
        Carrier {
            head: Some(Arc::new(Entry {
                key,
                stored,
                parent: self.head.clone(),
            })),
        }
    }

    /// Newest value stored under `key`
    fn lookup(&self, key: Key) -> Option<&Stored> {
        let mut cursor = self.head.as_deref();
        while let Some(entry) = cursor {
            if entry.key == key {
                return Some(&entry.stored);
            }
            cursor = entry.parent.as_deref();
        }
        None
    }

    pub fn with_value(&self, key: AmbientKey, value: impl Into<Value>) -> Carrier {
        self.with(Key::Ambient(key), Stored::Value(value.into()))
    }

    pub fn with_request_id(&self, id: &RequestId) -> Carrier {
        self.with_value(AmbientKey::RequestId, id)
    }

    pub fn with_username(&self, username: impl Into<String>) -> Carrier {
        self.with_value(AmbientKey::Username, username.into())
    }

    pub fn with_watcher(&self, watcher: &WatcherId) -> Carrier {
        self.with_value(AmbientKey::Watcher, watcher)
    }

    pub fn value(&self, key: AmbientKey) -> Option<&Value> {
        match self.lookup(Key::Ambient(key)) {
            Some(Stored::Value(value)) => Some(value),
            _ => None,
        }
    }

    pub fn with_logger(&self, logger: Logger) -> Carrier {
        self.with(Key::Logger, Stored::Logger(logger))
    }

    pub fn logger(&self) -> Option<Logger> {
        match self.lookup(Key::Logger) {
            Some(Stored::Logger(logger)) => Some(logger.clone()),
            _ => None,
        }
    }
}

/// A carrier holding `logger`; `carrier` itself is unchanged
pub fn attach(carrier: &Carrier, logger: Logger) -> Carrier {
    carrier.with_logger(logger)
}

/// The logger attached to `carrier`, if any
///
/// `None` is not an error; callers fall back to
/// [`global::logger`](crate::global::logger) or skip logging.
pub fn extract(carrier: &Carrier) -> Option<Logger> {
    carrier.logger()
}

impl Logger {
    /// A child logger carrying the ambient identifiers found in `carrier`
    ///
    /// Missing or null identifiers are skipped.
    pub fn for_carrier(&self, carrier: &Carrier) -> Logger {
        let fields: Vec<Field> = AmbientKey::ALL
            .iter()
            .filter_map(|key| {
                carrier
                    .value(*key)
                    .filter(|value| !value.is_null())
                    .map(|value| Field::new(key.field_name(), value.clone()))
            })
            .collect();
        self.with(&fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_value_wins() {
        let carrier = Carrier::new()
            .with_username("alice")
            .with_username("bob");
        assert_eq!(
            carrier.value(AmbientKey::Username).and_then(Value::as_str),
            Some("bob")
        );
    }

    #[test]
    fn test_derived_carrier_leaves_parent_alone() {
        let parent = Carrier::new().with_username("alice");
        let child = parent.with_request_id(&RequestId::from_string("r-1"));
        assert!(parent.value(AmbientKey::RequestId).is_none());
        assert!(child.value(AmbientKey::Username).is_some());
    }

    #[test]
    fn test_field_names() {
        assert_eq!(AmbientKey::RequestId.field_name(), "requestID");
        assert_eq!(AmbientKey::Username.field_name(), "username");
        assert_eq!(AmbientKey::Watcher.field_name(), "watcher");
    }
}
