//! Canonical schema constants for encoded log entries
//!
//! These constants keep the facade, its encoders and its tests agreeing on
//! key names.

// Ambient identifier field keys
pub const FIELD_REQUEST_ID: &str = "requestID";
pub const FIELD_USERNAME: &str = "username";
pub const FIELD_WATCHER: &str = "watcher";

// Forwarded-record field keys
pub const FIELD_TARGET: &str = "target";

// Developer-misuse field keys
pub const FIELD_TYPED_FIELD: &str = "typed field";
pub const FIELD_IGNORED_KEY: &str = "ignored key";
pub const FIELD_INVALID_KEY: &str = "invalid key";

// Encoder keys
pub const KEY_TIMESTAMP: &str = "timestamp";
pub const KEY_LEVEL: &str = "level";
pub const KEY_LOGGER: &str = "logger";
pub const KEY_CALLER: &str = "caller";
pub const KEY_MESSAGE: &str = "message";
pub const KEY_STACKTRACE: &str = "stacktrace";

/// Timestamp layout used by both encoders (local time, millisecond precision)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

// Well-known output paths
pub const PATH_STDOUT: &str = "stdout";
pub const PATH_STDERR: &str = "stderr";
