//! Field values attached to log entries
//!
//! - [`Value`]: any value a field can carry
//! - [`Field`]: a typed `(key, value)` pair, checked at compile time
//! - [`Arg`]: one element of an untyped key-value list, validated at
//!   runtime by [`sanitize`](crate::sanitize::sanitize)

use quill_core_types::{RequestId, WatcherId};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// A field value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    Str(String),
    /// Encoded as floating-point milliseconds
    Duration(Duration),
    Json(serde_json::Value),
}

impl Value {
    /// Capture any `Display` value as a string
    pub fn display(value: impl fmt::Display) -> Self {
        Value::Str(value.to_string())
    }

    /// Capture any `Debug` value as a string
    pub fn debug(value: impl fmt::Debug) -> Self {
        Value::Str(format!("{:?}", value))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::I64(n) => serializer.serialize_i64(*n),
            Value::U64(n) => serializer.serialize_u64(*n),
            Value::F64(n) => serializer.serialize_f64(*n),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Duration(d) => serializer.serialize_f64(d.as_nanos() as f64 / 1_000_000.0),
            Value::Json(v) => v.serialize(serializer),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::I64(n) => write!(f, "{}", n),
            Value::U64(n) => write!(f, "{}", n),
            Value::F64(n) => write!(f, "{}", n),
            Value::Str(s) => f.write_str(s),
            Value::Duration(d) => write!(f, "{:?}", d),
            Value::Json(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => |$v:ident| $body:expr;)*) => {
        $(
            impl From<$ty> for Value {
                fn from($v: $ty) -> Self {
                    $body
                }
            }

            impl From<$ty> for Arg {
                fn from(v: $ty) -> Self {
                    Arg::Value(Value::from(v))
                }
            }
        )*
    };
}

value_from! {
    bool => |v| Value::Bool(v);
    i8 => |v| Value::I64(v.into());
    i16 => |v| Value::I64(v.into());
    i32 => |v| Value::I64(v.into());
    i64 => |v| Value::I64(v);
    isize => |v| Value::I64(v as i64);
    u8 => |v| Value::U64(v.into());
    u16 => |v| Value::U64(v.into());
    u32 => |v| Value::U64(v.into());
    u64 => |v| Value::U64(v);
    usize => |v| Value::U64(v as u64);
    f32 => |v| Value::F64(v.into());
    f64 => |v| Value::F64(v);
    &str => |v| Value::Str(v.to_string());
    String => |v| Value::Str(v);
    &String => |v| Value::Str(v.clone());
    Duration => |v| Value::Duration(v);
    serde_json::Value => |v| Value::Json(v);
    RequestId => |v| Value::Str(v.as_str().to_string());
    &RequestId => |v| Value::Str(v.as_str().to_string());
    WatcherId => |v| Value::Str(v.as_str().to_string());
    &WatcherId => |v| Value::Str(v.as_str().to_string());
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// A typed structured field
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    key: String,
    value: Value,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// One element of an untyped key-value argument list
///
/// Keys must be `Arg::Value(Value::Str(_))`. A pre-built [`Field`] is
/// representable so that passing one by mistake can be detected and
/// reported instead of silently mis-paired.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Value(Value),
    Field(Field),
}

impl From<Value> for Arg {
    fn from(v: Value) -> Self {
        Arg::Value(v)
    }
}

impl From<Field> for Arg {
    fn from(f: Field) -> Self {
        Arg::Field(f)
    }
}

/// Build an array of [`Arg`]s from a flat key-value list
///
/// ```
/// use quill_logging::kv;
///
/// let args = kv!["user", "alice", "attempt", 3];
/// assert_eq!(args.len(), 4);
/// ```
#[macro_export]
macro_rules! kv {
    () => {{
        let args: [$crate::Arg; 0] = [];
        args
    }};
    ($($arg:expr),+ $(,)?) => {
        [$($crate::Arg::from($arg)),+]
    };
}
