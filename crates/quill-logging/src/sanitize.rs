//! Runtime validation of untyped key-value argument lists
//!
//! The `*w` logging forms accept a flat list `key, value, key, value, ...`.
//! [`sanitize`] turns it into typed [`Field`]s, stopping at the first
//! malformed element. Everything validated before that point is kept.

use crate::field::{Arg, Field, Value};
use quill_core_types::schema::{FIELD_IGNORED_KEY, FIELD_INVALID_KEY, FIELD_TYPED_FIELD};

/// Why sanitization stopped early
#[derive(Debug, Clone, PartialEq)]
pub enum MalformedArgs {
    /// A pre-built [`Field`] was passed where a key was expected
    TypedField(Field),
    /// The list had an odd length; the trailing key has no value
    DanglingKey(Value),
    /// A key was not a string
    NonStringKey(Value),
}

impl MalformedArgs {
    /// Message reported at developer-panic severity
    pub fn message(&self) -> &'static str {
        match self {
            MalformedArgs::TypedField(_) => "typed field passed to key-value logging",
            MalformedArgs::DanglingKey(_) => {
                "odd number of arguments passed as key-value pairs for logging"
            }
            MalformedArgs::NonStringKey(_) => {
                "non-string key argument passed to logging, ignoring all later arguments"
            }
        }
    }

    /// The offending argument, as a field for the developer-panic entry
    pub fn to_field(&self) -> Field {
        match self {
            MalformedArgs::TypedField(f) => Field::new(
                FIELD_TYPED_FIELD,
                serde_json::json!({ f.key(): f.value() }),
            ),
            MalformedArgs::DanglingKey(v) => Field::new(FIELD_IGNORED_KEY, v.clone()),
            MalformedArgs::NonStringKey(v) => Field::new(FIELD_INVALID_KEY, v.clone()),
        }
    }
}

/// Output of [`sanitize`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sanitized {
    pub fields: Vec<Field>,
    pub error: Option<MalformedArgs>,
}

/// Validate a flat key-value list
///
/// Pairs are emitted in input order, followed by `additional`. On the first
/// malformed element the rest of the input is dropped and `error` is set.
/// The iterator is only advanced as far as needed.
pub fn sanitize<I>(args: I, additional: &[Field]) -> Sanitized
where
    I: IntoIterator<Item = Arg>,
{
    let mut args = args.into_iter().peekable();
    if args.peek().is_none() {
        return Sanitized {
            fields: additional.to_vec(),
            error: None,
        };
    }

    let (lower, _) = args.size_hint();
    let mut fields = Vec::with_capacity(lower / 2 + additional.len());
    let mut error = None;

    while let Some(key) = args.next() {
        let key = match key {
            Arg::Field(f) => {
                error = Some(MalformedArgs::TypedField(f));
                break;
            }
            Arg::Value(v) => v,
        };

        let value = match args.next() {
            Some(Arg::Value(v)) => v,
            // A typed field in value position is still a value to the caller.
            Some(Arg::Field(f)) => Value::Json(serde_json::json!({ f.key(): f.value() })),
            None => {
                error = Some(MalformedArgs::DanglingKey(key));
                break;
            }
        };

        match key {
            Value::Str(k) => fields.push(Field::new(k, value)),
            other => {
                error = Some(MalformedArgs::NonStringKey(other));
                break;
            }
        }
    }

    fields.extend_from_slice(additional);
    Sanitized { fields, error }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv;

    #[test]
    fn test_empty_input_passes_additional_through() {
        let extra = [Field::new("k", 1)];
        let out = sanitize(kv![], &extra);
        assert_eq!(out.fields, extra.to_vec());
        assert!(out.error.is_none());
    }

    #[test]
    fn test_additional_fields_follow_sanitized_ones() {
        let extra = [Field::new("attached", true)];
        let out = sanitize(kv!["a", 1], &extra);
        assert_eq!(out.fields[0].key(), "a");
        assert_eq!(out.fields[1].key(), "attached");
    }

    #[test]
    fn test_typed_field_in_key_position_aborts() {
        let args = [
            Arg::from("a"),
            Arg::from(1),
            Arg::from(Field::new("typed", 2)),
            Arg::from("b"),
            Arg::from(3),
        ];
        let out = sanitize(args, &[]);
        assert_eq!(out.fields, vec![Field::new("a", 1)]);
        assert!(matches!(out.error, Some(MalformedArgs::TypedField(_))));
    }

    #[test]
    fn test_duplicate_keys_are_kept() {
        let out = sanitize(kv!["k", 1, "k", 2], &[]);
        assert_eq!(out.fields.len(), 2);
    }

    #[test]
    fn test_error_field_names_offending_argument() {
        let out = sanitize(kv!["only"], &[]);
        let field = out.error.unwrap().to_field();
        assert_eq!(field.key(), FIELD_IGNORED_KEY);
        assert_eq!(field.value().as_str(), Some("only"));
    }
}
