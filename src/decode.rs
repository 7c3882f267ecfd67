//! Typed response decoders.
//!
//! Each decoder checks a raw [`Value`] against one expected shape and either
//! returns it converted or fails with [`GlideError::TypeMismatch`] naming the
//! shape that was actually received. Nothing is coerced or defaulted.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::error::{GlideError, Result};
use crate::value::Value;

/// A decoder selected by the caller when a command is submitted.
pub type Decoder<T> = fn(Value) -> Result<T>;

/// Uninterpreted passthrough, used by custom commands.
pub fn as_object(value: Value) -> Result<Value> {
    Ok(value)
}

/// Succeeds only on a null-equivalent reply (`Nil` or the `OK` constant).
pub fn as_void(value: Value) -> Result<()> {
    match value {
        Value::Nil | Value::Okay => Ok(()),
        other => Err(GlideError::mismatch("null", other.type_name())),
    }
}

/// Succeeds only on a string reply.
pub fn as_string(value: Value) -> Result<String> {
    match value {
        Value::Str(s) => Ok(s),
        other => Err(GlideError::mismatch("string", other.type_name())),
    }
}

/// A string, or `None` for a null-equivalent reply.
///
/// GET answers nil for a missing key, and SET with options answers nil or
/// `OK` unless the previous value was requested.
pub fn as_optional_string(value: Value) -> Result<Option<String>> {
    match value {
        Value::Nil | Value::Okay => Ok(None),
        Value::Str(s) => Ok(Some(s)),
        other => Err(GlideError::mismatch("string or null", other.type_name())),
    }
}

/// Succeeds only on an integer reply.
pub fn as_int(value: Value) -> Result<i64> {
    match value {
        Value::Int(i) => Ok(i),
        other => Err(GlideError::mismatch("integer", other.type_name())),
    }
}

/// Succeeds only on a mapping whose keys are all distinct strings.
pub fn as_map(value: Value) -> Result<HashMap<String, Value>> {
    let pairs = match value {
        Value::Map(pairs) => pairs,
        other => return Err(GlideError::mismatch("mapping", other.type_name())),
    };
    let mut map = HashMap::with_capacity(pairs.len());
    for (k, v) in pairs {
        let key = match k {
            Value::Str(key) => key,
            other => return Err(GlideError::mismatch("string key", other.type_name())),
        };
        match map.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(v);
            }
            Entry::Occupied(_) => {
                return Err(GlideError::mismatch("unique key", "duplicate key"));
            }
        }
    }
    Ok(map)
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn every_shape() -> Vec<Value> {
        vec![
            Value::Nil,
            Value::Okay,
            Value::Str("PONG".into()),
            Value::Int(42),
            Value::Array(vec![Value::Int(1)]),
            Value::Map(vec![(Value::Str("k".into()), Value::Int(1))]),
            Value::Error("ERR boom".into()),
        ]
    }

    fn actual_of(err: GlideError) -> &'static str {
        match err {
            GlideError::TypeMismatch { actual, .. } => actual,
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn as_object_is_identity() {
        for v in every_shape() {
            assert_eq!(as_object(v.clone()).unwrap(), v);
        }
    }

    #[test]
    fn as_void_accepts_only_null_equivalents() {
        for v in every_shape() {
            let name = v.type_name();
            let ok = v.is_null();
            match as_void(v) {
                Ok(()) => assert!(ok, "{name} should be rejected"),
                Err(e) => {
                    assert!(!ok, "{name} should be accepted");
                    assert_eq!(actual_of(e), name);
                }
            }
        }
    }

    #[test]
    fn as_string_accepts_only_strings() {
        for v in every_shape() {
            let name = v.type_name();
            match as_string(v) {
                Ok(s) => {
                    assert_eq!(name, "string");
                    assert_eq!(s, "PONG");
                }
                Err(e) => {
                    assert_ne!(name, "string");
                    assert_eq!(actual_of(e), name);
                }
            }
        }
    }

    #[test]
    fn as_string_on_mapping_names_mapping() {
        let err = as_string(Value::Map(vec![])).unwrap_err();
        assert_eq!(err, GlideError::mismatch("string", "mapping"));
        assert!(err.to_string().contains("mapping"));
    }

    #[test]
    fn as_optional_string_cases() {
        assert_eq!(as_optional_string(Value::Nil).unwrap(), None);
        assert_eq!(as_optional_string(Value::Okay).unwrap(), None);
        assert_eq!(
            as_optional_string(Value::Str("old".into())).unwrap(),
            Some("old".to_string())
        );
        assert_eq!(actual_of(as_optional_string(Value::Int(1)).unwrap_err()), "integer");
    }

    #[test]
    fn as_int_cases() {
        assert_eq!(as_int(Value::Int(-3)).unwrap(), -3);
        assert_eq!(actual_of(as_int(Value::Str("3".into())).unwrap_err()), "string");
    }

    #[test]
    fn as_map_accepts_string_keyed_mapping() {
        let v = Value::Map(vec![
            (Value::Str("redis_version".into()), Value::Str("7.2.0".into())),
            (Value::Str("connected_clients".into()), Value::Int(3)),
        ]);
        let m = as_map(v).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m["redis_version"], Value::Str("7.2.0".into()));
        assert_eq!(m["connected_clients"], Value::Int(3));
    }

    #[test]
    fn as_map_rejects_non_string_key() {
        let v = Value::Map(vec![
            (Value::Str("a".into()), Value::Int(1)),
            (Value::Int(2), Value::Int(2)),
        ]);
        assert_eq!(as_map(v).unwrap_err(), GlideError::mismatch("string key", "integer"));
    }

    #[test]
    fn as_map_rejects_duplicate_key() {
        let v = Value::Map(vec![
            (Value::Str("a".into()), Value::Int(1)),
            (Value::Str("a".into()), Value::Int(2)),
        ]);
        assert_eq!(as_map(v).unwrap_err(), GlideError::mismatch("unique key", "duplicate key"));
    }

    #[test]
    fn as_map_rejects_other_shapes() {
        for v in every_shape() {
            if matches!(v, Value::Map(_)) {
                continue;
            }
            let name = v.type_name();
            assert_eq!(actual_of(as_map(v).unwrap_err()), name);
        }
    }

    #[test]
    fn decoders_fit_decoder_type() {
        let decoders: [Decoder<()>; 1] = [as_void];
        assert!(decoders[0](Value::Okay).is_ok());
        let d: Decoder<Value> = as_object;
        assert_eq!(d(Value::Nil).unwrap(), Value::Nil);
    }
}
