//! Raw reply values delivered by the transport.
//!
//! A closed tagged union: every decoder matches over exactly these variants.

/// An untyped reply, as decoded by the external engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Nil reply (missing key, aborted conditional SET, …).
    Nil,
    /// The constant `OK` status reply. Null-equivalent for decoding.
    Okay,
    /// A UTF-8 string (simple or bulk).
    Str(String),
    /// An integer reply.
    Int(i64),
    /// An ordered list of replies.
    Array(Vec<Value>),
    /// A mapping, kept in server order. Keys are not required to be strings.
    Map(Vec<(Value, Value)>),
    /// An error marker returned by the server.
    Error(String),
}

// ── Convenience accessors ──────────────────────────────────────────

impl Value {
    /// Borrow the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer payload, if any.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns true for replies that carry no data (`Nil` and `Okay`).
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Nil | Self::Okay)
    }

    /// Returns true when this is a server error marker.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Returns the shape name (used in type mismatch errors).
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "null",
            Self::Okay => "ok",
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::Array(_) => "array",
            Self::Map(_) => "mapping",
            Self::Error(_) => "error",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_only_for_strings() {
        assert_eq!(Value::Str("PONG".into()).as_str(), Some("PONG"));
        assert_eq!(Value::Okay.as_str(), None);
        assert_eq!(Value::Error("ERR x".into()).as_str(), None);
        assert_eq!(Value::Int(1).as_str(), None);
    }

    #[test]
    fn as_int_only_for_integers() {
        assert_eq!(Value::Int(-7).as_int(), Some(-7));
        assert_eq!(Value::Str("7".into()).as_int(), None);
    }

    #[test]
    fn null_equivalents() {
        assert!(Value::Nil.is_null());
        assert!(Value::Okay.is_null());
        assert!(!Value::Str(String::new()).is_null());
        assert!(!Value::Array(vec![]).is_null());
        assert!(!Value::Int(0).is_null());
    }

    #[test]
    fn error_marker() {
        assert!(Value::Error("ERR".into()).is_error());
        assert!(!Value::Str("ERR".into()).is_error());
    }

    #[test]
    fn type_name_all_variants() {
        assert_eq!(Value::Nil.type_name(), "null");
        assert_eq!(Value::Okay.type_name(), "ok");
        assert_eq!(Value::Str(String::new()).type_name(), "string");
        assert_eq!(Value::Int(0).type_name(), "integer");
        assert_eq!(Value::Array(vec![]).type_name(), "array");
        assert_eq!(Value::Map(vec![]).type_name(), "mapping");
        assert_eq!(Value::Error(String::new()).type_name(), "error");
    }

    #[test]
    fn conversions() {
        assert_eq!(Value::from("a"), Value::Str("a".into()));
        assert_eq!(Value::from(String::from("b")), Value::Str("b".into()));
        assert_eq!(Value::from(3i64), Value::Int(3));
    }
}
