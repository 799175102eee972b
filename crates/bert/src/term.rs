//! [`Term`]: the value tree produced by [`crate::TermDecoder`].

use serde_json::{Map, Value};

/// A decoded External Term Format value.
///
/// Tuples and lists both become [`Term::List`]; the arity of a tuple is the
/// length of the vector. Atoms and binaries are both text.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// Small integers, 32-bit integers and bignums that fit in `i64`.
    Integer(i64),
    /// Bignums outside the `i64` range.
    BigInt(i128),
    Float(f64),
    /// Atoms and binaries. Latin-1 atoms are widened to `char`; invalid
    /// UTF-8 is replaced with U+FFFD.
    Str(String),
    /// Charlists, kept as raw bytes.
    Bytes(Vec<u8>),
    /// Tuples and lists.
    List(Vec<Term>),
    /// Map pairs in wire order.
    Map(Vec<(Term, Term)>),
}

impl Term {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Term::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Looks up `key` in a map term. When the wire carried the same key more
    /// than once, the last pair wins.
    pub fn get(&self, key: &Term) -> Option<&Term> {
        match self {
            Term::Map(pairs) => pairs.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Shorthand for [`Term::get`] with a text key.
    pub fn get_str(&self, key: &str) -> Option<&Term> {
        match self {
            Term::Map(pairs) => pairs
                .iter()
                .rev()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<i64> for Term {
    fn from(i: i64) -> Self {
        Term::Integer(i)
    }
}

impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Term::Str(s.to_string())
    }
}

impl From<String> for Term {
    fn from(s: String) -> Self {
        Term::Str(s)
    }
}

/// Text form of a map key, or `None` when the key has no natural string form.
fn json_key(key: &Term) -> Option<String> {
    match key {
        Term::Str(s) => Some(s.clone()),
        Term::Integer(i) => Some(i.to_string()),
        Term::BigInt(i) => Some(i.to_string()),
        Term::Float(f) => Some(f.to_string()),
        _ => None,
    }
}

impl From<Term> for Value {
    fn from(t: Term) -> Self {
        match t {
            Term::Integer(i) => Value::from(i),
            Term::BigInt(i) => u64::try_from(i)
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(i.to_string())),
            // Non-finite floats become null.
            Term::Float(f) => Value::from(f),
            Term::Str(s) => Value::String(s),
            Term::Bytes(b) => Value::Array(b.into_iter().map(Value::from).collect()),
            Term::List(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Term::Map(pairs) => {
                if pairs.iter().all(|(k, _)| json_key(k).is_some()) {
                    let mut obj = Map::with_capacity(pairs.len());
                    for (k, v) in pairs {
                        if let Some(key) = json_key(&k) {
                            obj.insert(key, Value::from(v));
                        }
                    }
                    Value::Object(obj)
                } else {
                    Value::Array(
                        pairs
                            .into_iter()
                            .map(|(k, v)| Value::Array(vec![Value::from(k), Value::from(v)]))
                            .collect(),
                    )
                }
            }
        }
    }
}
