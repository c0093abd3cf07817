//! The value model - everything a context or filter stack entry can be.

mod convert;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::filter::Filter;
use crate::object::HostObject;

/// Key that resolves to the context entry itself (the implicit iterator).
pub const SELF_KEY: &str = ".";

/// A value known to the runtime.
///
/// Compound variants are reference-counted so that pushing a value onto a
/// runtime stack, or returning it from a lookup, never deep-copies data.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Arc<Vec<Value>>),
    Map(Arc<BTreeMap<String, Value>>),
    /// A host-defined object resolving keys through its own capability.
    Object(HostObject),
    /// A callable, found through the filter stack.
    Filter(Arc<dyn Filter>),
}

/// The capability of answering a single textual key.
///
/// Returning `None` means "this entry does not know the key", which lets a
/// stack scan move on to deeper entries. `Some(Value::Null)` is an answer.
pub trait ResolveKey {
    fn resolve_key(&self, key: &str) -> Option<Value>;
}

impl ResolveKey for Value {
    fn resolve_key(&self, key: &str) -> Option<Value> {
        match self {
            Value::Map(map) => map.get(key).cloned(),
            Value::List(items) => match key {
                "count" => Some(Value::Int(items.len() as i64)),
                "first" => items.first().cloned(),
                "last" => items.last().cloned(),
                _ => None,
            },
            Value::String(s) if key == "length" => Some(Value::Int(s.chars().count() as i64)),
            Value::Object(object) => object.resolve_key(key),
            _ => None,
        }
    }
}

impl Value {
    /// Build a map value from key/value pairs.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Map(Arc::new(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    /// Build a list value.
    pub fn list<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        Value::List(Arc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Wrap a filter.
    pub fn filter<F: Filter + 'static>(filter: F) -> Self {
        Value::Filter(Arc::new(filter))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Mustache truthiness, deciding whether a section renders.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(_) | Value::Object(_) | Value::Filter(_) => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_filter(&self) -> Option<&Arc<dyn Filter>> {
        match self {
            Value::Filter(filter) => Some(filter),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&HostObject> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Render the value as text, the way a variable tag prints it.
    pub fn render_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::List(items) => items.iter().map(Value::render_text).collect(),
            Value::Map(_) | Value::Object(_) | Value::Filter(_) => String::new(),
        }
    }

    /// A short name for the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
            Value::Filter(_) => "filter",
        }
    }
}

/// Escape text for inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::List(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Map(map) => f.debug_map().entries(map.iter()).finish(),
            Value::Object(object) => fmt::Debug::fmt(object, f),
            Value::Filter(_) => f.write_str("Filter(..)"),
        }
    }
}

/// Scalars and containers compare structurally; objects and filters compare
/// by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Filter(a), Value::Filter(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
