//! Filters - named transformations applied to values, e.g. `uppercase(name)`.

use std::sync::{Arc, OnceLock};
use thiserror::Error;

use crate::value::Value;

/// Error raised when a filter cannot process its argument.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("expected {expected}, got {found}")]
    InvalidArgument {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{0}")]
    Custom(String),
}

/// A callable found through the filter stack.
pub trait Filter: Send + Sync {
    fn apply(&self, value: &Value) -> Result<Value, FilterError>;
}

/// Adapter turning a closure into a `Filter`.
pub struct FnFilter<F>(pub F);

impl<F> Filter for FnFilter<F>
where
    F: Fn(&Value) -> Result<Value, FilterError> + Send + Sync,
{
    fn apply(&self, value: &Value) -> Result<Value, FilterError> {
        (self.0)(value)
    }
}

/// Wrap a closure as a filter value.
pub fn filter_fn<F>(f: F) -> Value
where
    F: Fn(&Value) -> Result<Value, FilterError> + Send + Sync + 'static,
{
    Value::Filter(Arc::new(FnFilter(f)))
}

fn string_argument(value: &Value) -> Result<String, FilterError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        Value::Bool(_) | Value::Int(_) | Value::Float(_) => Ok(value.render_text()),
        other => Err(FilterError::InvalidArgument {
            expected: "string",
            found: other.type_name(),
        }),
    }
}

fn capitalize(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The built-in filters, as a map value ready to seed a filter stack.
///
/// - `uppercase`, `lowercase`, `capitalized`: string case transforms
/// - `isEmpty`: true for falsey values
/// - `isBlank`: like `isEmpty`, but whitespace-only strings are blank too
/// - `count`: number of items in a list
///
/// The library is built once; every call returns a handle to the same map.
pub fn standard_library() -> Value {
    static LIBRARY: OnceLock<Value> = OnceLock::new();
    LIBRARY.get_or_init(build_standard_library).clone()
}

fn build_standard_library() -> Value {
    Value::map([
        (
            "uppercase",
            filter_fn(|v| Ok(Value::String(string_argument(v)?.to_uppercase()))),
        ),
        (
            "lowercase",
            filter_fn(|v| Ok(Value::String(string_argument(v)?.to_lowercase()))),
        ),
        (
            "capitalized",
            filter_fn(|v| Ok(Value::String(capitalize(&string_argument(v)?)))),
        ),
        ("isEmpty", filter_fn(|v| Ok(Value::Bool(!v.is_truthy())))),
        (
            "isBlank",
            filter_fn(|v| {
                let blank = match v {
                    Value::String(s) => s.trim().is_empty(),
                    other => !other.is_truthy(),
                };
                Ok(Value::Bool(blank))
            }),
        ),
        (
            "count",
            filter_fn(|v| match v {
                Value::List(items) => Ok(Value::Int(items.len() as i64)),
                other => Err(FilterError::InvalidArgument {
                    expected: "list",
                    found: other.type_name(),
                }),
            }),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ResolveKey;
    use pretty_assertions::assert_eq;

    fn apply(name: &str, value: Value) -> Result<Value, FilterError> {
        let library = standard_library();
        let filter = library.resolve_key(name).unwrap();
        filter.as_filter().unwrap().apply(&value)
    }

    #[test]
    fn test_case_filters() {
        assert_eq!(apply("uppercase", Value::from("Alice")).unwrap(), Value::from("ALICE"));
        assert_eq!(apply("lowercase", Value::from("Alice")).unwrap(), Value::from("alice"));
        assert_eq!(
            apply("capitalized", Value::from("hello wORLD")).unwrap(),
            Value::from("Hello World")
        );
        assert_eq!(apply("uppercase", Value::Int(3)).unwrap(), Value::from("3"));
    }

    #[test]
    fn test_emptiness_filters() {
        assert_eq!(apply("isEmpty", Value::from("")).unwrap(), Value::Bool(true));
        assert_eq!(apply("isEmpty", Value::from("  ")).unwrap(), Value::Bool(false));
        assert_eq!(apply("isBlank", Value::from("  ")).unwrap(), Value::Bool(true));
        assert_eq!(apply("isBlank", Value::Null).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_count_filter() {
        assert_eq!(apply("count", Value::list([1, 2])).unwrap(), Value::Int(2));
        assert_eq!(
            apply("count", Value::from("x")).unwrap_err(),
            FilterError::InvalidArgument {
                expected: "list",
                found: "string"
            }
        );
    }

    #[test]
    fn test_invalid_string_argument() {
        let err = apply("uppercase", Value::list(["a"])).unwrap_err();
        assert_eq!(err.to_string(), "expected string, got list");
    }

    #[test]
    fn test_library_is_shared() {
        assert_eq!(standard_library(), standard_library());
    }

    #[test]
    fn test_closure_filter() {
        let double = filter_fn(|v| match v {
            Value::Int(i) => Ok(Value::Int(i * 2)),
            _ => Err(FilterError::Custom("not a number".to_string())),
        });

        assert_eq!(double.as_filter().unwrap().apply(&Value::Int(21)).unwrap(), Value::Int(42));
    }
}
