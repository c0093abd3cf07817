//! Errors raised while rendering.

use mustache_model::{DelegateError, FilterError};
use thiserror::Error;

/// A condition that aborts (or, for filters, may abort) a render.
///
/// Missing keys are not errors: lookups return `None` and tags render empty.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown filter `{name}`")]
    UnknownFilter { name: String },

    #[error("`{name}` is not a filter")]
    NotAFilter { name: String },

    #[error("filter `{name}` failed: {source}")]
    Filter {
        name: String,
        #[source]
        source: FilterError,
    },

    #[error(transparent)]
    Delegate(#[from] DelegateError),
}

impl RenderError {
    /// Whether the error comes from a filter name that did not resolve to a
    /// filter. Components may render such tags empty instead of failing.
    pub fn is_missing_filter(&self) -> bool {
        matches!(
            self,
            RenderError::UnknownFilter { .. } | RenderError::NotAFilter { .. }
        )
    }
}

/// Error raised while loading render options.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid render options: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_filter_classification() {
        assert!(RenderError::UnknownFilter {
            name: "shout".to_string()
        }
        .is_missing_filter());
        assert!(RenderError::NotAFilter {
            name: "name".to_string()
        }
        .is_missing_filter());
        assert!(!RenderError::Filter {
            name: "count".to_string(),
            source: FilterError::Custom("boom".to_string()),
        }
        .is_missing_filter());
    }

    #[test]
    fn test_error_messages() {
        let err = RenderError::Filter {
            name: "count".to_string(),
            source: FilterError::InvalidArgument {
                expected: "list",
                found: "string",
            },
        };
        assert_eq!(
            err.to_string(),
            "filter `count` failed: expected list, got string"
        );
    }
}
