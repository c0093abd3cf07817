//! Delegate protocol - observers notified around a tag's rendering.

use thiserror::Error;

use crate::tag::TagDescriptor;
use crate::value::Value;

/// Error raised by a delegate hook. It aborts the current render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("delegate failed on {tag}: {message}")]
pub struct DelegateError {
    pub tag: String,
    pub message: String,
}

impl DelegateError {
    pub fn new(tag: &TagDescriptor, message: impl Into<String>) -> Self {
        Self {
            tag: tag.to_string(),
            message: message.into(),
        }
    }
}

/// An observer of tag rendering.
///
/// All hooks have no-op defaults, so implementors only override what they
/// care about.
pub trait TemplateDelegate: Send + Sync {
    /// Called before a tag renders `value`. The returned value is rendered
    /// instead (and handed to the next delegate).
    fn will_render(&self, _tag: &TagDescriptor, value: Value) -> Result<Value, DelegateError> {
        Ok(value)
    }

    /// Called after a tag rendered `value` as `rendering`.
    fn did_render(&self, _tag: &TagDescriptor, _value: &Value, _rendering: &str) {}

    /// Called when rendering `value` failed.
    fn did_fail_rendering(&self, _tag: &TagDescriptor, _value: &Value, _error: &dyn std::error::Error) {}
}
