//! Delegate notification around a tag's rendering.

use mustache_model::{TagDescriptor, Value};

use super::Runtime;
use crate::error::RenderError;

impl Runtime {
    /// Offer `value` to every delegate before `tag` renders it.
    ///
    /// Delegates are consulted nearest-first; each one receives the value
    /// returned by the previous one. The first delegate error aborts.
    pub fn will_render(&self, tag: &TagDescriptor, value: Value) -> Result<Value, RenderError> {
        let mut value = value;
        for delegate in &self.delegate_stack {
            value = delegate.will_render(tag, value)?;
        }
        Ok(value)
    }

    /// Tell every delegate that `tag` rendered `value` as `rendering`.
    ///
    /// Delegates are notified farthest-first, so the nearest one observes last.
    pub fn did_render(&self, tag: &TagDescriptor, value: &Value, rendering: &str) {
        let delegates: Vec<_> = self.delegate_stack.iter().collect();
        for delegate in delegates.into_iter().rev() {
            delegate.did_render(tag, value, rendering);
        }
    }

    /// Tell every delegate that rendering `value` for `tag` failed.
    pub fn did_fail_rendering(&self, tag: &TagDescriptor, value: &Value, error: &RenderError) {
        let delegates: Vec<_> = self.delegate_stack.iter().collect();
        for delegate in delegates.into_iter().rev() {
            delegate.did_fail_rendering(tag, value, error);
        }
    }

    /// Run a tag's rendering between the delegate hooks.
    ///
    /// `render` receives the value after `will_render` substitutions and
    /// returns the tag's text. Errors from `render` are reported through
    /// `did_fail_rendering` and then propagated.
    pub fn render_tag<F>(&self, tag: &TagDescriptor, value: Value, render: F) -> Result<String, RenderError>
    where
        F: FnOnce(&Value) -> Result<String, RenderError>,
    {
        let value = self.will_render(tag, value)?;
        match render(&value) {
            Ok(rendering) => {
                self.did_render(tag, &value, &rendering);
                Ok(rendering)
            }
            Err(error) => {
                tracing::debug!(%tag, %error, "tag rendering failed");
                self.did_fail_rendering(tag, &value, &error);
                Err(error)
            }
        }
    }
}
