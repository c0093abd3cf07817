//! Components - the rendering units of a template tree.
//!
//! Templates are trees of components; each component renders itself against a
//! `Runtime`, deriving extended runtimes for nested scopes. Parsing template
//! text into components is left to the caller.

mod inheritance;
mod tags;

pub use inheritance::*;
pub use tags::*;

use std::sync::Arc;

use crate::error::RenderError;
use crate::runtime::Runtime;

/// Anything that renders text against a runtime.
pub trait Component: Send + Sync {
    fn render(&self, runtime: &Runtime, out: &mut String) -> Result<(), RenderError>;
}

/// Literal template text.
#[derive(Debug, Clone)]
pub struct Text(pub String);

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl Component for Text {
    fn render(&self, _runtime: &Runtime, out: &mut String) -> Result<(), RenderError> {
        out.push_str(&self.0);
        Ok(())
    }
}

/// A sequence of components rendered one after the other.
#[derive(Clone, Default)]
pub struct Fragment {
    components: Vec<Arc<dyn Component>>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a component.
    pub fn with(mut self, component: impl Component + 'static) -> Self {
        self.components.push(Arc::new(component));
        self
    }

    /// Number of child components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the fragment has no children.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl From<Vec<Arc<dyn Component>>> for Fragment {
    fn from(components: Vec<Arc<dyn Component>>) -> Self {
        Self { components }
    }
}

impl Component for Fragment {
    fn render(&self, runtime: &Runtime, out: &mut String) -> Result<(), RenderError> {
        for component in &self.components {
            component.render(runtime, out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Template;

    #[test]
    fn test_fragment_renders_in_order() {
        let fragment = Fragment::new().with(Text::new("a")).with(Text::new("b")).with(Text::new("c"));
        let runtime = Runtime::new(Arc::new(Template::new("fragment")));

        let mut out = String::new();
        fragment.render(&runtime, &mut out).unwrap();

        assert_eq!(out, "abc");
        assert_eq!(fragment.len(), 3);
        assert!(Fragment::new().is_empty());
    }
}
