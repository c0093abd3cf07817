//! The template handle a runtime renders on behalf of.

use std::fmt;
use std::sync::Arc;

use mustache_model::{TemplateDelegate, TemplateId, Value};

use crate::component::Component;
use crate::error::RenderError;
use crate::options::RenderOptions;
use crate::runtime::Runtime;

/// A fully built template: an ordered list of components plus what a root
/// runtime is seeded with.
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub components: Vec<Arc<dyn Component>>,

    /// Observer of every tag rendered by this template and its partials.
    pub delegate: Option<Arc<dyn TemplateDelegate>>,

    /// Context object at the bottom of the root context stack.
    pub base_context: Option<Value>,

    pub options: RenderOptions,
}

impl Template {
    /// Create an empty template with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TemplateId::new(),
            name: name.into(),
            components: Vec::new(),
            delegate: None,
            base_context: None,
            options: RenderOptions::default(),
        }
    }

    /// Append a component.
    pub fn with_component(mut self, component: impl Component + 'static) -> Self {
        self.components.push(Arc::new(component));
        self
    }

    /// Append several shared components.
    pub fn with_components(mut self, components: impl IntoIterator<Item = Arc<dyn Component>>) -> Self {
        self.components.extend(components);
        self
    }

    pub fn with_delegate(mut self, delegate: Arc<dyn TemplateDelegate>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    pub fn with_base_context(mut self, context: impl Into<Value>) -> Self {
        self.base_context = Some(context.into());
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Render every component of this template against `runtime`.
    pub fn render_components(&self, runtime: &Runtime, out: &mut String) -> Result<(), RenderError> {
        for component in &self.components {
            component.render(runtime, out)?;
        }
        Ok(())
    }

    /// Render with `data` on top of the root context stack.
    pub fn render(self: &Arc<Self>, data: impl Into<Value>) -> Result<String, RenderError> {
        let runtime = Runtime::new(self.clone()).with_added_context(data.into());
        self.render_with_runtime(&runtime)
    }

    /// Render with `data` on top of the root context stack and `filters` on
    /// top of the standard filter library.
    pub fn render_with_filters(
        self: &Arc<Self>,
        data: impl Into<Value>,
        filters: impl Into<Value>,
    ) -> Result<String, RenderError> {
        let runtime = Runtime::new(self.clone())
            .with_added_filter(filters.into())
            .with_added_context(data.into());
        self.render_with_runtime(&runtime)
    }

    fn render_with_runtime(&self, runtime: &Runtime) -> Result<String, RenderError> {
        tracing::debug!(template = %self.name, id = %self.id, "rendering template");
        let mut out = String::new();
        self.render_components(runtime, &mut out)?;
        Ok(out)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("components", &self.components.len())
            .field("has_delegate", &self.delegate.is_some())
            .field("base_context", &self.base_context)
            .field("options", &self.options)
            .finish()
    }
}
