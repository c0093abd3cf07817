//! Override resolution - how an including template replaces named blocks of
//! the template it includes.

use std::sync::Arc;

use super::Runtime;
use crate::component::Component;
use crate::error::RenderError;
use crate::template::Template;

/// A set of replacement blocks registered by an including template.
pub trait TemplateOverride: Send + Sync {
    /// The replacement body for the block named `name`, if this override
    /// provides one.
    fn override_for(&self, name: &str) -> Option<Arc<dyn Component>>;

    /// The template the replacement bodies were written in.
    ///
    /// Replacements render on its behalf (options, tag descriptors). `None`
    /// keeps them on the template that declares the block.
    fn owner(&self) -> Option<&Arc<Template>> {
        None
    }
}

/// A replacement body bound to the body it replaced.
struct Overridden {
    replacement: Arc<dyn Component>,
    inherited: Arc<dyn Component>,
}

/// A body rendered on behalf of a fixed template.
struct OnTemplate {
    template: Arc<Template>,
    body: Arc<dyn Component>,
}

impl Component for OnTemplate {
    fn render(&self, runtime: &Runtime, out: &mut String) -> Result<(), RenderError> {
        self.body.render(&runtime.on_behalf_of(self.template.clone()), out)
    }
}

fn on_template(template: Arc<Template>, body: Arc<dyn Component>) -> Arc<dyn Component> {
    Arc::new(OnTemplate { template, body })
}

impl Component for Overridden {
    fn render(&self, runtime: &Runtime, out: &mut String) -> Result<(), RenderError> {
        self.replacement
            .render(&runtime.with_inherited_body(self.inherited.clone()), out)
    }
}

impl Runtime {
    /// Resolve the block named `name`, whose own body is `original`.
    ///
    /// Overrides are applied from the nearest to the farthest: each one that
    /// names the block replaces the current candidate and inherits it. The
    /// farthest override, registered by the outermost including template,
    /// therefore renders, and the chain of inherited bodies leads back to
    /// `original`.
    ///
    /// A replacement renders on behalf of its override's owner. Each
    /// inherited body renders on behalf of the template current here.
    pub fn resolve_component(&self, name: &str, original: Arc<dyn Component>) -> Arc<dyn Component> {
        self.override_stack
            .iter()
            .fold(original, |current, template_override| {
                match template_override.override_for(name) {
                    Some(replacement) => {
                        tracing::debug!(block = name, "block overridden");
                        let replacement = match template_override.owner() {
                            Some(owner) => on_template(owner.clone(), replacement),
                            None => replacement,
                        };
                        let overridden: Arc<dyn Component> = Arc::new(Overridden {
                            replacement,
                            inherited: on_template(self.template.clone(), current),
                        });
                        overridden
                    }
                    None => current,
                }
            })
    }

    /// Swap the template without touching the delegate stack or the
    /// inherited body.
    fn on_behalf_of(&self, template: Arc<Template>) -> Self {
        Self {
            template,
            ..self.clone()
        }
    }

    /// Derive a runtime in which `render_inherited` renders `body`.
    pub fn with_inherited_body(&self, body: Arc<dyn Component>) -> Self {
        Self {
            inherited_body: Some(body),
            ..self.clone()
        }
    }

    /// Render the body replaced by the override currently rendering.
    ///
    /// Renders nothing outside of an override. The inherited body renders
    /// with no inherited body of its own, unless it is itself an override.
    pub fn render_inherited(&self, out: &mut String) -> Result<(), RenderError> {
        match &self.inherited_body {
            Some(body) => {
                let runtime = Self {
                    inherited_body: None,
                    ..self.clone()
                };
                body.render(&runtime, out)
            }
            None => Ok(()),
        }
    }
}
