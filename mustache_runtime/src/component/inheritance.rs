//! Partials and block inheritance.
//!
//! A template declares overridable `Block`s. Another template includes it
//! through a `PartialOverride`, supplying replacement bodies by block name;
//! a replacement may render the body it replaces with `InheritedBody`.

use std::collections::HashMap;
use std::sync::Arc;

use super::{Component, Fragment};
use crate::error::RenderError;
use crate::runtime::{Runtime, TemplateOverride};
use crate::template::Template;

/// `{{$name}}...{{/name}}`: a named body that including templates may replace.
#[derive(Clone)]
pub struct Block {
    pub name: String,
    body: Arc<dyn Component>,
}

impl Block {
    pub fn new(name: impl Into<String>, body: Fragment) -> Self {
        Self {
            name: name.into(),
            body: Arc::new(body),
        }
    }
}

impl Component for Block {
    fn render(&self, runtime: &Runtime, out: &mut String) -> Result<(), RenderError> {
        runtime
            .resolve_component(&self.name, self.body.clone())
            .render(runtime, out)
    }
}

/// Renders the body replaced by the enclosing override.
#[derive(Debug, Clone, Copy, Default)]
pub struct InheritedBody;

impl Component for InheritedBody {
    fn render(&self, runtime: &Runtime, out: &mut String) -> Result<(), RenderError> {
        runtime.render_inherited(out)
    }
}

/// `{{>name}}`: renders another template in the current context.
#[derive(Debug, Clone)]
pub struct Partial {
    pub template: Arc<Template>,
}

impl Partial {
    pub fn new(template: Arc<Template>) -> Self {
        Self { template }
    }
}

impl Component for Partial {
    fn render(&self, runtime: &Runtime, out: &mut String) -> Result<(), RenderError> {
        self.template
            .render_components(&runtime.with_template(self.template.clone()), out)
    }
}

/// Replacement bodies keyed by block name.
#[derive(Clone, Default)]
pub struct BlockOverrides {
    blocks: HashMap<String, Arc<dyn Component>>,
}

impl BlockOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the replacement body for the block named `name`.
    pub fn with_block(mut self, name: impl Into<String>, body: Fragment) -> Self {
        self.blocks.insert(name.into(), Arc::new(body));
        self
    }

    /// Number of replaced blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether no block is replaced.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl TemplateOverride for BlockOverrides {
    fn override_for(&self, name: &str) -> Option<Arc<dyn Component>> {
        self.blocks.get(name).cloned()
    }
}

/// Block overrides bound to the template that wrote them.
struct BoundOverrides {
    owner: Arc<Template>,
    blocks: Arc<BlockOverrides>,
}

impl TemplateOverride for BoundOverrides {
    fn override_for(&self, name: &str) -> Option<Arc<dyn Component>> {
        self.blocks.override_for(name)
    }

    fn owner(&self) -> Option<&Arc<Template>> {
        Some(&self.owner)
    }
}

/// `{{<name}}...{{/name}}`: renders another template, replacing some of its
/// blocks.
///
/// Replacement bodies render on behalf of the including template.
#[derive(Clone)]
pub struct PartialOverride {
    pub template: Arc<Template>,
    overrides: Arc<BlockOverrides>,
}

impl PartialOverride {
    pub fn new(template: Arc<Template>, overrides: BlockOverrides) -> Self {
        Self {
            template,
            overrides: Arc::new(overrides),
        }
    }
}

impl Component for PartialOverride {
    fn render(&self, runtime: &Runtime, out: &mut String) -> Result<(), RenderError> {
        let bound = BoundOverrides {
            owner: runtime.template().clone(),
            blocks: self.overrides.clone(),
        };
        let runtime = runtime
            .with_added_override(Arc::new(bound))
            .with_template(self.template.clone());
        self.template.render_components(&runtime, out)
    }
}
