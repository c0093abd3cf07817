//! Runtime - the resolution context handed to every rendering component.
//!
//! A runtime bundles four independent stacks:
//! 1. **Context**: data values consulted for key lookup
//! 2. **Filter**: filter scopes consulted for filter lookup
//! 3. **Delegate**: observers notified around tag rendering
//! 4. **Override**: replacement blocks registered by including templates
//!
//! A runtime is never mutated. Components derive extended runtimes with the
//! `with_*` methods and pass them down to nested render calls; derived
//! runtimes share every unchanged stack tail with their parent.

mod notify;
mod overrides;

pub use overrides::TemplateOverride;

use std::sync::Arc;

use mustache_model::{standard_library, Filter, ResolveKey, TemplateDelegate, Value, SELF_KEY};

use crate::component::Component;
use crate::error::RenderError;
use crate::expression::Expression;
use crate::options::RenderOptions;
use crate::stack::Stack;
use crate::template::Template;

/// The rendering-time context. Cheap to clone.
#[derive(Clone)]
pub struct Runtime {
    template: Arc<Template>,
    context_stack: Stack<Value>,
    filter_stack: Stack<Value>,
    delegate_stack: Stack<Arc<dyn TemplateDelegate>>,
    override_stack: Stack<Arc<dyn TemplateOverride>>,

    /// Body replaced by the override currently rendering, if any.
    inherited_body: Option<Arc<dyn Component>>,
}

impl Runtime {
    /// Create the root runtime of a render.
    ///
    /// The context stack holds the template's base context (if any), the
    /// delegate stack the template's delegate (if any), and the filter stack
    /// the standard filter library (unless disabled in the template options).
    pub fn new(template: Arc<Template>) -> Self {
        let filter_stack = if template.options.standard_filters {
            Stack::new().push(standard_library())
        } else {
            Stack::new()
        };
        let delegate_stack = template.delegate.iter().cloned().collect();
        let base_context = template.base_context.clone();

        let root = Self {
            template,
            context_stack: Stack::new(),
            filter_stack,
            delegate_stack,
            override_stack: Stack::new(),
            inherited_body: None,
        };

        match base_context {
            Some(context) => root.with_added_context(context),
            None => root,
        }
    }

    /// The template the runtime renders on behalf of.
    pub fn template(&self) -> &Arc<Template> {
        &self.template
    }

    /// The render options of the current template.
    pub fn options(&self) -> &RenderOptions {
        &self.template.options
    }

    /// The current context object (top of the context stack).
    pub fn context(&self) -> Option<&Value> {
        self.context_stack.top()
    }

    /// Context objects, nearest on top.
    pub fn context_stack(&self) -> &Stack<Value> {
        &self.context_stack
    }

    /// Filter objects, nearest on top.
    pub fn filter_stack(&self) -> &Stack<Value> {
        &self.filter_stack
    }

    /// Delegates, nearest on top.
    pub fn delegate_stack(&self) -> &Stack<Arc<dyn TemplateDelegate>> {
        &self.delegate_stack
    }

    /// Template overrides, innermost includer on top.
    pub fn override_stack(&self) -> &Stack<Arc<dyn TemplateOverride>> {
        &self.override_stack
    }

    /// Derive a runtime whose context stack has `object` on top.
    ///
    /// When `object` is a delegating host object, it is pushed onto the
    /// delegate stack as well.
    pub fn with_added_context(&self, object: Value) -> Self {
        let delegate_stack = match object.delegate() {
            Some(delegate) => {
                tracing::debug!("context object extends the delegate stack");
                self.delegate_stack.push(delegate.clone())
            }
            None => self.delegate_stack.clone(),
        };

        Self {
            context_stack: self.context_stack.push(object),
            delegate_stack,
            ..self.clone()
        }
    }

    /// Derive a runtime whose filter stack has `filter_object` on top.
    pub fn with_added_filter(&self, filter_object: Value) -> Self {
        Self {
            filter_stack: self.filter_stack.push(filter_object),
            ..self.clone()
        }
    }

    /// Derive a runtime whose override stack has `template_override` on top.
    pub fn with_added_override(&self, template_override: Arc<dyn TemplateOverride>) -> Self {
        tracing::debug!(depth = self.override_stack.len() + 1, "adding template override");
        Self {
            override_stack: self.override_stack.push(template_override),
            ..self.clone()
        }
    }

    /// Derive a runtime rendering on behalf of `template` (a partial).
    ///
    /// The partial's delegate joins the delegate stack. The inherited body of
    /// an enclosing override does not leak into the partial.
    pub fn with_template(&self, template: Arc<Template>) -> Self {
        let delegate_stack = match &template.delegate {
            Some(delegate) => {
                tracing::debug!(template = %template.name, "partial extends the delegate stack");
                self.delegate_stack.push(delegate.clone())
            }
            None => self.delegate_stack.clone(),
        };

        Self {
            template,
            delegate_stack,
            inherited_body: None,
            ..self.clone()
        }
    }

    /// Look up `key` in the context stack, nearest entry first.
    ///
    /// `.` resolves to the current context object itself. `None` means the
    /// key is missing, which renders as empty.
    pub fn lookup_key(&self, key: &str) -> Option<Value> {
        if key == SELF_KEY {
            return self.context().cloned();
        }

        let found = self
            .context_stack
            .iter()
            .find_map(|entry| entry.resolve_key(key));
        if found.is_none() {
            tracing::trace!(key, depth = self.context_stack.len(), "key missing from context stack");
        }
        found
    }

    /// Look up a dotted key path such as `user.address.city`.
    ///
    /// Only the first segment goes through the context stack; later segments
    /// are resolved against the value found so far, and a miss at any point
    /// makes the whole path missing.
    pub fn lookup_path(&self, path: &str) -> Option<Value> {
        if path == SELF_KEY {
            return self.lookup_key(SELF_KEY);
        }

        let mut segments = path.split('.');
        let first = segments.next()?;
        segments.try_fold(self.lookup_key(first)?, |value, segment| {
            value.resolve_key(segment)
        })
    }

    /// Look up a filter by name in the filter stack, nearest scope first.
    pub fn lookup_filter(&self, name: &str) -> Result<Arc<dyn Filter>, RenderError> {
        let found = self
            .filter_stack
            .iter()
            .find_map(|scope| scope.resolve_key(name));

        match found {
            Some(Value::Filter(filter)) => Ok(filter),
            Some(other) => {
                tracing::trace!(name, found = other.type_name(), "filter name resolved to a non-filter");
                Err(RenderError::NotAFilter {
                    name: name.to_string(),
                })
            }
            None => {
                tracing::trace!(name, "unknown filter");
                Err(RenderError::UnknownFilter {
                    name: name.to_string(),
                })
            }
        }
    }

    /// Evaluate a tag expression. Missing keys evaluate to `Value::Null`.
    pub fn evaluate(&self, expression: &Expression) -> Result<Value, RenderError> {
        match expression {
            Expression::Key(path) => Ok(self.lookup_path(path).unwrap_or_default()),
            Expression::Filtered { filter, argument } => {
                let argument = self.evaluate(argument)?;
                let callable = self.lookup_filter(filter)?;
                callable.apply(&argument).map_err(|source| RenderError::Filter {
                    name: filter.clone(),
                    source,
                })
            }
        }
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("template", &self.template.name)
            .field("context_stack", &self.context_stack)
            .field("filters", &self.filter_stack.len())
            .field("delegates", &self.delegate_stack.len())
            .field("overrides", &self.override_stack.len())
            .field("has_inherited_body", &self.inherited_body.is_some())
            .finish()
    }
}
