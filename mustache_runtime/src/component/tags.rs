//! Variable and section tags.

use mustache_model::{escape_html, TagDescriptor, TagKind, Value};

use super::{Component, Fragment};
use crate::error::RenderError;
use crate::expression::Expression;
use crate::runtime::Runtime;

/// Evaluate a tag's expression, applying the template's filter policy.
///
/// `None` means the tag renders empty: a filter is missing and the template
/// is lenient. Sections of either kind then skip their body.
fn evaluate(runtime: &Runtime, expression: &Expression) -> Result<Option<Value>, RenderError> {
    match runtime.evaluate(expression) {
        Ok(value) => Ok(Some(value)),
        Err(error) if error.is_missing_filter() && !runtime.options().strict_filters => {
            tracing::warn!(%expression, %error, "rendering tag as empty");
            Ok(None)
        }
        Err(error) => Err(error),
    }
}

/// `{{expression}}` (escaped) or `{{{expression}}}` (unescaped).
#[derive(Debug, Clone)]
pub struct Variable {
    pub expression: Expression,
    pub escape: bool,
}

impl Variable {
    pub fn escaped(expression: Expression) -> Self {
        Self {
            expression,
            escape: true,
        }
    }

    pub fn unescaped(expression: Expression) -> Self {
        Self {
            expression,
            escape: false,
        }
    }
}

impl Component for Variable {
    fn render(&self, runtime: &Runtime, out: &mut String) -> Result<(), RenderError> {
        let tag = TagDescriptor::variable(self.expression.to_string(), runtime.template().id);
        let Some(value) = evaluate(runtime, &self.expression)? else {
            return Ok(());
        };
        let escape = self.escape && runtime.options().escape_html;

        let rendering = runtime.render_tag(&tag, value, |value| {
            let text = value.render_text();
            Ok(if escape { escape_html(&text) } else { text })
        })?;
        out.push_str(&rendering);
        Ok(())
    }
}

/// `{{#expression}}...{{/expression}}` or its inverted form `{{^...}}`.
///
/// A list renders the body once per item with the item as context. Any other
/// truthy value renders the body once with the value as context. Inverted
/// sections render their body only for falsey values.
#[derive(Clone)]
pub struct Section {
    pub expression: Expression,
    pub inverted: bool,
    pub body: Fragment,
}

impl Section {
    pub fn new(expression: Expression, body: Fragment) -> Self {
        Self {
            expression,
            inverted: false,
            body,
        }
    }

    pub fn inverted(expression: Expression, body: Fragment) -> Self {
        Self {
            expression,
            inverted: true,
            body,
        }
    }

    fn render_body(&self, runtime: &Runtime, value: &Value) -> Result<String, RenderError> {
        let mut buffer = String::new();
        if self.inverted {
            if !value.is_truthy() {
                self.body.render(runtime, &mut buffer)?;
            }
            return Ok(buffer);
        }

        match value {
            Value::List(items) => {
                for item in items.iter() {
                    self.body
                        .render(&runtime.with_added_context(item.clone()), &mut buffer)?;
                }
            }
            value if value.is_truthy() => {
                self.body
                    .render(&runtime.with_added_context(value.clone()), &mut buffer)?;
            }
            _ => {}
        }
        Ok(buffer)
    }
}

impl Component for Section {
    fn render(&self, runtime: &Runtime, out: &mut String) -> Result<(), RenderError> {
        let kind = if self.inverted {
            TagKind::InvertedSection
        } else {
            TagKind::Section
        };
        let tag = TagDescriptor::new(kind, self.expression.to_string(), runtime.template().id);
        let Some(value) = evaluate(runtime, &self.expression)? else {
            return Ok(());
        };

        let rendering = runtime.render_tag(&tag, value, |value| self.render_body(runtime, value))?;
        out.push_str(&rendering);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use mustache_model::{filter_fn, DelegateError, TemplateDelegate};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::component::Text;
    use crate::options::RenderOptions;
    use crate::template::Template;

    fn render(template: Template, data: serde_json::Value) -> Result<String, RenderError> {
        Arc::new(template).render(data)
    }

    fn key(path: &str) -> Expression {
        Expression::key(path)
    }

    #[test]
    fn test_variable_escaping() {
        let template = Template::new("escape")
            .with_component(Variable::escaped(key("html")))
            .with_component(Text::new("|"))
            .with_component(Variable::unescaped(key("html")));

        assert_eq!(
            render(template, json!({"html": "<b>"})).unwrap(),
            "&lt;b&gt;|<b>"
        );
    }

    #[test]
    fn test_escaping_disabled_by_options() {
        let options = RenderOptions {
            escape_html: false,
            ..RenderOptions::default()
        };
        let template = Template::new("raw")
            .with_options(options)
            .with_component(Variable::escaped(key("html")));

        assert_eq!(render(template, json!({"html": "<b>"})).unwrap(), "<b>");
    }

    #[test]
    fn test_missing_variable_renders_empty() {
        let template = Template::new("missing")
            .with_component(Text::new("["))
            .with_component(Variable::escaped(key("nothing")))
            .with_component(Text::new("]"));

        assert_eq!(render(template, json!({})).unwrap(), "[]");
    }

    #[test]
    fn test_section_iterates_list() {
        let template = Template::new("list").with_component(Section::new(
            key("people"),
            Fragment::new()
                .with(Variable::escaped(key("name")))
                .with(Text::new(",")),
        ));

        let data = json!({"people": [{"name": "Alice"}, {"name": "Bob"}]});
        assert_eq!(render(template, data).unwrap(), "Alice,Bob,");
    }

    #[test]
    fn test_section_implicit_iterator() {
        let template = Template::new("dots").with_component(Section::new(
            key("items"),
            Fragment::new().with(Variable::escaped(key("."))).with(Text::new(";")),
        ));

        assert_eq!(render(template, json!({"items": [1, "two", 3.5]})).unwrap(), "1;two;3.5;");
    }

    #[test]
    fn test_section_pushes_truthy_value() {
        let template = Template::new("scope").with_component(Section::new(
            key("user"),
            Fragment::new()
                .with(Variable::escaped(key("name")))
                .with(Text::new("@"))
                .with(Variable::escaped(key("site"))),
        ));

        let data = json!({"user": {"name": "alice"}, "site": "example.org"});
        assert_eq!(render(template, data).unwrap(), "alice@example.org");
    }

    #[test]
    fn test_falsey_sections() {
        let body = || Fragment::new().with(Text::new("shown"));
        let template = Template::new("falsey")
            .with_component(Section::new(key("flag"), body()))
            .with_component(Text::new("|"))
            .with_component(Section::inverted(key("flag"), body()))
            .with_component(Text::new("|"))
            .with_component(Section::inverted(key("empty"), body()));

        let data = json!({"flag": false, "empty": []});
        assert_eq!(render(template, data).unwrap(), "|shown|shown");
    }

    #[test]
    fn test_filtered_variable() {
        let template = Template::new("filters").with_component(Variable::escaped(
            Expression::filtered("uppercase", key("name")),
        ));

        assert_eq!(render(template, json!({"name": "alice"})).unwrap(), "ALICE");
    }

    #[test]
    fn test_filtered_section() {
        let template = Template::new("filtered section").with_component(Section::inverted(
            Expression::filtered("isBlank", key("bio")),
            Fragment::new().with(Variable::escaped(key("bio"))),
        ));

        assert_eq!(render(template, json!({"bio": "hi"})).unwrap(), "hi");
    }

    #[test]
    fn test_unknown_filter_strict() {
        let template = Template::new("strict")
            .with_component(Variable::escaped(Expression::filtered("shout", key("name"))));

        let err = render(template, json!({"name": "x"})).unwrap_err();
        assert!(matches!(err, RenderError::UnknownFilter { name } if name == "shout"));
    }

    #[test]
    fn test_unknown_filter_lenient() {
        let options = RenderOptions::from_toml_str("strict_filters = false").unwrap();
        let template = Template::new("lenient")
            .with_options(options)
            .with_component(Text::new("<"))
            .with_component(Variable::escaped(Expression::filtered("shout", key("name"))))
            .with_component(Text::new(">"));

        assert_eq!(render(template, json!({"name": "x"})).unwrap(), "<>");
    }

    #[test]
    fn test_unknown_filter_lenient_sections_render_nothing() {
        let options = RenderOptions::from_toml_str("strict_filters = false").unwrap();
        let body = || Fragment::new().with(Text::new("body"));
        let template = Template::new("lenient sections")
            .with_options(options)
            .with_component(Text::new("<"))
            .with_component(Section::inverted(Expression::filtered("shout", key("name")), body()))
            .with_component(Section::new(Expression::filtered("shout", key("name")), body()))
            .with_component(Text::new(">"));

        assert_eq!(render(template, json!({"name": "x"})).unwrap(), "<>");
    }

    #[test]
    fn test_filter_failure_is_not_lenient() {
        let options = RenderOptions::from_toml_str("strict_filters = false").unwrap();
        let template = Template::new("failing")
            .with_options(options)
            .with_component(Variable::escaped(Expression::filtered("count", key("name"))));

        assert!(matches!(
            render(template, json!({"name": "x"})),
            Err(RenderError::Filter { .. })
        ));
    }

    #[test]
    fn test_context_filter_named_like_data() {
        // A data key and a filter may share a name.
        let template = Template::new("shared name").with_component(Variable::escaped(
            Expression::filtered("name", key("name")),
        ));
        let filters = Value::map([(
            "name",
            filter_fn(|v| Ok(Value::String(format!("<{}>", v.render_text())))),
        )]);

        let rendered = Arc::new(template)
            .render_with_filters(json!({"name": "alice"}), filters)
            .unwrap();
        assert_eq!(rendered, "&lt;alice&gt;");
    }

    struct Censor;

    impl TemplateDelegate for Censor {
        fn will_render(&self, tag: &TagDescriptor, value: Value) -> Result<Value, DelegateError> {
            match tag.expression.as_str() {
                "password" => Ok(Value::from("***")),
                "forbidden" => Err(DelegateError::new(tag, "not allowed")),
                _ => Ok(value),
            }
        }
    }

    #[test]
    fn test_delegate_substitutes_variable_value() {
        let template = Template::new("censored")
            .with_delegate(Arc::new(Censor))
            .with_component(Variable::escaped(key("user")))
            .with_component(Text::new(":"))
            .with_component(Variable::escaped(key("password")));

        let data = json!({"user": "alice", "password": "hunter2"});
        assert_eq!(render(template, data).unwrap(), "alice:***");
    }

    #[test]
    fn test_delegate_error_aborts_render() {
        let template = Template::new("forbidden")
            .with_delegate(Arc::new(Censor))
            .with_component(Section::new(key("forbidden"), Fragment::new().with(Text::new("x"))));

        assert!(matches!(
            render(template, json!({"forbidden": true})),
            Err(RenderError::Delegate(_))
        ));
    }

    /// Records the rendering of every section tag.
    struct SectionLog(Mutex<Vec<String>>);

    impl TemplateDelegate for SectionLog {
        fn did_render(&self, tag: &TagDescriptor, _value: &Value, rendering: &str) {
            if tag.kind == TagKind::Section {
                self.0.lock().unwrap().push(format!("{}={}", tag, rendering));
            }
        }
    }

    #[test]
    fn test_delegate_observes_section_rendering() {
        let log = Arc::new(SectionLog(Mutex::new(Vec::new())));
        let template = Template::new("observed")
            .with_delegate(log.clone())
            .with_component(Section::new(
                key("items"),
                Fragment::new().with(Variable::escaped(key("."))),
            ));

        render(template, json!({"items": ["a", "b"]})).unwrap();
        assert_eq!(*log.0.lock().unwrap(), vec!["{{#items}}=ab"]);
    }
}
