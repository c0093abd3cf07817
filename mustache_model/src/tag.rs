//! Tag identity - what delegates are told about the tag being rendered.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateId(pub Uuid);

impl TemplateId {
    /// Create a new random template ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a nil template ID (useful for detached tags in tests).
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for TemplateId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kinds of tags that produce values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagKind {
    /// `{{name}}` or `{{{name}}}`.
    Variable,
    /// `{{#name}}...{{/name}}`.
    Section,
    /// `{{^name}}...{{/name}}`.
    InvertedSection,
}

/// Identifies a tag to delegates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDescriptor {
    pub kind: TagKind,

    /// Source text of the tag's expression, e.g. `uppercase(user.name)`.
    pub expression: String,

    /// Template the tag belongs to.
    pub template: TemplateId,
}

impl TagDescriptor {
    pub fn new(kind: TagKind, expression: impl Into<String>, template: TemplateId) -> Self {
        Self {
            kind,
            expression: expression.into(),
            template,
        }
    }

    /// Create a variable tag descriptor.
    pub fn variable(expression: impl Into<String>, template: TemplateId) -> Self {
        Self::new(TagKind::Variable, expression, template)
    }

    /// Create a section tag descriptor.
    pub fn section(expression: impl Into<String>, template: TemplateId) -> Self {
        Self::new(TagKind::Section, expression, template)
    }

    /// Create an inverted section tag descriptor.
    pub fn inverted_section(expression: impl Into<String>, template: TemplateId) -> Self {
        Self::new(TagKind::InvertedSection, expression, template)
    }
}

impl std::fmt::Display for TagDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sigil = match self.kind {
            TagKind::Variable => "",
            TagKind::Section => "#",
            TagKind::InvertedSection => "^",
        };
        write!(f, "{{{{{}{}}}}}", sigil, self.expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_display() {
        let id = TemplateId::nil();
        assert_eq!(TagDescriptor::variable("name", id).to_string(), "{{name}}");
        assert_eq!(TagDescriptor::section("items", id).to_string(), "{{#items}}");
        assert_eq!(
            TagDescriptor::inverted_section("items", id).to_string(),
            "{{^items}}"
        );
    }

    #[test]
    fn test_template_ids_are_unique() {
        assert_ne!(TemplateId::new(), TemplateId::new());
        assert_eq!(TemplateId::nil(), TemplateId::nil());
    }
}
