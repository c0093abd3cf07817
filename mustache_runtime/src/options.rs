//! Render options, loadable from TOML.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Options governing how a template's components render.
///
/// ```toml
/// escape_html = false
/// strict_filters = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Escape HTML in `{{name}}` tags. Triple-mustache tags never escape.
    pub escape_html: bool,

    /// Abort the render when a filter name does not resolve to a filter.
    /// When false, the tag renders empty and a warning is logged.
    pub strict_filters: bool,

    /// Seed the filter stack with the standard filter library.
    pub standard_filters: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            escape_html: true,
            strict_filters: true,
            standard_filters: true,
        }
    }
}

impl RenderOptions {
    /// Parse options from TOML. Absent fields keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }
}
