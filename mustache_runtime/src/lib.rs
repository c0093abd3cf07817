//! # Mustache Runtime
//!
//! The rendering-time context of a logic-less Mustache template engine. Tags
//! reference variables, sections, and filters by name; this crate resolves
//! those names against layered scopes that grow as rendering descends,
//! without ever mutating a scope that was already observed.
//!
//! ## Core Components
//!
//! - **runtime**: The `Runtime`, an immutable bundle of the context, filter,
//!   delegate, and override stacks
//! - **stack**: The persistent, structurally shared stack behind each scope
//! - **component**: Rendering units (text, tags, partials, blocks) that query
//!   and extend the runtime
//! - **template**: The template handle a root runtime is seeded from
//! - **options**: Render options, loadable from TOML
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use mustache_runtime::{Expression, Template, Text, Variable};
//!
//! let template = Arc::new(
//!     Template::new("greeting")
//!         .with_component(Text::new("Hello, "))
//!         .with_component(Variable::escaped(Expression::filtered(
//!             "capitalized",
//!             Expression::key("name"),
//!         ))),
//! );
//!
//! let rendered = template.render(serde_json::json!({"name": "alice"})).unwrap();
//! assert_eq!(rendered, "Hello, Alice");
//! ```

pub mod component;
pub mod error;
pub mod expression;
pub mod options;
pub mod runtime;
pub mod stack;
pub mod template;

pub use component::*;
pub use error::*;
pub use expression::*;
pub use options::*;
pub use runtime::*;
pub use stack::Stack;
pub use template::*;
