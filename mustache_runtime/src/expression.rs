//! Tag expressions: key paths and filter applications.

use std::fmt;

/// What a variable or section tag evaluates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// `.` or a dotted key path such as `user.name`.
    Key(String),

    /// `filter(argument)`.
    Filtered {
        filter: String,
        argument: Box<Expression>,
    },
}

impl Expression {
    pub fn key(path: impl Into<String>) -> Self {
        Expression::Key(path.into())
    }

    pub fn filtered(filter: impl Into<String>, argument: Expression) -> Self {
        Expression::Filtered {
            filter: filter.into(),
            argument: Box::new(argument),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Key(path) => f.write_str(path),
            Expression::Filtered { filter, argument } => write!(f, "{}({})", filter, argument),
        }
    }
}
