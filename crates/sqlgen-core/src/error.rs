//! Error types for parsing and rendering.

use crate::lexer::Span;

/// Errors that can occur while parsing or rendering a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The text does not match the grammar.
    #[error("Syntax error at {span}: {message}")]
    Syntax {
        /// Description naming the offending token.
        message: String,
        /// Location of the furthest token examined.
        span: Span,
    },

    /// The statement is recognized but cannot be built.
    #[error("{statement} statements are not supported")]
    Unsupported {
        /// The statement keyword (INSERT, UPDATE or DELETE).
        statement: String,
    },

    /// A value handed to the construction API is not acceptable.
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument {
        /// Name of the rejected argument.
        argument: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A subquery or combiner source was referenced without an alias.
    #[error("A source without an alias cannot be referenced")]
    UnaliasedSource,

    /// A value list must contain at least one value to be rendered.
    #[error("A value list must contain at least one value")]
    EmptyValueList,

    /// A select combiner must contain at least one query to be rendered.
    #[error("A select combiner must contain at least one query")]
    NoQueries,

    /// A SELECT must project at least one item to be rendered.
    #[error("A SELECT must have at least one projection")]
    NoProjections,

    /// A filtered join must have a condition to be rendered.
    #[error("{join} requires an ON condition")]
    MissingJoinCondition {
        /// The join keyword as it would be rendered.
        join: String,
    },

    /// The builder met a parse tree shape it does not handle.
    #[error("Internal error in rule '{rule}': {detail}")]
    Internal {
        /// The grammar rule being processed.
        rule: String,
        /// What went wrong.
        detail: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidArgument`].
    #[must_use]
    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::Internal`].
    #[must_use]
    pub fn internal(rule: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Internal {
            rule: rule.into(),
            detail: detail.into(),
        }
    }
}

/// Result type for parsing and rendering operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err = Error::Syntax {
            message: String::from("unexpected token 'FROM'"),
            span: Span::new(7, 11),
        };
        assert_eq!(err.to_string(), "Syntax error at 7..11: unexpected token 'FROM'");
    }

    #[test]
    fn test_unsupported_display() {
        let err = Error::Unsupported {
            statement: String::from("DELETE"),
        };
        assert_eq!(err.to_string(), "DELETE statements are not supported");
    }

    #[test]
    fn test_render_error_display() {
        assert_eq!(
            Error::NoProjections.to_string(),
            "A SELECT must have at least one projection"
        );
        let err = Error::MissingJoinCondition {
            join: String::from("LEFT JOIN"),
        };
        assert_eq!(err.to_string(), "LEFT JOIN requires an ON condition");
    }

    #[test]
    fn test_constructors() {
        assert_eq!(
            Error::invalid_argument("name", "cannot be blank").to_string(),
            "Invalid argument 'name': cannot be blank"
        );
        assert!(matches!(
            Error::internal("Filter", "no alternative"),
            Error::Internal { rule, .. } if rule == "Filter"
        ));
    }
}
