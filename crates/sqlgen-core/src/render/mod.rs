//! SQL text generation.
//!
//! Every AST node implements [`Render`]. Parentheses come only from the
//! flags stored on nodes (and from subqueries, which are always wrapped);
//! the renderer never regroups.

mod context;
mod expression;
mod filter;
mod options;
mod query;

use std::borrow::Cow;

use tracing::debug;

use crate::ast::{Command, Statement};
use crate::error::Result;
use crate::lexer::Keyword;

pub use context::{RenderContext, StatementKind};
pub use options::FormatOptions;

/// A node that can write itself as SQL.
pub trait Render {
    /// Renders the node.
    ///
    /// # Errors
    ///
    /// Returns an error when the node (or a child) is inconsistent, e.g. an
    /// empty value list or a reference to an unaliased subquery.
    fn render(&self, context: &RenderContext<'_>) -> Result<String>;
}

/// Renders a command with the given options.
///
/// # Errors
///
/// Returns the first consistency error found; no partial text is returned.
pub fn render(command: &Command, options: &FormatOptions) -> Result<String> {
    debug!(statement = command.statement.kind(), "rendering command");
    let context = RenderContext::new(&command.sources, options);
    command.statement.render(&context)
}

impl Command {
    /// Renders the command in the default style.
    ///
    /// # Errors
    ///
    /// See [`render`].
    pub fn to_sql(&self) -> Result<String> {
        render(self, &FormatOptions::default())
    }
}

impl Render for Statement {
    fn render(&self, context: &RenderContext<'_>) -> Result<String> {
        match self {
            Self::Select(query) => query.render(&context.for_statement(StatementKind::Select)),
            Self::Insert(insert) => insert.render(&context.for_statement(StatementKind::Insert)),
        }
    }
}

/// Writes `name` bare when the tokenizer would read it back as the same
/// identifier, and double-quoted otherwise.
pub(crate) fn identifier(name: &str) -> Cow<'_, str> {
    let mut chars = name.chars();
    let plain = chars.next().is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && Keyword::from_str(name).is_none();
    if plain {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("\"{}\"", name.replace('"', "\"\"")))
    }
}

/// A quoted string literal with embedded quotes doubled.
pub(crate) fn string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Separator in front of a clause: a space, or a new line at the current
/// depth.
pub(crate) fn clause_break(context: &RenderContext<'_>) -> String {
    if context.options().one_clause_per_line {
        format!("\n{}", context.indentation())
    } else {
        String::from(" ")
    }
}

/// `head item, item` or, one per line, `head` followed by the items on
/// their own (optionally indented) lines.
pub(crate) fn item_list(
    context: &RenderContext<'_>,
    head: &str,
    items: &[String],
    one_per_line: bool,
    indent: bool,
) -> String {
    if one_per_line {
        let prefix = if indent {
            context.indent().indentation()
        } else {
            context.indentation()
        };
        let lines: Vec<String> = items.iter().map(|item| format!("{prefix}{item}")).collect();
        format!("{head}\n{}", lines.join(",\n"))
    } else {
        format!("{head} {}", items.join(", "))
    }
}
