//! Per-call rendering state.

use std::rc::Rc;

use crate::ast::{AliasedSource, SourceArena, SourceId};
use crate::error::Result;

use super::FormatOptions;

/// The kind of statement being rendered. Columns are left unqualified
/// inside INSERT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
}

/// What a node needs to render itself: the arena its source handles point
/// into, the options, the indentation depth and the statement kind.
///
/// Cloning is cheap; the options are shared until a clone changes them.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    sources: &'a SourceArena,
    options: Rc<FormatOptions>,
    depth: usize,
    statement: StatementKind,
}

impl<'a> RenderContext<'a> {
    /// Creates a context at depth zero for a SELECT.
    #[must_use]
    pub fn new(sources: &'a SourceArena, options: &FormatOptions) -> Self {
        Self {
            sources,
            options: Rc::new(options.clone()),
            depth: 0,
            statement: StatementKind::Select,
        }
    }

    #[must_use]
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub const fn statement(&self) -> StatementKind {
        self.statement
    }

    /// Looks up a source handle.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] for an unknown handle.
    pub fn source(&self, id: SourceId) -> Result<&'a AliasedSource> {
        self.sources.source(id)
    }

    /// A copy one indentation level deeper.
    #[must_use]
    pub fn indent(&self) -> Self {
        let mut context = self.clone();
        context.depth += 1;
        context
    }

    /// A copy for rendering a statement of another kind.
    #[must_use]
    pub fn for_statement(&self, statement: StatementKind) -> Self {
        let mut context = self.clone();
        context.statement = statement;
        context
    }

    /// A copy whose options are changed by `change`. The original keeps its
    /// options.
    #[must_use]
    pub fn with_options(&self, change: impl FnOnce(&mut FormatOptions)) -> Self {
        let mut context = self.clone();
        change(Rc::make_mut(&mut context.options));
        context
    }

    /// Leading whitespace for the current depth.
    #[must_use]
    pub fn indentation(&self) -> String {
        " ".repeat(self.depth * self.options.indent_step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_options_does_not_touch_original() {
        let arena = SourceArena::new();
        let options = FormatOptions {
            one_value_list_item_per_line: true,
            ..FormatOptions::default()
        };
        let context = RenderContext::new(&arena, &options);
        let single_line = context.with_options(|o| o.one_value_list_item_per_line = false);
        assert!(context.options().one_value_list_item_per_line);
        assert!(!single_line.options().one_value_list_item_per_line);
    }

    #[test]
    fn test_indentation_follows_depth() {
        let arena = SourceArena::new();
        let options = FormatOptions {
            indent_step: 2,
            ..FormatOptions::default()
        };
        let context = RenderContext::new(&arena, &options);
        assert_eq!(context.indentation(), "");
        assert_eq!(context.indent().indent().indentation(), "    ");
    }
}
