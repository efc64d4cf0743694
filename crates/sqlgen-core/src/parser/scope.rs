//! Source scopes used to resolve column references while building.

use tracing::trace;

use crate::ast::{SourceArena, SourceId};

/// One nesting level: the sources visible there, with the name each one is
/// referenced by (subqueries without an alias have none).
#[derive(Debug, Clone, Default)]
struct Scope {
    sources: Vec<(Option<String>, SourceId)>,
}

/// Stack of scopes, innermost last.
#[derive(Debug, Clone, Default)]
pub(crate) struct ScopeStack {
    scopes: Vec<Scope>,
}

impl ScopeStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Makes `sources` the innermost scope.
    pub(crate) fn push(&mut self, arena: &SourceArena, sources: &[SourceId]) {
        let sources = sources
            .iter()
            .map(|&id| {
                let name = arena
                    .get(id)
                    .and_then(|source| source.scope_name())
                    .map(str::to_string);
                (name, id)
            })
            .collect();
        self.scopes.push(Scope { sources });
        trace!(depth = self.depth(), "pushed scope");
    }

    pub(crate) fn pop(&mut self) {
        self.scopes.pop();
        trace!(depth = self.depth(), "popped scope");
    }

    /// Finds the source called `name`, searching from the innermost scope
    /// outwards. Names compare case-insensitively.
    pub(crate) fn resolve(&self, name: &str) -> Option<SourceId> {
        self.scopes.iter().rev().find_map(|scope| {
            scope.sources.iter().find_map(|(source_name, id)| {
                source_name
                    .as_deref()
                    .filter(|source_name| source_name.eq_ignore_ascii_case(name))
                    .map(|_| *id)
            })
        })
    }

    /// The only source of the innermost scope, if it has exactly one.
    pub(crate) fn single_source(&self) -> Option<SourceId> {
        match self.scopes.last()?.sources.as_slice() {
            [(_, id)] => Some(*id),
            _ => None,
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.scopes.len()
    }
}
