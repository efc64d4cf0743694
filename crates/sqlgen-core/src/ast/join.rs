//! Join AST types.

use super::filter::FilterGroup;
use super::source::SourceId;

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// CROSS JOIN.
    Cross,
    /// [INNER] JOIN.
    Inner,
    /// LEFT [OUTER] JOIN.
    LeftOuter,
    /// RIGHT [OUTER] JOIN.
    RightOuter,
    /// FULL [OUTER] JOIN.
    FullOuter,
}

impl JoinType {
    /// Returns true for joins that take an ON clause.
    #[must_use]
    pub const fn is_filtered(&self) -> bool {
        !matches!(self, Self::Cross)
    }
}

/// One entry of a FROM list.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinItem {
    /// A single table, subquery or function.
    Source(SourceId),
    /// A chain of joins.
    Join(Box<Join>),
}

impl From<SourceId> for JoinItem {
    fn from(source: SourceId) -> Self {
        Self::Source(source)
    }
}

impl From<Join> for JoinItem {
    fn from(join: Join) -> Self {
        Self::Join(Box::new(join))
    }
}

/// One link of a join chain: the join type, the right-hand source and the
/// ON condition (always empty for cross joins).
#[derive(Debug, Clone, PartialEq)]
pub struct JoinStep {
    pub join_type: JoinType,
    pub source: SourceId,
    pub on: FilterGroup,
}

/// A left-associative chain of joins starting from `first`.
///
/// `a JOIN b ON .. JOIN c ON ..` is one `Join` with two steps. A
/// parenthesized join used as the start of another chain is a nested `Join`
/// with `wrap_in_parentheses` set.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub first: JoinItem,
    pub steps: Vec<JoinStep>,
    pub wrap_in_parentheses: bool,
}

impl Join {
    /// Starts a chain.
    #[must_use]
    pub fn new(first: impl Into<JoinItem>) -> Self {
        Self {
            first: first.into(),
            steps: Vec::new(),
            wrap_in_parentheses: false,
        }
    }

    /// Surrounds the chain with parentheses.
    #[must_use]
    pub const fn wrapped(mut self) -> Self {
        self.wrap_in_parentheses = true;
        self
    }

    /// Appends a step.
    #[must_use]
    pub fn join(mut self, join_type: JoinType, source: SourceId, on: FilterGroup) -> Self {
        self.steps.push(JoinStep {
            join_type,
            source,
            on,
        });
        self
    }

    /// Appends a CROSS JOIN.
    #[must_use]
    pub fn cross_join(self, source: SourceId) -> Self {
        self.join(JoinType::Cross, source, FilterGroup::new())
    }

    /// Appends an INNER JOIN.
    #[must_use]
    pub fn inner_join(self, source: SourceId, on: FilterGroup) -> Self {
        self.join(JoinType::Inner, source, on)
    }

    /// Appends a LEFT OUTER JOIN.
    #[must_use]
    pub fn left_outer_join(self, source: SourceId, on: FilterGroup) -> Self {
        self.join(JoinType::LeftOuter, source, on)
    }

    /// Appends a RIGHT OUTER JOIN.
    #[must_use]
    pub fn right_outer_join(self, source: SourceId, on: FilterGroup) -> Self {
        self.join(JoinType::RightOuter, source, on)
    }

    /// Appends a FULL OUTER JOIN.
    #[must_use]
    pub fn full_outer_join(self, source: SourceId, on: FilterGroup) -> Self {
        self.join(JoinType::FullOuter, source, on)
    }

    /// Removes and returns the step at `index`.
    pub fn remove_step(&mut self, index: usize) -> Option<JoinStep> {
        (index < self.steps.len()).then(|| self.steps.remove(index))
    }

    /// Every source in the chain, left to right.
    #[must_use]
    pub fn sources(&self) -> Vec<SourceId> {
        let mut sources = self.first.sources();
        sources.extend(self.steps.iter().map(|step| step.source));
        sources
    }
}

impl JoinItem {
    /// Every source reachable from this item, left to right.
    #[must_use]
    pub fn sources(&self) -> Vec<SourceId> {
        match self {
            Self::Source(id) => vec![*id],
            Self::Join(join) => join.sources(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{SourceArena, Table};

    #[test]
    fn test_sources_are_listed_left_to_right() {
        let mut arena = SourceArena::new();
        let a = arena.add_table(Table::new("a").unwrap());
        let b = arena.add_table(Table::new("b").unwrap());
        let c = arena.add_table(Table::new("c").unwrap());
        let inner = Join::new(a).cross_join(b).wrapped();
        let outer = Join::new(inner).inner_join(c, FilterGroup::new());
        assert_eq!(outer.sources(), vec![a, b, c]);
        assert!(matches!(&outer.first, JoinItem::Join(j) if j.wrap_in_parentheses));
    }

    #[test]
    fn test_remove_step() {
        let mut arena = SourceArena::new();
        let a = arena.add_table(Table::new("a").unwrap());
        let b = arena.add_table(Table::new("b").unwrap());
        let mut join = Join::new(a).left_outer_join(b, FilterGroup::new());
        assert_eq!(join.remove_step(0).map(|s| s.join_type), Some(JoinType::LeftOuter));
        assert!(join.steps.is_empty());
    }
}
