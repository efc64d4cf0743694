//! Filter AST types used by WHERE, HAVING and ON clauses.

use super::expression::{Expression, ValueProvider};
use super::statement::Query;

/// Comparison operators shared by plain and quantified comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    EqualTo,
    NotEqualTo,
    LessThan,
    LessThanEqualTo,
    GreaterThan,
    GreaterThanEqualTo,
}

impl ComparisonOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EqualTo => "=",
            Self::NotEqualTo => "<>",
            Self::LessThan => "<",
            Self::LessThanEqualTo => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanEqualTo => ">=",
        }
    }
}

/// Quantifier of a quantified comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    All,
    Any,
    Some,
}

impl Quantifier {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Any => "ANY",
            Self::Some => "SOME",
        }
    }
}

/// Connects a filter group entry to the entry before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Conjunction {
    #[default]
    And,
    Or,
}

impl Conjunction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// A condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `left op right`
    Comparison {
        left: Expression,
        op: ComparisonOp,
        right: Expression,
    },
    /// `left op ANY (values)`
    Quantified {
        left: Expression,
        op: ComparisonOp,
        quantifier: Quantifier,
        values: ValueProvider,
    },
    /// `expression [NOT] BETWEEN lower AND upper`
    Between {
        expression: Expression,
        lower: Expression,
        upper: Expression,
        not: bool,
    },
    /// `expression [NOT] LIKE 'pattern'`
    Like {
        expression: Expression,
        pattern: String,
        not: bool,
    },
    /// `expression IS [NOT] NULL`
    Null { expression: Expression, not: bool },
    /// `expression [NOT] IN values`
    In {
        expression: Expression,
        values: ValueProvider,
        not: bool,
    },
    /// `EXISTS (query)`
    Exists(Box<Query>),
    /// `NOT filter`
    Not(Box<Filter>),
    /// A nested group.
    Group(FilterGroup),
}

impl Filter {
    /// A plain comparison.
    #[must_use]
    pub const fn comparison(left: Expression, op: ComparisonOp, right: Expression) -> Self {
        Self::Comparison { left, op, right }
    }

    /// Negates this filter with `NOT`.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }
}

/// An ordered list of filters joined by AND or OR.
///
/// The conjunction of the first entry is ignored when rendering. Nothing
/// is regrouped: the text reflects the stored conjunctions exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterGroup {
    entries: Vec<(Conjunction, Filter)>,
    pub wrap_in_parentheses: bool,
}

impl FilterGroup {
    /// Creates an empty, unwrapped group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty group rendered inside parentheses.
    #[must_use]
    pub fn wrapped() -> Self {
        Self {
            entries: Vec::new(),
            wrap_in_parentheses: true,
        }
    }

    /// Appends a filter with the given conjunction.
    pub fn add(&mut self, conjunction: Conjunction, filter: Filter) {
        self.entries.push((conjunction, filter));
    }

    /// Appends a filter joined with AND.
    pub fn and(&mut self, filter: Filter) {
        self.add(Conjunction::And, filter);
    }

    /// Appends a filter joined with OR.
    pub fn or(&mut self, filter: Filter) {
        self.add(Conjunction::Or, filter);
    }

    /// Removes and returns the entry at `index`.
    pub fn remove(&mut self, index: usize) -> Option<(Conjunction, Filter)> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    #[must_use]
    pub fn entries(&self) -> &[(Conjunction, Filter)] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if rendering would produce any text: at least one entry
    /// that is not an empty nested group.
    #[must_use]
    pub fn has_filters(&self) -> bool {
        self.entries.iter().any(|(_, filter)| match filter {
            Filter::Group(group) => group.has_filters(),
            _ => true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eq(column: &str, value: f64) -> Filter {
        Filter::comparison(
            Expression::column(column),
            ComparisonOp::EqualTo,
            Expression::number(value),
        )
    }

    #[test]
    fn test_group_keeps_conjunctions_in_order() {
        let mut group = FilterGroup::new();
        group.and(eq("a", 1.0));
        group.or(eq("b", 2.0));
        let conjunctions: Vec<_> = group.entries().iter().map(|(c, _)| *c).collect();
        assert_eq!(conjunctions, vec![Conjunction::And, Conjunction::Or]);
    }

    #[test]
    fn test_empty_nested_groups_have_no_filters() {
        let mut group = FilterGroup::new();
        group.and(Filter::Group(FilterGroup::wrapped()));
        assert!(!group.is_empty());
        assert!(!group.has_filters());
        group.or(eq("a", 1.0));
        assert!(group.has_filters());
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut group = FilterGroup::new();
        group.and(eq("a", 1.0));
        assert!(group.remove(3).is_none());
        assert!(group.remove(0).is_some());
        assert!(group.is_empty());
    }
}
