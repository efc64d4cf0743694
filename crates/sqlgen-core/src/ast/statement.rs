//! SQL statement AST types.

use crate::error::{Error, Result};

use super::expression::{Column, Expression, ValueProvider};
use super::filter::FilterGroup;
use super::join::JoinItem;
use super::source::{Source, SourceArena, SourceId};

/// DISTINCT / ALL qualifier of a SELECT or a combiner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistinctQualifier {
    /// No qualifier written.
    #[default]
    Default,
    Distinct,
    All,
}

impl DistinctQualifier {
    /// Returns the keyword, if one is written.
    #[must_use]
    pub const fn as_str(&self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Distinct => Some("DISTINCT"),
            Self::All => Some("ALL"),
        }
    }
}

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// No direction written.
    #[default]
    Default,
    Ascending,
    Descending,
}

impl OrderDirection {
    /// Returns the SQL representation, if one is written.
    #[must_use]
    pub const fn as_str(&self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Ascending => Some("ASC"),
            Self::Descending => Some("DESC"),
        }
    }
}

/// Null placement for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullPlacement {
    #[default]
    Default,
    First,
    Last,
}

impl NullPlacement {
    /// Returns the SQL representation, if one is written.
    #[must_use]
    pub const fn as_str(&self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::First => Some("NULLS FIRST"),
            Self::Last => Some("NULLS LAST"),
        }
    }
}

/// An ORDER BY entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub expression: Expression,
    pub direction: OrderDirection,
    pub nulls: NullPlacement,
}

impl OrderBy {
    /// Orders by `expression` with no direction or null placement.
    #[must_use]
    pub fn new(expression: Expression) -> Self {
        Self {
            expression,
            direction: OrderDirection::Default,
            nulls: NullPlacement::Default,
        }
    }

    #[must_use]
    pub const fn with_direction(mut self, direction: OrderDirection) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub const fn with_nulls(mut self, nulls: NullPlacement) -> Self {
        self.nulls = nulls;
        self
    }
}

/// `TOP <expression> [PERCENT] [WITH TIES]`
#[derive(Debug, Clone, PartialEq)]
pub struct Top {
    pub expression: Expression,
    pub percent: bool,
    pub with_ties: bool,
}

impl Top {
    #[must_use]
    pub const fn new(expression: Expression) -> Self {
        Self {
            expression,
            percent: false,
            with_ties: false,
        }
    }
}

/// A projection list entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub item: Expression,
    pub alias: Option<String>,
}

/// A single SELECT specification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectBuilder {
    pub distinct: DistinctQualifier,
    pub top: Option<Top>,
    pub from: Vec<JoinItem>,
    pub projections: Vec<Projection>,
    pub where_filter: FilterGroup,
    pub group_by: Vec<Expression>,
    pub having: FilterGroup,
    pub order_by: Vec<OrderBy>,
}

impl SelectBuilder {
    /// Creates an empty SELECT.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a FROM list entry.
    pub fn add_join_item(&mut self, item: impl Into<JoinItem>) {
        self.from.push(item.into());
    }

    /// Removes and returns the FROM list entry at `index`.
    pub fn remove_join_item(&mut self, index: usize) -> Option<JoinItem> {
        (index < self.from.len()).then(|| self.from.remove(index))
    }

    /// Adds an unaliased projection.
    pub fn add_projection(&mut self, item: Expression) {
        self.projections.push(Projection { item, alias: None });
    }

    /// Adds an aliased projection.
    pub fn add_projection_as(&mut self, item: Expression, alias: impl Into<String>) {
        self.projections.push(Projection {
            item,
            alias: Some(alias.into()),
        });
    }

    /// Removes and returns the projection at `index`.
    pub fn remove_projection(&mut self, index: usize) -> Option<Projection> {
        (index < self.projections.len()).then(|| self.projections.remove(index))
    }

    pub fn add_group_by(&mut self, item: Expression) {
        self.group_by.push(item);
    }

    pub fn add_order_by(&mut self, order_by: OrderBy) {
        self.order_by.push(order_by);
    }
}

/// Set operation of a [`SelectCombiner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinerKind {
    Union,
    Intersect,
    Except,
    Minus,
}

impl CombinerKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
            Self::Minus => "MINUS",
        }
    }
}

/// Queries joined by one set operation, e.g. `(q1) UNION ALL (q2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectCombiner {
    pub kind: CombinerKind,
    pub distinct: DistinctQualifier,
    pub queries: Vec<Query>,
    pub order_by: Vec<OrderBy>,
}

impl SelectCombiner {
    /// Creates a combiner with no queries.
    #[must_use]
    pub const fn new(kind: CombinerKind) -> Self {
        Self {
            kind,
            distinct: DistinctQualifier::Default,
            queries: Vec::new(),
            order_by: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_qualifier(mut self, distinct: DistinctQualifier) -> Self {
        self.distinct = distinct;
        self
    }

    pub fn add_query(&mut self, query: impl Into<Query>) {
        self.queries.push(query.into());
    }

    /// Removes and returns the query at `index`.
    pub fn remove_query(&mut self, index: usize) -> Option<Query> {
        (index < self.queries.len()).then(|| self.queries.remove(index))
    }
}

/// Anything usable where a query is expected.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Select(Box<SelectBuilder>),
    Combined(Box<SelectCombiner>),
}

impl Query {
    /// The ORDER BY list of the outermost query.
    #[must_use]
    pub fn order_by(&self) -> &[OrderBy] {
        match self {
            Self::Select(select) => &select.order_by,
            Self::Combined(combiner) => &combiner.order_by,
        }
    }

    pub fn order_by_mut(&mut self) -> &mut Vec<OrderBy> {
        match self {
            Self::Select(select) => &mut select.order_by,
            Self::Combined(combiner) => &mut combiner.order_by,
        }
    }
}

impl From<SelectBuilder> for Query {
    fn from(select: SelectBuilder) -> Self {
        Self::Select(Box::new(select))
    }
}

impl From<SelectCombiner> for Query {
    fn from(combiner: SelectCombiner) -> Self {
        Self::Combined(Box::new(combiner))
    }
}

/// `INSERT INTO table [(columns)] VALUES (...)` or `... <query>`.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertBuilder {
    table: SourceId,
    columns: Vec<Column>,
    values: ValueProvider,
}

impl InsertBuilder {
    /// Creates an INSERT into `table`, which must be a table in `sources`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `table` is unknown or is not a
    /// table.
    pub fn new(sources: &SourceArena, table: SourceId, values: ValueProvider) -> Result<Self> {
        match sources.source(table)?.source {
            Source::Table(_) => Ok(Self {
                table,
                columns: Vec::new(),
                values,
            }),
            _ => Err(Error::invalid_argument(
                "table",
                "the target of an INSERT must be a table",
            )),
        }
    }

    #[must_use]
    pub const fn table(&self) -> SourceId {
        self.table
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Removes and returns the column at `index`.
    pub fn remove_column(&mut self, index: usize) -> Option<Column> {
        (index < self.columns.len()).then(|| self.columns.remove(index))
    }

    #[must_use]
    pub const fn values(&self) -> &ValueProvider {
        &self.values
    }
}

/// A top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(Query),
    Insert(InsertBuilder),
}

impl Statement {
    /// The statement keyword.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Select(_) => "SELECT",
            Self::Insert(_) => "INSERT",
        }
    }
}

/// A statement together with the arena owning its sources.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub sources: SourceArena,
    pub statement: Statement,
}

impl Command {
    #[must_use]
    pub const fn new(sources: SourceArena, statement: Statement) -> Self {
        Self { sources, statement }
    }

    /// Returns the query of a SELECT command.
    #[must_use]
    pub const fn query(&self) -> Option<&Query> {
        match &self.statement {
            Statement::Select(query) => Some(query),
            Statement::Insert(_) => None,
        }
    }

    /// Returns the single SELECT specification of a SELECT command, if it is
    /// not a combiner.
    #[must_use]
    pub fn select(&self) -> Option<&SelectBuilder> {
        match self.query()? {
            Query::Select(select) => Some(select),
            Query::Combined(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Function, Table, ValueList};

    #[test]
    fn test_insert_target_must_be_a_table() {
        let mut arena = SourceArena::new();
        let table = arena.add_table(Table::new("t").unwrap());
        let function = arena.add(Source::Function(Function::new("f").unwrap()), None);
        let values = ValueProvider::List(ValueList::new());
        assert!(InsertBuilder::new(&arena, table, values.clone()).is_ok());
        assert!(matches!(
            InsertBuilder::new(&arena, function, values),
            Err(Error::InvalidArgument { ref argument, .. }) if argument == "table"
        ));
    }

    #[test]
    fn test_projection_add_remove() {
        let mut select = SelectBuilder::new();
        select.add_projection(Expression::column("a"));
        select.add_projection_as(Expression::column("b"), "bee");
        let removed = select.remove_projection(0).unwrap();
        assert_eq!(removed.item, Expression::column("a"));
        assert_eq!(select.projections[0].alias.as_deref(), Some("bee"));
        assert!(select.remove_projection(4).is_none());
    }

    #[test]
    fn test_order_by_targets_outermost_query() {
        let mut combiner = SelectCombiner::new(CombinerKind::Union);
        combiner.add_query(SelectBuilder::new());
        let mut query = Query::from(combiner);
        query.order_by_mut().push(OrderBy::new(Expression::number(1.0)));
        assert_eq!(query.order_by().len(), 1);
        assert!(matches!(&query, Query::Combined(c) if c.queries[0].order_by().is_empty()));
    }
}
