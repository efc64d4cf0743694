//! Expression AST types.

use crate::error::{Error, Result};
use crate::render::identifier;

use super::source::{Namespace, SourceId};
use super::statement::Query;

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Numeric literal.
    Number(f64),
    /// String literal, unescaped.
    String(String),
    /// NULL literal.
    Null,
}

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ArithmeticOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

/// A column of a source.
///
/// A column without a source renders bare. A column with a source renders
/// qualified by the source's reference unless `qualify` is false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub source: Option<SourceId>,
    pub name: String,
    pub qualify: bool,
}

impl Column {
    /// Creates a column that is not tied to a source.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            source: None,
            name: name.into(),
            qualify: false,
        }
    }

    /// Creates a column of `source`, rendered qualified.
    #[must_use]
    pub fn of(source: SourceId, name: impl Into<String>) -> Self {
        Self {
            source: Some(source),
            name: name.into(),
            qualify: true,
        }
    }
}

/// A binary arithmetic expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Arithmetic {
    pub op: ArithmeticOp,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    /// Whether the expression is surrounded by parentheses.
    pub wrap_in_parentheses: bool,
}

impl Arithmetic {
    /// Creates an unwrapped arithmetic expression.
    #[must_use]
    pub fn new(op: ArithmeticOp, left: Expression, right: Expression) -> Self {
        Self {
            op,
            left: Box::new(left),
            right: Box::new(right),
            wrap_in_parentheses: false,
        }
    }

    /// Surrounds the expression with parentheses.
    #[must_use]
    pub const fn wrapped(mut self) -> Self {
        self.wrap_in_parentheses = true;
        self
    }
}

/// An ordered list of values, rendered as `(a, b, c)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueList {
    values: Vec<Expression>,
}

impl ValueList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_value(&mut self, value: Expression) {
        self.values.push(value);
    }

    /// Removes and returns the value at `index`.
    pub fn remove_value(&mut self, index: usize) -> Option<Expression> {
        (index < self.values.len()).then(|| self.values.remove(index))
    }

    #[must_use]
    pub fn values(&self) -> &[Expression] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<Expression> for ValueList {
    fn from_iter<T: IntoIterator<Item = Expression>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// A function call, usable as an expression, a source or a value provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    namespace: Option<Namespace>,
    name: String,
    arguments: ValueList,
}

impl Function {
    /// Creates a call without arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `name` is blank.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::invalid_argument(
                "name",
                "a function name cannot be blank",
            ));
        }
        Ok(Self {
            namespace: None,
            name,
            arguments: ValueList::new(),
        })
    }

    /// Places the function inside `namespace`. An empty namespace is dropped.
    #[must_use]
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = (!namespace.is_empty()).then_some(namespace);
        self
    }

    /// Appends an argument, builder style.
    #[must_use]
    pub fn with_argument(mut self, argument: Expression) -> Self {
        self.add_argument(argument);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn namespace(&self) -> Option<&Namespace> {
        self.namespace.as_ref()
    }

    /// The name with its namespace, e.g. `dbo.fn_split`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(namespace) => namespace.qualify(&self.name),
            None => identifier(&self.name).into_owned(),
        }
    }

    #[must_use]
    pub const fn arguments(&self) -> &ValueList {
        &self.arguments
    }

    pub fn add_argument(&mut self, argument: Expression) {
        self.arguments.add_value(argument);
    }

    /// Removes and returns the argument at `index`.
    pub fn remove_argument(&mut self, index: usize) -> Option<Expression> {
        self.arguments.remove_value(index)
    }
}

/// An SQL expression: a projection item, filter operand or group-by item.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Column reference.
    Column(Column),
    /// Literal value.
    Literal(Literal),
    /// Function call.
    Function(Function),
    /// Binary arithmetic.
    Arithmetic(Arithmetic),
    /// Unary minus.
    Negation(Box<Expression>),
    /// Parenthesized subquery.
    Subquery(Box<Query>),
    /// `*` or `alias.*`.
    AllColumns(Option<SourceId>),
}

impl Expression {
    /// A bare column.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(Column::new(name))
    }

    /// A numeric literal.
    #[must_use]
    pub const fn number(value: f64) -> Self {
        Self::Literal(Literal::Number(value))
    }

    /// A string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    /// The NULL literal.
    #[must_use]
    pub const fn null() -> Self {
        Self::Literal(Literal::Null)
    }

    /// An unwrapped arithmetic expression.
    #[must_use]
    pub fn arithmetic(op: ArithmeticOp, left: Self, right: Self) -> Self {
        Self::Arithmetic(Arithmetic::new(op, left, right))
    }

    /// Unary minus.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Negation(Box::new(self))
    }

    /// A parenthesized subquery.
    #[must_use]
    pub fn subquery(query: Query) -> Self {
        Self::Subquery(Box::new(query))
    }
}

impl From<Column> for Expression {
    fn from(column: Column) -> Self {
        Self::Column(column)
    }
}

impl From<Function> for Expression {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl From<Arithmetic> for Expression {
    fn from(arithmetic: Arithmetic) -> Self {
        Self::Arithmetic(arithmetic)
    }
}

/// The right-hand side of IN, quantified comparisons and INSERT.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueProvider {
    List(ValueList),
    Query(Box<Query>),
    Function(Function),
}

impl ValueProvider {
    /// Returns true for subqueries, which INSERT renders without `VALUES`.
    #[must_use]
    pub const fn is_query(&self) -> bool {
        matches!(self, Self::Query(_))
    }
}

impl From<ValueList> for ValueProvider {
    fn from(list: ValueList) -> Self {
        Self::List(list)
    }
}

impl From<Query> for ValueProvider {
    fn from(query: Query) -> Self {
        Self::Query(Box::new(query))
    }
}
