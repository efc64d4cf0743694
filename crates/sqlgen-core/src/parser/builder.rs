//! Builds AST nodes from the parse tree.

use tracing::{debug, trace};

use crate::ast::{
    ArithmeticOp, Column, CombinerKind, Command, ComparisonOp, Conjunction, DistinctQualifier,
    Expression, Filter, FilterGroup, Function, Join, JoinItem, JoinType, Namespace,
    NullPlacement, OrderBy, OrderDirection, Projection, Quantifier, Query, SelectBuilder,
    SelectCombiner, Source, SourceArena, SourceId, Statement, Table, Top, ValueList,
    ValueProvider,
};
use crate::error::{Error, Result};
use crate::grammar::{sql_grammar, Grammar, ParseNode};

use super::scope::ScopeStack;

/// Turns SQL text into a [`Command`].
///
/// The builder holds no per-call state, so one value can be reused for any
/// number of commands.
#[derive(Debug, Clone, Copy)]
pub struct CommandBuilder {
    grammar: &'static Grammar,
}

impl Default for CommandBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandBuilder {
    /// Creates a builder over the SQL grammar.
    #[must_use]
    pub fn new() -> Self {
        Self {
            grammar: sql_grammar(),
        }
    }

    /// Parses a single SELECT statement, optionally terminated by `;`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] if the text is not valid SQL,
    /// [`Error::Unsupported`] for INSERT, UPDATE and DELETE, and
    /// [`Error::Internal`] if the parse tree has an unexpected shape.
    pub fn parse(&self, text: &str) -> Result<Command> {
        debug!(length = text.len(), "parsing command");
        let tree = self.grammar.parse("Start", text)?;
        let statement = child(&tree, "Start", "Statement")?;
        let mut build = Build::new();
        let statement = match alternative(statement, "Statement")? {
            ("Select", node) => Statement::Select(build.select_statement(node)?),
            ("Insert", _) => return Err(unsupported("INSERT")),
            ("Update", _) => return Err(unsupported("UPDATE")),
            ("Delete", _) => return Err(unsupported("DELETE")),
            (other, _) => return Err(unexpected("Statement", other)),
        };
        debug!(sources = build.arena.len(), "built command");
        Ok(Command::new(build.arena, statement))
    }
}

/// Parses `text` with a default [`CommandBuilder`].
///
/// # Errors
///
/// See [`CommandBuilder::parse`].
pub fn parse(text: &str) -> Result<Command> {
    CommandBuilder::new().parse(text)
}

fn unsupported(statement: &str) -> Error {
    debug!(statement, "statement is recognized but not supported");
    Error::Unsupported {
        statement: statement.to_string(),
    }
}

fn unexpected(rule: &str, alternative: &str) -> Error {
    Error::internal(rule, format!("unexpected alternative '{alternative}'"))
}

fn child<'n>(node: &'n ParseNode, rule: &str, name: &str) -> Result<&'n ParseNode> {
    node.child(name)
        .ok_or_else(|| Error::internal(rule, format!("missing '{name}'")))
}

fn alternative<'n>(node: &'n ParseNode, rule: &str) -> Result<(&'static str, &'n ParseNode)> {
    node.alternative()
        .ok_or_else(|| Error::internal(rule, "no alternative matched"))
}

/// Flattens a right-recursive `Multiple | Single` list into its items.
fn list_items<'n>(node: &'n ParseNode, rule: &str) -> Result<Vec<&'n ParseNode>> {
    Ok(chain(node, rule, "Separator")?.0)
}

type Chain<'n> = (Vec<&'n ParseNode>, Vec<&'n ParseNode>);

/// Walks a `Multiple`/`Single` chain in a loop, returning the `First`
/// items and the separators between them.
fn chain<'n>(mut node: &'n ParseNode, rule: &str, separator: &str) -> Result<Chain<'n>> {
    let mut items = Vec::new();
    let mut separators = Vec::new();
    loop {
        match alternative(node, rule)? {
            ("Multiple", multiple) => {
                items.push(child(multiple, rule, "First")?);
                separators.push(child(multiple, rule, separator)?);
                node = child(multiple, rule, "Remaining")?;
            }
            ("Single", single) => {
                items.push(child(single, rule, "First")?);
                return Ok((items, separators));
            }
            (other, _) => return Err(unexpected(rule, other)),
        }
    }
}

/// Combines `a op b op c` into `a op (b op c)`, leaving every level
/// unwrapped.
fn fold_right(
    mut operands: Vec<Expression>,
    operators: &[&ParseNode],
    rule: &str,
) -> Result<Expression> {
    let mut result = operands
        .pop()
        .ok_or_else(|| Error::internal(rule, "chain has no operands"))?;
    for (left, operator) in operands.into_iter().zip(operators).rev() {
        result = Expression::arithmetic(arithmetic_op(operator, rule)?, left, result);
    }
    Ok(result)
}

fn token_text<'n>(node: &'n ParseNode, rule: &str) -> Result<&'n str> {
    node.token()
        .map(|token| token.text.as_str())
        .ok_or_else(|| Error::internal(rule, "expected a token"))
}

fn identifier(node: &ParseNode, rule: &str) -> Result<String> {
    node.token()
        .and_then(|token| token.identifier())
        .map(str::to_string)
        .ok_or_else(|| Error::internal(rule, "expected an identifier"))
}

/// The segments of a dotted name, outermost first.
fn identifier_parts(node: &ParseNode) -> Result<Vec<String>> {
    list_items(node, "MultipartIdentifier")?
        .into_iter()
        .map(|part| identifier(part, "MultipartIdentifier"))
        .collect()
}

/// Splits a dotted name into its namespace and last segment.
fn split_name(parts: &[String]) -> Result<(Namespace, &str)> {
    let (name, qualifiers) = parts
        .split_last()
        .ok_or_else(|| Error::internal("MultipartIdentifier", "empty name"))?;
    Ok((Namespace::from_qualifiers(qualifiers.iter().cloned())?, name))
}

fn alias_name(node: &ParseNode) -> Result<String> {
    identifier(child(node, "AliasExpression", "Alias")?, "AliasExpression")
}

/// Strips the quotes of a string literal and collapses doubled quotes.
fn string_value(text: &str) -> Result<String> {
    text.strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .map(|inner| inner.replace("''", "'"))
        .ok_or_else(|| Error::internal("String", format!("malformed literal {text}")))
}

fn number_value(text: &str) -> Result<f64> {
    text.parse()
        .map_err(|err| Error::internal("Number", format!("invalid number '{text}': {err}")))
}

fn distinct_qualifier(node: &ParseNode) -> Result<DistinctQualifier> {
    match alternative(node, "DistinctQualifier")?.0 {
        "Distinct" => Ok(DistinctQualifier::Distinct),
        "All" => Ok(DistinctQualifier::All),
        other => Err(unexpected("DistinctQualifier", other)),
    }
}

fn combiner_kind(node: &ParseNode) -> Result<CombinerKind> {
    match alternative(node, "SelectCombiner")?.0 {
        "Union" => Ok(CombinerKind::Union),
        "Intersect" => Ok(CombinerKind::Intersect),
        "Except" => Ok(CombinerKind::Except),
        "Minus" => Ok(CombinerKind::Minus),
        other => Err(unexpected("SelectCombiner", other)),
    }
}

fn comparison_op(node: &ParseNode) -> Result<ComparisonOp> {
    match alternative(node, "ComparisonOperator")?.0 {
        "EqualTo" => Ok(ComparisonOp::EqualTo),
        "NotEqualTo" => Ok(ComparisonOp::NotEqualTo),
        "LessThan" => Ok(ComparisonOp::LessThan),
        "LessThanEqualTo" => Ok(ComparisonOp::LessThanEqualTo),
        "GreaterThan" => Ok(ComparisonOp::GreaterThan),
        "GreaterThanEqualTo" => Ok(ComparisonOp::GreaterThanEqualTo),
        other => Err(unexpected("ComparisonOperator", other)),
    }
}

fn quantifier(node: &ParseNode) -> Result<Quantifier> {
    match alternative(node, "Quantifier")?.0 {
        "All" => Ok(Quantifier::All),
        "Any" => Ok(Quantifier::Any),
        "Some" => Ok(Quantifier::Some),
        other => Err(unexpected("Quantifier", other)),
    }
}

fn join_type(node: &ParseNode) -> Result<JoinType> {
    match alternative(node, "FilteredJoinType")?.0 {
        "Inner" => Ok(JoinType::Inner),
        "LeftOuter" => Ok(JoinType::LeftOuter),
        "RightOuter" => Ok(JoinType::RightOuter),
        "FullOuter" => Ok(JoinType::FullOuter),
        other => Err(unexpected("FilteredJoinType", other)),
    }
}

fn arithmetic_op(node: &ParseNode, rule: &str) -> Result<ArithmeticOp> {
    match alternative(node, rule)?.0 {
        "Plus" => Ok(ArithmeticOp::Add),
        "Minus" => Ok(ArithmeticOp::Subtract),
        "Multiply" => Ok(ArithmeticOp::Multiply),
        "Divide" => Ok(ArithmeticOp::Divide),
        other => Err(unexpected(rule, other)),
    }
}

/// A join chain that is a lone, unwrapped item goes into the FROM list as
/// that item.
fn from_item(join: Join) -> JoinItem {
    if join.steps.is_empty() && !join.wrap_in_parentheses {
        join.first
    } else {
        JoinItem::Join(Box::new(join))
    }
}

/// State of one parse call.
struct Build {
    arena: SourceArena,
    scopes: ScopeStack,
}

impl Build {
    fn new() -> Self {
        Self {
            arena: SourceArena::new(),
            scopes: ScopeStack::new(),
        }
    }

    fn select_statement(&mut self, node: &ParseNode) -> Result<Query> {
        let rule = "SelectStatement";
        let mut query = self.select_expression(child(node, rule, "Expression")?)?;
        if let Some(order_by) = node.child("OrderBy") {
            let items = self.order_by_list(child(order_by, rule, "Items")?)?;
            query.order_by_mut().extend(items);
        }
        Ok(query)
    }

    /// A select term followed by an optional chain of combined terms.
    /// Runs of the same combiner and qualifier collapse into one combiner;
    /// a different combiner nests to the right.
    fn select_expression(&mut self, node: &ParseNode) -> Result<Query> {
        let rule = "SelectExpression";
        let leading = self.select_term(child(node, rule, "Leading")?)?;
        let Some(remaining) = node.child("Remaining") else {
            return Ok(leading);
        };
        let kind = combiner_kind(child(remaining, rule, "Combiner")?)?;
        let distinct = match remaining.child("Qualifier") {
            Some(qualifier) => distinct_qualifier(qualifier)?,
            None => DistinctQualifier::Default,
        };
        let tail_node = child(remaining, rule, "Expression")?;
        let chained = tail_node.has("Remaining");
        match self.select_expression(tail_node)? {
            Query::Combined(mut combiner)
                if chained && combiner.kind == kind && combiner.distinct == distinct =>
            {
                combiner.queries.insert(0, leading);
                Ok(Query::Combined(combiner))
            }
            tail => {
                let mut combiner = SelectCombiner::new(kind).with_qualifier(distinct);
                combiner.add_query(leading);
                combiner.add_query(tail);
                Ok(combiner.into())
            }
        }
    }

    fn select_term(&mut self, node: &ParseNode) -> Result<Query> {
        match alternative(node, "SelectTerm")? {
            ("Wrapped", wrapped) => {
                self.select_statement(child(wrapped, "SelectTerm", "Statement")?)
            }
            ("Specification", specification) => {
                Ok(self.select_specification(specification)?.into())
            }
            (other, _) => Err(unexpected("SelectTerm", other)),
        }
    }

    fn select_specification(&mut self, node: &ParseNode) -> Result<SelectBuilder> {
        let rule = "SelectSpecification";
        let mut select = SelectBuilder::new();
        if let Some(qualifier) = node.child("Qualifier") {
            select.distinct = distinct_qualifier(qualifier)?;
        }
        if let Some(top) = node.child("Top") {
            select.top = Some(self.top(top)?);
        }
        if let Some(from) = node.child("From") {
            for item in list_items(child(from, rule, "Items")?, "FromList")? {
                let join = self.join(item)?;
                select.add_join_item(from_item(join));
            }
        }

        let sources: Vec<SourceId> = select.from.iter().flat_map(JoinItem::sources).collect();
        self.scopes.push(&self.arena, &sources);
        let built = self.select_body(node, &mut select);
        self.scopes.pop();
        built?;
        Ok(select)
    }

    /// The clauses of a specification that see its FROM sources.
    fn select_body(&mut self, node: &ParseNode, select: &mut SelectBuilder) -> Result<()> {
        let rule = "SelectSpecification";
        for item in list_items(child(node, rule, "Projections")?, "ProjectionList")? {
            let projection = self.projection(item)?;
            select.projections.push(projection);
        }
        if let Some(filter) = node.child("Where") {
            self.or_filter(child(filter, rule, "Filter")?, &mut select.where_filter)?;
        }
        if let Some(group_by) = node.child("GroupBy") {
            for item in list_items(child(group_by, rule, "Items")?, "GroupByList")? {
                let expression = self.additive(item)?;
                select.add_group_by(expression);
            }
        }
        if let Some(having) = node.child("Having") {
            self.or_filter(child(having, rule, "Filter")?, &mut select.having)?;
        }
        Ok(())
    }

    fn top(&mut self, node: &ParseNode) -> Result<Top> {
        let mut top = Top::new(self.additive(child(node, "Top", "Expression")?)?);
        if let Some(modifiers) = node.child("Modifiers") {
            for (_, modifier) in modifiers.children() {
                match alternative(modifier, "Top")?.0 {
                    "Percent" => top.percent = true,
                    "WithTies" => top.with_ties = true,
                    other => return Err(unexpected("Top", other)),
                }
            }
        }
        Ok(top)
    }

    fn projection(&mut self, node: &ParseNode) -> Result<Projection> {
        let rule = "ProjectionItem";
        match alternative(node, rule)? {
            ("Star", star) => {
                let source = match star.child("Qualifier") {
                    Some(qualifier) => {
                        let parts = identifier_parts(child(qualifier, rule, "Source")?)?;
                        Some(self.source_named(&parts)?)
                    }
                    None => None,
                };
                Ok(Projection {
                    item: Expression::AllColumns(source),
                    alias: None,
                })
            }
            ("Expression", expression) => Ok(Projection {
                item: self.additive(child(expression, rule, "Item")?)?,
                alias: expression.child("Alias").map(alias_name).transpose()?,
            }),
            (other, _) => Err(unexpected(rule, other)),
        }
    }

    /// Resolves a dotted source name through the scopes. A name that is not
    /// in scope becomes a detached table so references to it still render
    /// qualified.
    fn source_named(&mut self, parts: &[String]) -> Result<SourceId> {
        let (namespace, name) = split_name(parts)?;
        if let Some(id) = self.scopes.resolve(name) {
            return Ok(id);
        }
        trace!(source = name, "source is not in scope");
        let table = Table::new(name)?.with_namespace(namespace);
        Ok(self.arena.add_table(table))
    }

    fn column(&mut self, parts: &[String]) -> Result<Column> {
        match parts.split_last() {
            Some((name, [])) => Ok(match self.scopes.single_source() {
                Some(source) => Column {
                    source: Some(source),
                    name: name.clone(),
                    qualify: false,
                },
                None => Column::new(name.clone()),
            }),
            Some((name, source)) => Ok(Column::of(self.source_named(source)?, name.clone())),
            None => Err(Error::internal("MultipartIdentifier", "empty name")),
        }
    }

    fn join(&mut self, node: &ParseNode) -> Result<Join> {
        let rule = "Join";
        match alternative(node, rule)? {
            ("Wrapped", wrapped) => {
                let inner = self.join(child(wrapped, rule, "Join")?)?.wrapped();
                match wrapped.child("Next") {
                    Some(next) => self.join_prime(next, Join::new(inner)),
                    None => Ok(inner),
                }
            }
            ("Joined", joined) => {
                let first = Join::new(self.join_item(child(joined, rule, "Item")?)?);
                match joined.child("Next") {
                    Some(next) => self.join_prime(next, first),
                    None => Ok(first),
                }
            }
            (other, _) => Err(unexpected(rule, other)),
        }
    }

    /// Appends the steps of `node` to `join`, left to right.
    fn join_prime(&mut self, node: &ParseNode, join: Join) -> Result<Join> {
        let rule = "JoinPrime";
        let (join, next) = match alternative(node, rule)? {
            ("Filtered", filtered) => {
                let join_type = join_type(child(filtered, rule, "Type")?)?;
                let item = self.join_item(child(filtered, rule, "Item")?)?;

                let mut sources = join.sources();
                sources.push(item);
                self.scopes.push(&self.arena, &sources);
                let mut on = FilterGroup::new();
                let built = self.or_filter(child(filtered, rule, "Filter")?, &mut on);
                self.scopes.pop();
                built?;

                (join.join(join_type, item, on), filtered.child("Next"))
            }
            ("Cross", cross) => {
                let item = self.join_item(child(cross, rule, "Item")?)?;
                (join.cross_join(item), cross.child("Next"))
            }
            (other, _) => return Err(unexpected(rule, other)),
        };
        match next {
            Some(next) => self.join_prime(next, join),
            None => Ok(join),
        }
    }

    fn join_item(&mut self, node: &ParseNode) -> Result<SourceId> {
        let rule = "JoinItem";
        let alias = node.child("Alias").map(alias_name).transpose()?;
        let source = match alternative(child(node, rule, "Source")?, rule)? {
            ("Function", function) => Source::Function(self.function_call(function)?),
            ("Table", table) => {
                let parts = identifier_parts(table)?;
                let (namespace, name) = split_name(&parts)?;
                Source::Table(Table::new(name)?.with_namespace(namespace))
            }
            ("Select", select) => {
                Source::Query(self.select_statement(child(select, rule, "Statement")?)?)
            }
            (other, _) => return Err(unexpected(rule, other)),
        };
        Ok(self.arena.add(source, alias))
    }

    /// Builds an OR-list of AND-lists into `group`. With more than one OR
    /// member, every AND-list of two or more filters becomes a nested,
    /// unwrapped group.
    fn or_filter(&mut self, node: &ParseNode, group: &mut FilterGroup) -> Result<()> {
        let and_lists = list_items(node, "OrFilter")?;
        if let [and_list] = and_lists.as_slice() {
            for item in list_items(and_list, "AndFilter")? {
                let filter = self.filter(item)?;
                group.and(filter);
            }
            return Ok(());
        }

        for (index, and_list) in and_lists.into_iter().enumerate() {
            let conjunction = if index == 0 {
                Conjunction::And
            } else {
                Conjunction::Or
            };
            let mut filters = list_items(and_list, "AndFilter")?
                .into_iter()
                .map(|item| self.filter(item))
                .collect::<Result<Vec<_>>>()?;
            let filter = if filters.len() == 1 {
                filters.remove(0)
            } else {
                let mut nested = FilterGroup::new();
                for filter in filters {
                    nested.and(filter);
                }
                Filter::Group(nested)
            };
            group.add(conjunction, filter);
        }
        Ok(())
    }

    fn filter(&mut self, node: &ParseNode) -> Result<Filter> {
        let rule = "Filter";
        match alternative(node, rule)? {
            ("Not", not) => Ok(Filter::Not(Box::new(
                self.filter(child(not, rule, "Filter")?)?,
            ))),
            ("Wrapped", wrapped) => {
                let mut group = FilterGroup::wrapped();
                self.or_filter(child(wrapped, rule, "Filter")?, &mut group)?;
                Ok(Filter::Group(group))
            }
            ("Quantify", quantify) => {
                let left = self.additive(child(quantify, rule, "Item")?)?;
                let op = comparison_op(child(quantify, rule, "Operator")?)?;
                let quantifier = quantifier(child(quantify, rule, "Quantifier")?)?;
                let values = match alternative(child(quantify, rule, "Values")?, rule)? {
                    ("Select", select) => ValueProvider::from(self.select_statement(select)?),
                    ("Values", values) => ValueProvider::List(self.value_list(values)?),
                    (other, _) => return Err(unexpected(rule, other)),
                };
                Ok(Filter::Quantified {
                    left,
                    op,
                    quantifier,
                    values,
                })
            }
            ("Order", order) => {
                let left = self.additive(child(order, rule, "Left")?)?;
                let op = comparison_op(child(order, rule, "Operator")?)?;
                let right = self.additive(child(order, rule, "Right")?)?;
                Ok(Filter::comparison(left, op, right))
            }
            ("Between", between) => Ok(Filter::Between {
                expression: self.additive(child(between, rule, "Item")?)?,
                lower: self.additive(child(between, rule, "Lower")?)?,
                upper: self.additive(child(between, rule, "Upper")?)?,
                not: between.has("Not"),
            }),
            ("Like", like) => Ok(Filter::Like {
                expression: self.additive(child(like, rule, "Item")?)?,
                pattern: string_value(token_text(child(like, rule, "Pattern")?, rule)?)?,
                not: like.has("Not"),
            }),
            ("Is", is) => Ok(Filter::Null {
                expression: self.additive(child(is, rule, "Item")?)?,
                not: is.has("Not"),
            }),
            ("In", in_filter) => {
                let expression = self.additive(child(in_filter, rule, "Item")?)?;
                let values = match alternative(child(in_filter, rule, "Values")?, rule)? {
                    ("Select", select) => ValueProvider::from(
                        self.select_statement(child(select, rule, "Statement")?)?,
                    ),
                    ("Values", values) => {
                        ValueProvider::List(self.value_list(child(values, rule, "Values")?)?)
                    }
                    ("Function", function) => ValueProvider::Function(self.function_call(function)?),
                    (other, _) => return Err(unexpected(rule, other)),
                };
                Ok(Filter::In {
                    expression,
                    values,
                    not: in_filter.has("Not"),
                })
            }
            ("Exists", exists) => Ok(Filter::Exists(Box::new(
                self.select_statement(child(exists, rule, "Statement")?)?,
            ))),
            (other, _) => Err(unexpected(rule, other)),
        }
    }

    /// `First [+-] Remaining`, nested to the right.
    fn additive(&mut self, node: &ParseNode) -> Result<Expression> {
        let (items, operators) = chain(node, "AdditiveExpression", "Operator")?;
        let operands = items
            .into_iter()
            .map(|item| self.multiplicative(item))
            .collect::<Result<Vec<_>>>()?;
        fold_right(operands, &operators, "AdditiveOperator")
    }

    fn multiplicative(&mut self, node: &ParseNode) -> Result<Expression> {
        let (items, operators) = chain(node, "MultiplicativeExpression", "Operator")?;
        let operands = items
            .into_iter()
            .map(|item| self.wrapped_item(item))
            .collect::<Result<Vec<_>>>()?;
        fold_right(operands, &operators, "MultiplicativeOperator")
    }

    fn wrapped_item(&mut self, node: &ParseNode) -> Result<Expression> {
        let rule = "WrappedItem";
        match alternative(node, rule)? {
            ("Negated", negated) => Ok(self.wrapped_item(child(negated, rule, "Item")?)?.negate()),
            ("Wrapped", wrapped) => match self.additive(child(wrapped, rule, "Expression")?)? {
                Expression::Arithmetic(arithmetic) => Ok(Expression::Arithmetic(arithmetic.wrapped())),
                other => Ok(other),
            },
            ("Item", item) => self.item(item),
            (other, _) => Err(unexpected(rule, other)),
        }
    }

    fn item(&mut self, node: &ParseNode) -> Result<Expression> {
        let rule = "Item";
        match alternative(node, rule)? {
            ("Number", number) => Ok(Expression::number(number_value(token_text(number, rule)?)?)),
            ("String", string) => Ok(Expression::string(string_value(token_text(string, rule)?)?)),
            ("Null", _) => Ok(Expression::null()),
            ("Function", function) => Ok(self.function_call(function)?.into()),
            ("Column", column) => {
                let parts = identifier_parts(column)?;
                Ok(self.column(&parts)?.into())
            }
            ("Select", select) => Ok(Expression::subquery(
                self.select_statement(child(select, rule, "Statement")?)?,
            )),
            (other, _) => Err(unexpected(rule, other)),
        }
    }

    fn function_call(&mut self, node: &ParseNode) -> Result<Function> {
        let rule = "FunctionCall";
        let parts = identifier_parts(child(node, rule, "Name")?)?;
        let (namespace, name) = split_name(&parts)?;
        let mut function = Function::new(name)?.with_namespace(namespace);
        if let Some(arguments) = node.child("Arguments") {
            match alternative(arguments, rule)? {
                ("Star", _) => function.add_argument(Expression::AllColumns(None)),
                ("Values", values) => {
                    for item in list_items(values, "ValueList")? {
                        let argument = self.additive(item)?;
                        function.add_argument(argument);
                    }
                }
                (other, _) => return Err(unexpected(rule, other)),
            }
        }
        Ok(function)
    }

    fn value_list(&mut self, node: &ParseNode) -> Result<ValueList> {
        list_items(node, "ValueList")?
            .into_iter()
            .map(|item| self.additive(item))
            .collect()
    }

    fn order_by_list(&mut self, node: &ParseNode) -> Result<Vec<OrderBy>> {
        let rule = "OrderByItem";
        let mut items = Vec::new();
        for item in list_items(node, "OrderByList")? {
            let mut order_by = OrderBy::new(self.additive(child(item, rule, "Expression")?)?);
            if let Some(direction) = item.child("Direction") {
                order_by.direction = match alternative(direction, rule)?.0 {
                    "Ascending" => OrderDirection::Ascending,
                    "Descending" => OrderDirection::Descending,
                    other => return Err(unexpected(rule, other)),
                };
            }
            if let Some(nulls) = item.child("Nulls") {
                order_by.nulls = match alternative(nulls, rule)?.0 {
                    "First" => NullPlacement::First,
                    "Last" => NullPlacement::Last,
                    other => return Err(unexpected(rule, other)),
                };
            }
            items.push(order_by);
        }
        Ok(items)
    }
}
