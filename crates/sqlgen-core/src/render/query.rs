//! Rendering of queries, joins and INSERT.

use crate::ast::{
    InsertBuilder, Join, JoinItem, JoinType, OrderBy, Query, SelectBuilder, SelectCombiner,
    Source, SourceId, Top,
};
use crate::error::{Error, Result};

use super::{clause_break, identifier, item_list, Render, RenderContext};

impl Render for Top {
    fn render(&self, context: &RenderContext<'_>) -> Result<String> {
        let mut text = format!("TOP {}", self.expression.render(context)?);
        if self.percent {
            text.push_str(" PERCENT");
        }
        if self.with_ties {
            text.push_str(" WITH TIES");
        }
        Ok(text)
    }
}

impl Render for OrderBy {
    fn render(&self, context: &RenderContext<'_>) -> Result<String> {
        let mut text = self.expression.render(context)?;
        if let Some(direction) = self.direction.as_str() {
            text.push(' ');
            text.push_str(direction);
        }
        if let Some(nulls) = self.nulls.as_str() {
            text.push(' ');
            text.push_str(nulls);
        }
        Ok(text)
    }
}

fn render_all<T: Render>(items: &[T], context: &RenderContext<'_>) -> Result<Vec<String>> {
    items.iter().map(|item| item.render(context)).collect()
}

/// Appends an ORDER BY clause when there are items.
fn push_order_by(text: &mut String, order_by: &[OrderBy], context: &RenderContext<'_>) -> Result<()> {
    if order_by.is_empty() {
        return Ok(());
    }
    let options = context.options();
    let items = render_all(order_by, context)?;
    text.push_str(&clause_break(context));
    text.push_str(&item_list(
        context,
        "ORDER BY",
        &items,
        options.one_order_by_item_per_line,
        options.indent_order_by_items,
    ));
    Ok(())
}

impl Render for SelectBuilder {
    fn render(&self, context: &RenderContext<'_>) -> Result<String> {
        let options = context.options();

        let mut head = String::from("SELECT");
        if let Some(qualifier) = self.distinct.as_str() {
            head.push(' ');
            head.push_str(qualifier);
        }
        if let Some(top) = &self.top {
            head.push(' ');
            head.push_str(&top.render(context)?);
        }
        if self.projections.is_empty() {
            return Err(Error::NoProjections);
        }
        let projections = render_all(&self.projections, context)?;
        let mut text = item_list(
            context,
            &head,
            &projections,
            options.one_projection_per_line,
            options.indent_projections,
        );

        if !self.from.is_empty() {
            let items = render_all(&self.from, context)?;
            text.push_str(&clause_break(context));
            text.push_str("FROM ");
            text.push_str(&items.join(", "));
        }

        if self.where_filter.has_filters() {
            text.push_str(&clause_break(context));
            text.push_str("WHERE ");
            text.push_str(&self.where_filter.render(context)?);
        }

        if !self.group_by.is_empty() {
            let items = render_all(&self.group_by, context)?;
            text.push_str(&clause_break(context));
            text.push_str(&item_list(
                context,
                "GROUP BY",
                &items,
                options.one_group_by_item_per_line,
                options.indent_group_by_items,
            ));
        }

        if self.having.has_filters() {
            text.push_str(&clause_break(context));
            text.push_str("HAVING ");
            text.push_str(&self.having.render(context)?);
        }

        push_order_by(&mut text, &self.order_by, context)?;
        Ok(text)
    }
}

impl Render for SelectCombiner {
    fn render(&self, context: &RenderContext<'_>) -> Result<String> {
        if self.queries.is_empty() {
            return Err(Error::NoQueries);
        }
        let mut separator = format!(" {}", self.kind.as_str());
        if let Some(qualifier) = self.distinct.as_str() {
            separator.push(' ');
            separator.push_str(qualifier);
        }
        separator.push(' ');

        let queries = self
            .queries
            .iter()
            .map(|query| Ok(format!("({})", query.render(context)?)))
            .collect::<Result<Vec<_>>>()?;
        let mut text = queries.join(&separator);
        push_order_by(&mut text, &self.order_by, context)?;
        Ok(text)
    }
}

impl Render for Query {
    fn render(&self, context: &RenderContext<'_>) -> Result<String> {
        match self {
            Self::Select(select) => select.render(context),
            Self::Combined(combiner) => combiner.render(context),
        }
    }
}

/// How a source is written in a FROM list or after INSERT INTO, alias
/// included.
fn declaration(context: &RenderContext<'_>, id: SourceId) -> Result<String> {
    let aliased = context.source(id)?;
    let mut text = match &aliased.source {
        Source::Table(table) => table.qualified_name(),
        Source::Function(function) => function.render(context)?,
        Source::Query(query) => {
            let inner = query.render(&context.indent())?;
            match query {
                // A lone query inside a combiner already carries parentheses.
                Query::Combined(combiner) if combiner.queries.len() == 1 => inner,
                _ => format!("({inner})"),
            }
        }
    };
    if let Some(alias) = &aliased.alias {
        text.push(' ');
        if context.options().alias_join_items_using_as {
            text.push_str("AS ");
        }
        text.push_str(&identifier(alias));
    }
    Ok(text)
}

fn join_keyword(context: &RenderContext<'_>, join_type: JoinType) -> String {
    let options = context.options();
    let outer = if options.verbose_outer_join { "OUTER " } else { "" };
    match join_type {
        JoinType::Cross => String::from("CROSS JOIN"),
        JoinType::Inner if options.verbose_inner_join => String::from("INNER JOIN"),
        JoinType::Inner => String::from("JOIN"),
        JoinType::LeftOuter => format!("LEFT {outer}JOIN"),
        JoinType::RightOuter => format!("RIGHT {outer}JOIN"),
        JoinType::FullOuter => format!("FULL {outer}JOIN"),
    }
}

impl Render for Join {
    fn render(&self, context: &RenderContext<'_>) -> Result<String> {
        let mut text = self.first.render(context)?;
        for step in &self.steps {
            let keyword = join_keyword(context, step.join_type);
            if step.join_type.is_filtered() && !step.on.has_filters() {
                return Err(Error::MissingJoinCondition { join: keyword });
            }
            text.push(' ');
            text.push_str(&keyword);
            text.push(' ');
            text.push_str(&declaration(context, step.source)?);
            if step.join_type.is_filtered() {
                text.push_str(" ON ");
                text.push_str(&step.on.render(context)?);
            }
        }
        if self.wrap_in_parentheses {
            Ok(format!("({text})"))
        } else {
            Ok(text)
        }
    }
}

impl Render for JoinItem {
    fn render(&self, context: &RenderContext<'_>) -> Result<String> {
        match self {
            Self::Source(id) => declaration(context, *id),
            Self::Join(join) => join.render(context),
        }
    }
}

impl Render for InsertBuilder {
    fn render(&self, context: &RenderContext<'_>) -> Result<String> {
        let options = context.options();
        let mut text = format!("INSERT INTO {}", declaration(context, self.table())?);

        if !self.columns().is_empty() {
            let columns = render_all(self.columns(), context)?;
            text.push_str(&clause_break(context));
            text.push('(');
            if options.one_insert_column_per_line {
                let prefix = if options.indent_insert_columns {
                    context.indent().indentation()
                } else {
                    context.indentation()
                };
                let lines: Vec<String> = columns.iter().map(|column| format!("{prefix}{column}")).collect();
                text.push('\n');
                text.push_str(&lines.join(",\n"));
                text.push('\n');
                text.push_str(&context.indentation());
            } else {
                text.push_str(&columns.join(", "));
            }
            text.push(')');
        }

        text.push_str(&clause_break(context));
        if !self.values().is_query() {
            text.push_str("VALUES");
            text.push_str(&clause_break(context));
        }
        text.push_str(&self.values().render(context)?);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        Column, CombinerKind, ComparisonOp, DistinctQualifier, Expression, Filter, FilterGroup,
        Function, SourceArena, Table, ValueList, ValueProvider,
    };
    use crate::render::{FormatOptions, StatementKind};

    fn select_from(arena: &mut SourceArena, table: &str, column: &str) -> SelectBuilder {
        let id = arena.add_table(Table::new(table).unwrap());
        let mut select = SelectBuilder::new();
        select.add_projection(Expression::column(column));
        select.add_join_item(id);
        select
    }

    #[test]
    fn test_select_clauses_in_order() {
        let mut arena = SourceArena::new();
        let mut select = select_from(&mut arena, "t", "a");
        select.distinct = DistinctQualifier::Distinct;
        let mut top = Top::new(Expression::number(10.0));
        top.percent = true;
        top.with_ties = true;
        select.top = Some(top);
        select.where_filter.and(Filter::comparison(
            Expression::column("a"),
            ComparisonOp::GreaterThan,
            Expression::number(0.0),
        ));
        select.add_group_by(Expression::column("a"));
        select.add_order_by(OrderBy::new(Expression::column("a")));
        let options = FormatOptions::default();
        let text = select.render(&RenderContext::new(&arena, &options)).unwrap();
        assert_eq!(
            text,
            "SELECT DISTINCT TOP 10 PERCENT WITH TIES a FROM t WHERE a > 0 GROUP BY a ORDER BY a"
        );
    }

    #[test]
    fn test_one_clause_per_line_with_indented_projections() {
        let mut arena = SourceArena::new();
        let mut select = select_from(&mut arena, "t", "a");
        select.add_projection(Expression::column("b"));
        let options = FormatOptions {
            one_clause_per_line: true,
            one_projection_per_line: true,
            indent_projections: true,
            ..FormatOptions::default()
        };
        let text = select.render(&RenderContext::new(&arena, &options)).unwrap();
        assert_eq!(text, "SELECT\n    a,\n    b\nFROM t");
    }

    #[test]
    fn test_combiner_wraps_each_query() {
        let mut arena = SourceArena::new();
        let mut combiner = SelectCombiner::new(CombinerKind::Union).with_qualifier(DistinctQualifier::All);
        combiner.add_query(select_from(&mut arena, "t", "a"));
        combiner.add_query(select_from(&mut arena, "u", "b"));
        let options = FormatOptions::default();
        let text = combiner.render(&RenderContext::new(&arena, &options)).unwrap();
        assert_eq!(text, "(SELECT a FROM t) UNION ALL (SELECT b FROM u)");
    }

    #[test]
    fn test_empty_combiner_fails() {
        let arena = SourceArena::new();
        let options = FormatOptions::default();
        let combiner = SelectCombiner::new(CombinerKind::Intersect);
        assert_eq!(
            combiner.render(&RenderContext::new(&arena, &options)),
            Err(Error::NoQueries)
        );
    }

    #[test]
    fn test_select_without_projections_fails() {
        let mut arena = SourceArena::new();
        let t = arena.add_table(Table::new("t").unwrap());
        let mut select = SelectBuilder::new();
        select.add_join_item(t);
        let options = FormatOptions::default();
        assert_eq!(
            select.render(&RenderContext::new(&arena, &options)),
            Err(Error::NoProjections)
        );
    }

    #[test]
    fn test_filtered_join_without_condition_fails() {
        let mut arena = SourceArena::new();
        let a = arena.add_table(Table::new("a").unwrap());
        let b = arena.add_table(Table::new("b").unwrap());
        let options = FormatOptions {
            verbose_inner_join: true,
            ..FormatOptions::default()
        };
        let context = RenderContext::new(&arena, &options);
        assert_eq!(
            Join::new(a).inner_join(b, FilterGroup::new()).render(&context),
            Err(Error::MissingJoinCondition {
                join: String::from("INNER JOIN")
            })
        );
        assert_eq!(
            Join::new(a).cross_join(b).render(&context).unwrap(),
            "a CROSS JOIN b"
        );
    }

    #[test]
    fn test_join_keywords() {
        let mut arena = SourceArena::new();
        let a = arena.add_table(Table::new("a").unwrap());
        let b = arena.add_table(Table::new("b").unwrap());
        let c = arena.add_table(Table::new("c").unwrap());
        let mut on = FilterGroup::new();
        on.and(Filter::comparison(
            Column::of(a, "id").into(),
            ComparisonOp::EqualTo,
            Column::of(b, "id").into(),
        ));
        let join = Join::new(a).left_outer_join(b, on.clone()).cross_join(c);
        let terse = FormatOptions::default();
        assert_eq!(
            join.render(&RenderContext::new(&arena, &terse)).unwrap(),
            "a LEFT JOIN b ON a.id = b.id CROSS JOIN c"
        );
        let verbose = FormatOptions {
            verbose_outer_join: true,
            verbose_inner_join: true,
            ..FormatOptions::default()
        };
        let join = Join::new(a).inner_join(b, on);
        assert_eq!(
            join.wrapped().render(&RenderContext::new(&arena, &verbose)).unwrap(),
            "(a INNER JOIN b ON a.id = b.id)"
        );
    }

    #[test]
    fn test_source_declarations() {
        let mut arena = SourceArena::new();
        let inner = select_from(&mut arena, "t", "a");
        let sub = arena.add(Source::Query(inner.into()), Some(String::from("x")));
        let function = Function::new("split")
            .unwrap()
            .with_argument(Expression::string("a,b"));
        let f = arena.add(Source::Function(function), Some(String::from("s")));
        let options = FormatOptions {
            alias_join_items_using_as: true,
            ..FormatOptions::default()
        };
        let context = RenderContext::new(&arena, &options);
        assert_eq!(JoinItem::Source(sub).render(&context).unwrap(), "(SELECT a FROM t) AS x");
        assert_eq!(JoinItem::Source(f).render(&context).unwrap(), "split('a,b') AS s");
    }

    #[test]
    fn test_insert_with_values() {
        let mut arena = SourceArena::new();
        let table = arena.add_table(Table::new("employee").unwrap());
        let values: ValueList = [Expression::string("Bob"), Expression::number(30.0)]
            .into_iter()
            .collect();
        let mut insert = InsertBuilder::new(&arena, table, ValueProvider::List(values)).unwrap();
        insert.add_column(Column::of(table, "name"));
        insert.add_column(Column::of(table, "age"));
        let options = FormatOptions::default();
        let context = RenderContext::new(&arena, &options).for_statement(StatementKind::Insert);
        assert_eq!(
            insert.render(&context).unwrap(),
            "INSERT INTO employee (name, age) VALUES ('Bob', 30)"
        );
    }

    #[test]
    fn test_insert_from_query_one_column_per_line() {
        let mut arena = SourceArena::new();
        let table = arena.add_table(Table::new("archive").unwrap());
        let query = select_from(&mut arena, "employee", "name");
        let mut insert = InsertBuilder::new(&arena, table, ValueProvider::from(Query::from(query))).unwrap();
        insert.add_column(Column::new("name"));
        let options = FormatOptions {
            one_insert_column_per_line: true,
            indent_insert_columns: true,
            ..FormatOptions::default()
        };
        let context = RenderContext::new(&arena, &options).for_statement(StatementKind::Insert);
        assert_eq!(
            insert.render(&context).unwrap(),
            "INSERT INTO archive (\n    name\n) (SELECT name FROM employee)"
        );
    }
}
