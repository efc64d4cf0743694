//! Tests for the FROM clause: tables, aliases, namespaces, subquery and
//! function sources, join chains and column resolution.

mod common;
use common::*;

use sqlgen_core::ast::{Expression, Filter, JoinItem, JoinType, Source};
use sqlgen_core::FormatOptions;

#[test]
fn bare_column_with_single_source() {
    let (command, s) = parse_select("SELECT name FROM employees");
    let Expression::Column(column) = &s.projections[0].item else {
        panic!("expected a column");
    };
    assert!(!column.qualify);
    let source = command.sources.source(column.source.unwrap()).unwrap();
    assert_eq!(source.scope_name(), Some("employees"));
    assert_eq!(to_sql("SELECT name FROM employees"), "SELECT name FROM employees");
}

#[test]
fn bare_column_with_several_sources_stays_bare() {
    let (_, s) = parse_select("SELECT name FROM employees, departments");
    let Expression::Column(column) = &s.projections[0].item else {
        panic!("expected a column");
    };
    assert!(column.source.is_none());
    assert_eq!(
        to_sql("SELECT name FROM employees, departments"),
        "SELECT name FROM employees, departments"
    );
}

#[test]
fn aliases_resolve_in_projections_and_on() {
    let sql = "SELECT e.name FROM employees e JOIN departments d ON e.dept_id = d.id";
    let (command, s) = parse_select(sql);
    let alias_of = |expression: &Expression| match expression {
        Expression::Column(column) => command
            .sources
            .source(column.source.unwrap())
            .unwrap()
            .alias
            .clone(),
        other => panic!("expected a column, got {other:?}"),
    };
    assert_eq!(alias_of(&s.projections[0].item).as_deref(), Some("e"));

    let JoinItem::Join(join) = &s.from[0] else {
        panic!("expected a join");
    };
    assert_eq!(join.steps.len(), 1);
    assert_eq!(join.steps[0].join_type, JoinType::Inner);
    let Filter::Comparison { left, right, .. } = &join.steps[0].on.entries()[0].1 else {
        panic!("expected a comparison");
    };
    assert_eq!(alias_of(left).as_deref(), Some("e"));
    assert_eq!(alias_of(right).as_deref(), Some("d"));
    assert_eq!(command.sources.len(), 2);
    assert_eq!(to_sql(sql), sql);
}

#[test]
fn as_alias_is_optional_on_output() {
    let sql = "SELECT e.name FROM employees AS e";
    assert_eq!(to_sql(sql), "SELECT e.name FROM employees e");
    let options = FormatOptions {
        alias_join_items_using_as: true,
        ..FormatOptions::default()
    };
    assert_eq!(format(sql, &options), sql);
}

#[test]
fn join_chain_is_left_associative() {
    let sql = "SELECT * FROM a JOIN b ON a.id = b.id LEFT OUTER JOIN c ON b.id = c.id";
    let (_, s) = parse_select(sql);
    assert_eq!(s.from.len(), 1);
    let JoinItem::Join(join) = &s.from[0] else {
        panic!("expected a join");
    };
    assert!(matches!(join.first, JoinItem::Source(_)));
    let types: Vec<JoinType> = join.steps.iter().map(|step| step.join_type).collect();
    assert_eq!(types, vec![JoinType::Inner, JoinType::LeftOuter]);
    assert_eq!(
        to_sql(sql),
        "SELECT * FROM a JOIN b ON a.id = b.id LEFT JOIN c ON b.id = c.id"
    );
    let verbose = FormatOptions {
        verbose_inner_join: true,
        verbose_outer_join: true,
        ..FormatOptions::default()
    };
    assert_eq!(
        format(sql, &verbose),
        "SELECT * FROM a INNER JOIN b ON a.id = b.id LEFT OUTER JOIN c ON b.id = c.id"
    );
}

#[test]
fn every_join_type() {
    let sql = "SELECT * FROM a INNER JOIN b ON a.id = b.id RIGHT JOIN c ON a.id = c.id \
               FULL OUTER JOIN d ON a.id = d.id CROSS JOIN e";
    let (_, s) = parse_select(sql);
    let JoinItem::Join(join) = &s.from[0] else {
        panic!("expected a join");
    };
    let types: Vec<JoinType> = join.steps.iter().map(|step| step.join_type).collect();
    assert_eq!(
        types,
        vec![
            JoinType::Inner,
            JoinType::RightOuter,
            JoinType::FullOuter,
            JoinType::Cross
        ]
    );
    assert_eq!(
        to_sql(sql),
        "SELECT * FROM a JOIN b ON a.id = b.id RIGHT JOIN c ON a.id = c.id \
         FULL JOIN d ON a.id = d.id CROSS JOIN e"
    );
}

#[test]
fn nested_join_keeps_its_parentheses() {
    let sql = "SELECT * FROM (a JOIN b ON a.id = b.id) JOIN c ON a.id = c.id";
    let (command, s) = parse_select(sql);
    let JoinItem::Join(outer) = &s.from[0] else {
        panic!("expected a join");
    };
    assert!(!outer.wrap_in_parentheses);
    assert_eq!(outer.steps.len(), 1);
    assert!(matches!(&outer.first, JoinItem::Join(inner) if inner.wrap_in_parentheses && inner.steps.len() == 1));
    assert_eq!(command.sources.len(), 3);
    assert_eq!(to_sql(sql), sql);
}

#[test]
fn comma_siblings_are_not_visible_in_on() {
    let (command, s) = parse_select("SELECT * FROM a, b JOIN c ON a.id = c.id");
    let JoinItem::Source(a) = s.from[0] else {
        panic!("expected a table");
    };
    let JoinItem::Join(join) = &s.from[1] else {
        panic!("expected a join");
    };
    let Filter::Comparison {
        left: Expression::Column(column),
        ..
    } = &join.steps[0].on.entries()[0].1
    else {
        panic!("expected a column comparison");
    };
    assert_ne!(column.source, Some(a));
    assert_eq!(command.sources.len(), 4);
    assert_eq!(
        to_sql("SELECT * FROM a, b JOIN c ON a.id = c.id"),
        "SELECT * FROM a, b JOIN c ON a.id = c.id"
    );
}

#[test]
fn namespaces_qualify_sources() {
    let sql = "SELECT dbo.employee.name FROM db.dbo.employee";
    let (command, s) = parse_select(sql);
    let JoinItem::Source(id) = s.from[0] else {
        panic!("expected a table");
    };
    let Source::Table(table) = &command.sources.source(id).unwrap().source else {
        panic!("expected a table");
    };
    assert_eq!(table.qualified_name(), "db.dbo.employee");
    assert!(matches!(&s.projections[0].item, Expression::Column(c) if c.source == Some(id)));
    assert_eq!(
        to_sql(sql),
        "SELECT db.dbo.employee.name FROM db.dbo.employee"
    );
}

#[test]
fn subquery_source() {
    let sql = "SELECT x.a FROM (SELECT a FROM t) x";
    let (command, s) = parse_select(sql);
    let JoinItem::Source(id) = s.from[0] else {
        panic!("expected a source");
    };
    assert!(matches!(command.sources.source(id).unwrap().source, Source::Query(_)));
    assert_eq!(to_sql(sql), sql);
    round_trip(sql);
}

#[test]
fn function_source() {
    let sql = "SELECT s.item FROM dbo.split('a,b', ',') AS s";
    let (command, s) = parse_select(sql);
    let JoinItem::Source(id) = s.from[0] else {
        panic!("expected a source");
    };
    assert!(matches!(command.sources.source(id).unwrap().source, Source::Function(_)));
    assert_eq!(
        to_sql(sql),
        "SELECT s.item FROM dbo.split('a,b', ',') s"
    );
}

#[test]
fn unknown_alias_still_renders_qualified() {
    assert_eq!(
        to_sql("SELECT other.a FROM t"),
        "SELECT other.a FROM t"
    );
    assert_eq!(to_sql("SELECT x.* FROM t"), "SELECT x.* FROM t");
}
