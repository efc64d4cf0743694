//! Tests for SELECT clauses: qualifiers, TOP, WHERE, GROUP BY, HAVING,
//! ORDER BY, terminators and comments.

mod common;
use common::*;

use sqlgen_core::ast::{DistinctQualifier, Expression, NullPlacement, OrderDirection};

#[test]
fn select_without_from() {
    let (_, s) = parse_select("SELECT 1 + 2");
    assert!(s.from.is_empty());
    assert_eq!(to_sql("SELECT 1 + 2"), "SELECT 1 + 2");
}

#[test]
fn keywords_are_case_insensitive() {
    assert_eq!(
        to_sql("select a from t where a != 1"),
        "SELECT a FROM t WHERE a <> 1"
    );
}

#[test]
fn trailing_semicolon_and_comments() {
    let sql = "SELECT a -- the column\nFROM t /* the table */ WHERE a = 1;";
    assert_eq!(to_sql(sql), "SELECT a FROM t WHERE a = 1");
}

#[test]
fn distinct_and_all_qualifiers() {
    let (_, s) = parse_select("SELECT DISTINCT a FROM t");
    assert_eq!(s.distinct, DistinctQualifier::Distinct);
    let (_, s) = parse_select("SELECT ALL a FROM t");
    assert_eq!(s.distinct, DistinctQualifier::All);
    let (_, s) = parse_select("SELECT a FROM t");
    assert_eq!(s.distinct, DistinctQualifier::Default);
    round_trip("SELECT DISTINCT a FROM t");
    round_trip("SELECT ALL a FROM t");
}

#[test]
fn top_with_modifiers() {
    let sql = "SELECT DISTINCT TOP 10 PERCENT WITH TIES name FROM employee";
    let (_, s) = parse_select(sql);
    let top = s.top.as_ref().unwrap();
    assert_eq!(top.expression, Expression::number(10.0));
    assert!(top.percent);
    assert!(top.with_ties);
    assert_eq!(to_sql(sql), sql);
}

#[test]
fn top_modifiers_in_either_order() {
    assert_eq!(
        to_sql("SELECT TOP 5 WITH TIES PERCENT a FROM t"),
        "SELECT TOP 5 PERCENT WITH TIES a FROM t"
    );
}

#[test]
fn top_is_an_ordinary_name_elsewhere() {
    let (_, s) = parse_select("SELECT top FROM t");
    assert!(s.top.is_none());
    assert_eq!(to_sql("SELECT top FROM t"), "SELECT top FROM t");
}

#[test]
fn top_followed_by_star() {
    let (_, s) = parse_select("SELECT TOP 3 * FROM t");
    assert_eq!(s.top.as_ref().unwrap().expression, Expression::number(3.0));
    assert_eq!(s.projections[0].item, Expression::AllColumns(None));
}

#[test]
fn group_by_and_having() {
    let sql = "SELECT dept, COUNT(*) AS total FROM employee GROUP BY dept HAVING COUNT(*) > 5";
    let (_, s) = parse_select(sql);
    assert_eq!(s.group_by.len(), 1);
    assert_eq!(s.having.len(), 1);
    assert_eq!(s.projections[1].alias.as_deref(), Some("total"));
    assert_eq!(
        to_sql(sql),
        "SELECT dept, COUNT(*) total FROM employee GROUP BY dept HAVING COUNT(*) > 5"
    );
    round_trip(sql);
}

#[test]
fn order_by_direction_and_nulls() {
    let sql = "SELECT a, b FROM t ORDER BY a DESC NULLS LAST, b ASC, c NULLS FIRST";
    let (_, s) = parse_select(sql);
    assert_eq!(s.order_by.len(), 3);
    assert_eq!(s.order_by[0].direction, OrderDirection::Descending);
    assert_eq!(s.order_by[0].nulls, NullPlacement::Last);
    assert_eq!(s.order_by[1].direction, OrderDirection::Ascending);
    assert_eq!(s.order_by[1].nulls, NullPlacement::Default);
    assert_eq!(s.order_by[2].direction, OrderDirection::Default);
    assert_eq!(s.order_by[2].nulls, NullPlacement::First);
    assert_eq!(to_sql(sql), sql);
}

#[test]
fn clauses_render_in_order() {
    let sql = "SELECT a, SUM(b) FROM t WHERE c = 'x' GROUP BY a HAVING SUM(b) > 10 ORDER BY a";
    assert_eq!(to_sql(sql), sql);
    round_trip(sql);
}
