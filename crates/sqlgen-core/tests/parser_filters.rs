//! Tests for WHERE filters: AND/OR precedence, grouping, predicates and
//! quantified comparisons.

mod common;
use common::*;

use sqlgen_core::ast::{ComparisonOp, Conjunction, Filter, Quantifier, ValueProvider};

#[test]
fn and_binds_tighter_than_or() {
    let sql = "SELECT a FROM t WHERE a = 1 OR b = 2 AND c = 3";
    let (_, s) = parse_select(sql);
    let entries = s.where_filter.entries();
    assert_eq!(entries.len(), 2);
    assert!(matches!(entries[0], (Conjunction::And, Filter::Comparison { .. })));
    match &entries[1] {
        (Conjunction::Or, Filter::Group(nested)) => {
            assert!(!nested.wrap_in_parentheses);
            assert_eq!(nested.len(), 2);
            assert!(nested.entries().iter().all(|(c, _)| *c == Conjunction::And));
        }
        other => panic!("expected a nested group, got {other:?}"),
    }
    assert_eq!(to_sql(sql), sql);
}

#[test]
fn single_and_list_stays_flat() {
    let (_, s) = parse_select("SELECT a FROM t WHERE a = 1 AND b = 2 AND c = 3");
    assert_eq!(s.where_filter.len(), 3);
    assert!(s
        .where_filter
        .entries()
        .iter()
        .all(|(_, filter)| matches!(filter, Filter::Comparison { .. })));
}

#[test]
fn parenthesized_filter_is_a_wrapped_group() {
    let sql = "SELECT a FROM t WHERE (a = 1 OR b = 2) AND c = 3";
    let (_, s) = parse_select(sql);
    let entries = s.where_filter.entries();
    assert_eq!(entries.len(), 2);
    assert!(matches!(&entries[0].1, Filter::Group(group) if group.wrap_in_parentheses));
    assert_eq!(to_sql(sql), sql);
}

#[test]
fn parenthesized_arithmetic_is_an_operand() {
    let sql = "SELECT a FROM t WHERE (a + b) = c";
    let (_, s) = parse_select(sql);
    assert!(matches!(
        &s.where_filter.entries()[0].1,
        Filter::Comparison { op: ComparisonOp::EqualTo, .. }
    ));
    assert_eq!(to_sql(sql), sql);
}

#[test]
fn comparison_operators() {
    for (sql_op, op) in [
        ("=", ComparisonOp::EqualTo),
        ("<>", ComparisonOp::NotEqualTo),
        ("<", ComparisonOp::LessThan),
        ("<=", ComparisonOp::LessThanEqualTo),
        (">", ComparisonOp::GreaterThan),
        (">=", ComparisonOp::GreaterThanEqualTo),
    ] {
        let sql = format!("SELECT a FROM t WHERE a {sql_op} 1");
        let (_, s) = parse_select(&sql);
        assert!(
            matches!(&s.where_filter.entries()[0].1, Filter::Comparison { op: parsed, .. } if *parsed == op),
            "operator {sql_op}"
        );
        assert_eq!(to_sql(&sql), sql);
    }
}

#[test]
fn not_filter() {
    let (_, s) = parse_select("SELECT a FROM t WHERE NOT a = 1");
    assert!(matches!(&s.where_filter.entries()[0].1, Filter::Not(_)));
    assert_eq!(
        to_sql("SELECT a FROM t WHERE NOT (a = 1 OR b = 2)"),
        "SELECT a FROM t WHERE NOT (a = 1 OR b = 2)"
    );
}

#[test]
fn predicates() {
    let sql = "SELECT a FROM t WHERE a NOT BETWEEN 1 AND 5 AND b LIKE 'x%' \
               AND c IS NOT NULL AND d IS NULL AND e NOT IN (1, 2) AND f NOT LIKE 'O''%'";
    let (_, s) = parse_select(sql);
    let entries = s.where_filter.entries();
    assert!(matches!(&entries[0].1, Filter::Between { not: true, .. }));
    assert!(matches!(&entries[1].1, Filter::Like { pattern, not: false, .. } if pattern == "x%"));
    assert!(matches!(&entries[2].1, Filter::Null { not: true, .. }));
    assert!(matches!(&entries[3].1, Filter::Null { not: false, .. }));
    assert!(matches!(
        &entries[4].1,
        Filter::In { values: ValueProvider::List(list), not: true, .. } if list.len() == 2
    ));
    assert!(matches!(&entries[5].1, Filter::Like { pattern, not: true, .. } if pattern == "O'%"));
    assert_eq!(
        to_sql(sql),
        "SELECT a FROM t WHERE a NOT BETWEEN 1 AND 5 AND b LIKE 'x%' \
         AND c IS NOT NULL AND d IS NULL AND e NOT IN (1, 2) AND f NOT LIKE 'O''%'"
    );
}

#[test]
fn in_subquery_and_function() {
    let sql = "SELECT a FROM t WHERE a IN (SELECT b FROM u) AND c IN dbo.split('x,y')";
    let (_, s) = parse_select(sql);
    let entries = s.where_filter.entries();
    assert!(matches!(&entries[0].1, Filter::In { values: ValueProvider::Query(_), .. }));
    assert!(matches!(&entries[1].1, Filter::In { values: ValueProvider::Function(_), .. }));
    assert_eq!(to_sql(sql), sql);
}

#[test]
fn very_long_in_list() {
    let values: Vec<String> = (0..10_000).map(|i| i.to_string()).collect();
    let sql = format!("SELECT a FROM t WHERE a IN ({})", values.join(", "));
    let (_, s) = parse_select(&sql);
    assert!(matches!(
        &s.where_filter.entries()[0].1,
        Filter::In { values: ValueProvider::List(list), .. } if list.len() == 10_000
    ));
    assert_eq!(to_sql(&sql), sql);
}

#[test]
fn correlated_exists() {
    let sql = "SELECT a FROM t WHERE EXISTS (SELECT 1 FROM u WHERE u.id = t.id)";
    let (command, s) = parse_select(sql);
    assert!(matches!(&s.where_filter.entries()[0].1, Filter::Exists(_)));
    assert_eq!(command.sources.len(), 2);
    assert_eq!(to_sql(sql), sql);
}

#[test]
fn quantified_comparisons() {
    let sql = "SELECT a FROM t WHERE a > ALL (SELECT b FROM u) OR a = ANY (1, 2) OR a <> SOME (3)";
    let (_, s) = parse_select(sql);
    let quantifiers: Vec<Quantifier> = s
        .where_filter
        .entries()
        .iter()
        .filter_map(|(_, filter)| match filter {
            Filter::Quantified { quantifier, .. } => Some(*quantifier),
            _ => None,
        })
        .collect();
    assert_eq!(
        quantifiers,
        vec![Quantifier::All, Quantifier::Any, Quantifier::Some]
    );
    assert_eq!(to_sql(sql), sql);
}

#[test]
fn having_uses_the_same_filters() {
    let sql = "SELECT a FROM t GROUP BY a HAVING COUNT(*) > 1 OR MIN(b) = 0 AND MAX(b) = 9";
    assert_eq!(to_sql(sql), sql);
    round_trip(sql);
}
