#![allow(dead_code)]

use sqlgen_core::ast::{Command, Query, SelectBuilder};
use sqlgen_core::{Error, FormatOptions};

pub fn parse(sql: &str) -> Command {
    sqlgen_core::parse(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> Error {
    sqlgen_core::parse(sql).expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_query(sql: &str) -> Query {
    match parse(sql).query() {
        Some(query) => query.clone(),
        None => panic!("Expected a query for: {sql}"),
    }
}

pub fn parse_select(sql: &str) -> (Command, SelectBuilder) {
    let command = parse(sql);
    match command.select() {
        Some(select) => {
            let select = select.clone();
            (command, select)
        }
        None => panic!("Expected a single SELECT for: {sql}"),
    }
}

/// Renders `sql` in the default style.
pub fn to_sql(sql: &str) -> String {
    parse(sql)
        .to_sql()
        .unwrap_or_else(|e| panic!("Failed to render: {sql}\nError: {e:?}"))
}

/// Renders `sql` with `options`.
pub fn format(sql: &str, options: &FormatOptions) -> String {
    sqlgen_core::render(&parse(sql), options)
        .unwrap_or_else(|e| panic!("Failed to render: {sql}\nError: {e:?}"))
}

/// Verifies that rendering produces a fixed point: the rendered text
/// parses back and renders to the same string again.
pub fn round_trip(sql: &str) {
    round_trip_with(sql, &FormatOptions::default());
}

pub fn round_trip_with(sql: &str, options: &FormatOptions) {
    let rendered1 = format(sql, options);
    let rendered2 = format(&rendered1, options);
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}
