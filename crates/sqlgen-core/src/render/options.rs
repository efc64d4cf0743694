//! Formatting options consulted by the renderer.

use serde::{Deserialize, Serialize};

/// How rendered SQL is laid out.
///
/// Every field has a default, so a JSON document naming only some options
/// deserializes. The default style puts everything on one line with terse
/// join keywords and no `AS` before aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct FormatOptions {
    /// Start each clause (FROM, WHERE, ...) on its own line.
    pub one_clause_per_line: bool,
    /// Put each projection on its own line.
    pub one_projection_per_line: bool,
    /// Indent projections that are on their own line.
    pub indent_projections: bool,
    /// Put each INSERT column on its own line.
    pub one_insert_column_per_line: bool,
    /// Indent INSERT columns that are on their own line.
    pub indent_insert_columns: bool,
    /// Put each GROUP BY item on its own line.
    pub one_group_by_item_per_line: bool,
    /// Indent GROUP BY items that are on their own line.
    pub indent_group_by_items: bool,
    /// Put each ORDER BY item on its own line.
    pub one_order_by_item_per_line: bool,
    /// Indent ORDER BY items that are on their own line.
    pub indent_order_by_items: bool,
    /// Put each value of a value list on its own line. Never applies to
    /// function arguments.
    pub one_value_list_item_per_line: bool,
    /// Indent values that are on their own line.
    pub indent_value_list_items: bool,
    /// Number of spaces per indentation level.
    pub indent_step: usize,
    /// Write `INNER JOIN` instead of `JOIN`.
    pub verbose_inner_join: bool,
    /// Write `LEFT OUTER JOIN` instead of `LEFT JOIN` (likewise RIGHT, FULL).
    pub verbose_outer_join: bool,
    /// Write `AS` between a projection and its alias.
    pub alias_columns_using_as: bool,
    /// Write `AS` between a join item and its alias.
    pub alias_join_items_using_as: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            one_clause_per_line: false,
            one_projection_per_line: false,
            indent_projections: false,
            one_insert_column_per_line: false,
            indent_insert_columns: false,
            one_group_by_item_per_line: false,
            indent_group_by_items: false,
            one_order_by_item_per_line: false,
            indent_order_by_items: false,
            one_value_list_item_per_line: false,
            indent_value_list_items: false,
            indent_step: 4,
            verbose_inner_join: false,
            verbose_outer_join: false,
            alias_columns_using_as: false,
            alias_join_items_using_as: false,
        }
    }
}

impl FormatOptions {
    /// One clause, projection and list item per line, all indented, with
    /// verbose join keywords and `AS` aliases.
    #[must_use]
    pub fn pretty() -> Self {
        Self {
            one_clause_per_line: true,
            one_projection_per_line: true,
            indent_projections: true,
            one_insert_column_per_line: true,
            indent_insert_columns: true,
            one_group_by_item_per_line: true,
            indent_group_by_items: true,
            one_order_by_item_per_line: true,
            indent_order_by_items: true,
            one_value_list_item_per_line: true,
            indent_value_list_items: true,
            indent_step: 4,
            verbose_inner_join: true,
            verbose_outer_join: true,
            alias_columns_using_as: true,
            alias_join_items_using_as: true,
        }
    }
}
