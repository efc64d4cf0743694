//! Invoicing reports
//!
//! Parses a report query, edits the tree and prints it in two styles, then
//! builds an INSERT that archives overdue invoices.
//!
//! Run with: cargo run --example invoicing

use sqlgen_core::ast::{
    Column, Command, ComparisonOp, Expression, Filter, InsertBuilder, Query, SelectBuilder,
    Statement, Table,
};
use sqlgen_core::{parse, render, FormatOptions};

fn main() -> sqlgen_core::Result<()> {
    let mut command = parse(
        "select c.name, sum(i.amount) total \
         from invoices i join clients c on i.client_id = c.id \
         where i.status = 'sent' \
         group by c.name \
         order by total desc",
    )?;

    // Narrow the report to a single year.
    if let Statement::Select(Query::Select(select)) = &mut command.statement {
        select.where_filter.and(Filter::comparison(
            Expression::column("issued_year"),
            ComparisonOp::EqualTo,
            Expression::number(2024.0),
        ));
    }

    println!("{}\n", command.to_sql()?);
    println!("{}\n", render(&command, &FormatOptions::pretty())?);

    let mut sources = sqlgen_core::ast::SourceArena::new();
    let archive = sources.add_table(Table::new("overdue_invoices")?);
    let invoices = sources.add_table(Table::new("invoices")?);
    let mut overdue = SelectBuilder::new();
    overdue.add_projection(Column::of(invoices, "id").into());
    overdue.add_projection(Column::of(invoices, "amount").into());
    overdue.add_join_item(invoices);
    overdue.where_filter.and(Filter::comparison(
        Column::of(invoices, "status").into(),
        ComparisonOp::EqualTo,
        Expression::string("overdue"),
    ));

    let mut insert = InsertBuilder::new(&sources, archive, Query::from(overdue).into())?;
    insert.add_column(Column::of(archive, "invoice_id"));
    insert.add_column(Column::of(archive, "amount"));
    let command = Command::new(sources, Statement::Insert(insert));
    println!("{}", command.to_sql()?);

    Ok(())
}
