//! # sqlgen-core
//!
//! A bidirectional SQL SELECT toolkit.
//!
//! This crate provides:
//! - A tokenizer and a table-driven grammar engine with PEG semantics
//! - A builder that turns the parse tree into an editable AST, resolving
//!   column references through the sources visible at each nesting level
//! - A renderer that writes any AST back as SQL under [`FormatOptions`]
//!
//! ## Parsing and rendering
//!
//! ```rust
//! use sqlgen_core::{parse, render, FormatOptions};
//!
//! let command = parse("select e.name from dbo.employee e where e.age >= 21").unwrap();
//! assert_eq!(
//!     command.to_sql().unwrap(),
//!     "SELECT e.name FROM dbo.employee e WHERE e.age >= 21"
//! );
//!
//! let pretty = render(&command, &FormatOptions::pretty()).unwrap();
//! assert!(pretty.contains("\nFROM dbo.employee AS e"));
//! ```
//!
//! ## Building commands by hand
//!
//! Sources live in a [`ast::SourceArena`] owned by the command; columns and
//! joins refer to them by handle.
//!
//! ```rust
//! use sqlgen_core::ast::{
//!     Column, Command, ComparisonOp, Expression, Filter, SelectBuilder, SourceArena, Statement,
//!     Table,
//! };
//!
//! let mut sources = SourceArena::new();
//! let customer = sources.add_table(Table::new("customer").unwrap());
//! let mut select = SelectBuilder::new();
//! select.add_join_item(customer);
//! select.add_projection(Column::of(customer, "name").into());
//! select.where_filter.and(Filter::comparison(
//!     Column::of(customer, "region").into(),
//!     ComparisonOp::EqualTo,
//!     Expression::string("North"),
//! ));
//!
//! let command = Command::new(sources, Statement::Select(select.into()));
//! assert_eq!(
//!     command.to_sql().unwrap(),
//!     "SELECT customer.name FROM customer WHERE customer.region = 'North'"
//! );
//! ```

pub mod ast;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod render;

pub use ast::Command;
pub use error::{Error, Result};
pub use parser::{parse, CommandBuilder};
pub use render::{render, FormatOptions, Render, RenderContext};
