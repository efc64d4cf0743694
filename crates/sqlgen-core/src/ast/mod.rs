//! Abstract Syntax Tree (AST) types for SQL commands.
//!
//! Nodes are plain owned values that can be built by hand or by the parser
//! and edited freely before rendering. Sources live in a [`SourceArena`]
//! owned by the [`Command`]; everything else refers to them by
//! [`SourceId`].

mod expression;
mod filter;
mod join;
mod source;
mod statement;

pub use expression::{
    Arithmetic, ArithmeticOp, Column, Expression, Function, Literal, ValueList, ValueProvider,
};
pub use filter::{ComparisonOp, Conjunction, Filter, FilterGroup, Quantifier};
pub use join::{Join, JoinItem, JoinStep, JoinType};
pub use source::{AliasedSource, Namespace, Source, SourceArena, SourceId, Table};
pub use statement::{
    CombinerKind, Command, DistinctQualifier, InsertBuilder, NullPlacement, OrderBy,
    OrderDirection, Projection, Query, SelectBuilder, SelectCombiner, Statement, Top,
};
