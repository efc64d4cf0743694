//! SQL parser
//!
//! Matches text against the SQL grammar and builds the AST from the parse
//! tree, resolving column references through a stack of source scopes.

mod builder;
mod scope;

pub use builder::{parse, CommandBuilder};
