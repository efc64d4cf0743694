//! SQL Lexer/Tokenizer
//!
//! This module provides a hand-written lexer for SQL that produces a stream of
//! tokens, and a buffered [`TokenStream`] that lets the grammar engine
//! checkpoint and rewind.

mod span;
mod stream;
mod token;
mod tokenizer;

pub use span::Span;
pub use stream::TokenStream;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
