//! Grammar engine
//!
//! A table of named, mutually recursive rules matched against a
//! [`TokenStream`] with PEG semantics: sequences match every member in
//! order, ordered choices commit to the first alternative that matches, and
//! optional or repeated parts never fail. Rule invocations are memoized per
//! token position for the duration of one [`Grammar::parse`] call.

mod node;
mod sql;

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::lexer::{Keyword, Span, Token, TokenKind, TokenStream};

pub use node::ParseNode;
pub use sql::sql_grammar;

/// A single-token pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terminal {
    /// A reserved keyword.
    Keyword(Keyword),
    /// An unreserved word such as `TOP`, matched case-insensitively.
    Word(&'static str),
    /// A bare or quoted identifier.
    Identifier,
    /// A numeric literal.
    Number,
    /// A string literal.
    String,
    /// An operator or punctuation token.
    Symbol(TokenKind),
}

impl Terminal {
    fn matches(&self, token: &Token) -> bool {
        match self {
            Self::Keyword(keyword) => token.as_keyword() == Some(*keyword),
            Self::Word(word) => token.is_word(word),
            Self::Identifier => token.identifier().is_some(),
            Self::Number => token.kind == TokenKind::Number,
            Self::String => token.kind == TokenKind::String,
            Self::Symbol(kind) => &token.kind == kind,
        }
    }
}

/// The body of a grammar rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Match one token.
    Terminal(Terminal),
    /// Invoke another rule by name.
    Rule(&'static str),
    /// Match every named member in order.
    Sequence(Vec<(&'static str, Expr)>),
    /// Match the first named alternative that succeeds.
    Choice(Vec<(&'static str, Expr)>),
    /// Match the inner expression if possible.
    Optional(Box<Expr>),
    /// Match the inner expression zero or more times. Matches are stored as
    /// children named `Item`.
    Repeat(Box<Expr>),
    /// One or more `item` rules split by a separator, matched in a loop.
    /// The result is still nested to the right: `Multiple` holds `First`,
    /// the separator (under `separator_name`) and a `Remaining` node of
    /// rule `list`; the last item is `Single` with only `First`.
    List {
        list: &'static str,
        item: &'static str,
        separator_name: &'static str,
        separator: Box<Expr>,
    },
}

impl Expr {
    fn collect_references(&self, out: &mut Vec<&'static str>) {
        match self {
            Self::Terminal(_) => {}
            Self::Rule(name) => out.push(*name),
            Self::Sequence(members) | Self::Choice(members) => {
                for (_, member) in members {
                    member.collect_references(out);
                }
            }
            Self::Optional(inner) | Self::Repeat(inner) => inner.collect_references(out),
            Self::List {
                list,
                item,
                separator,
                ..
            } => {
                out.push(*list);
                out.push(*item);
                separator.collect_references(out);
            }
        }
    }
}

/// Matches a reserved keyword.
#[must_use]
pub const fn keyword(keyword: Keyword) -> Expr {
    Expr::Terminal(Terminal::Keyword(keyword))
}

/// Matches an unreserved word.
#[must_use]
pub const fn word(word: &'static str) -> Expr {
    Expr::Terminal(Terminal::Word(word))
}

/// Matches an operator or punctuation token.
#[must_use]
pub const fn symbol(kind: TokenKind) -> Expr {
    Expr::Terminal(Terminal::Symbol(kind))
}

/// Matches an identifier.
#[must_use]
pub const fn identifier() -> Expr {
    Expr::Terminal(Terminal::Identifier)
}

/// Matches a numeric literal.
#[must_use]
pub const fn number() -> Expr {
    Expr::Terminal(Terminal::Number)
}

/// Matches a string literal.
#[must_use]
pub const fn string() -> Expr {
    Expr::Terminal(Terminal::String)
}

/// Invokes a rule.
#[must_use]
pub const fn rule(name: &'static str) -> Expr {
    Expr::Rule(name)
}

/// Builds a sequence.
pub fn seq(members: impl IntoIterator<Item = (&'static str, Expr)>) -> Expr {
    Expr::Sequence(members.into_iter().collect())
}

/// Builds an ordered choice.
pub fn choice(alternatives: impl IntoIterator<Item = (&'static str, Expr)>) -> Expr {
    Expr::Choice(alternatives.into_iter().collect())
}

/// Builds an optional part.
#[must_use]
pub fn optional(inner: Expr) -> Expr {
    Expr::Optional(Box::new(inner))
}

/// Builds a repetition.
#[must_use]
pub fn repeat(inner: Expr) -> Expr {
    Expr::Repeat(Box::new(inner))
}

/// Builds the body of a list rule named `list` of `item` rules:
/// `Multiple = First, Separator, Remaining` or `Single = First`.
#[must_use]
pub fn list(list: &'static str, item: &'static str, separator: Expr) -> Expr {
    list_with(list, item, "Separator", separator)
}

/// Like [`list`], with the separator stored under `separator_name`.
#[must_use]
pub fn list_with(
    list: &'static str,
    item: &'static str,
    separator_name: &'static str,
    separator: Expr,
) -> Expr {
    Expr::List {
        list,
        item,
        separator_name,
        separator: Box::new(separator),
    }
}

/// A table of named rules.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    rules: HashMap<&'static str, Expr>,
}

impl Grammar {
    /// Creates an empty grammar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines (or replaces) a rule.
    pub fn define(&mut self, name: &'static str, body: Expr) -> &mut Self {
        self.rules.insert(name, body);
        self
    }

    /// Returns the body of a rule.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&Expr> {
        self.rules.get(name)
    }

    /// Returns the names of rules that are referenced but never defined,
    /// sorted and without duplicates.
    #[must_use]
    pub fn undefined_references(&self) -> Vec<&'static str> {
        let mut references = Vec::new();
        for body in self.rules.values() {
            body.collect_references(&mut references);
        }
        let mut missing: Vec<&'static str> = references
            .into_iter()
            .filter(|name| !self.rules.contains_key(name))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        missing.sort_unstable();
        missing
    }

    /// Matches `start` against the whole of `text`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] when the rule does not match or leaves
    /// tokens unconsumed, and [`Error::Internal`] when a referenced rule is
    /// not defined.
    pub fn parse(&self, start: &'static str, text: &str) -> Result<Rc<ParseNode>> {
        let mut matcher = Matcher::new(self, text);
        let outcome = matcher.apply(start)?;
        trace!(
            entries = matcher.memo.len(),
            hits = matcher.hits,
            "grammar memo statistics"
        );
        let complete = matcher.stream.at_end();
        match outcome {
            Some(node) if complete => Ok(node),
            _ => {
                let err = matcher.syntax_error();
                debug!(error = %err, "no complete match for {start}");
                Err(err)
            }
        }
    }
}

/// Outcome of matching one expression.
enum Outcome {
    /// Matched and produced a node.
    Node(Rc<ParseNode>),
    /// An optional part that matched nothing.
    Skipped,
    /// No match; the cursor is unmoved.
    Failed,
}

type MemoEntry = Option<(Rc<ParseNode>, usize)>;

/// Per-call matching state.
struct Matcher<'g, 's> {
    grammar: &'g Grammar,
    stream: TokenStream<'s>,
    memo: HashMap<(&'static str, usize), MemoEntry>,
    hits: usize,
}

impl<'g, 's> Matcher<'g, 's> {
    fn new(grammar: &'g Grammar, text: &'s str) -> Self {
        Self {
            grammar,
            stream: TokenStream::new(text),
            memo: HashMap::new(),
            hits: 0,
        }
    }

    fn apply(&mut self, name: &'static str) -> Result<Option<Rc<ParseNode>>> {
        let start = self.stream.position();
        if let Some(entry) = self.memo.get(&(name, start)).cloned() {
            self.hits += 1;
            return Ok(entry.map(|(node, end)| {
                self.stream.rewind(end);
                node
            }));
        }

        let grammar = self.grammar;
        let body = grammar
            .rule(name)
            .ok_or_else(|| Error::internal(name, "rule is not defined"))?;

        let result = match self.eval(body)? {
            Outcome::Node(node) => Some(Rc::new(ParseNode::for_rule(name, node))),
            Outcome::Skipped => Some(Rc::new(ParseNode::branch(Some(name), self.here(), Vec::new()))),
            Outcome::Failed => None,
        };
        let end = self.stream.position();
        self.memo
            .insert((name, start), result.clone().map(|node| (node, end)));
        Ok(result)
    }

    fn eval(&mut self, expr: &'g Expr) -> Result<Outcome> {
        match expr {
            Expr::Terminal(terminal) => {
                let token = self.stream.peek();
                if terminal.matches(token) {
                    let node = ParseNode::leaf(token.clone());
                    self.stream.advance();
                    Ok(Outcome::Node(Rc::new(node)))
                } else {
                    Ok(Outcome::Failed)
                }
            }
            Expr::Rule(name) => Ok(self.apply(*name)?.map_or(Outcome::Failed, Outcome::Node)),
            Expr::Sequence(members) => {
                let start = self.stream.position();
                let mut children = Vec::with_capacity(members.len());
                for (name, member) in members {
                    match self.eval(member)? {
                        Outcome::Node(node) => children.push((*name, node)),
                        Outcome::Skipped => {}
                        Outcome::Failed => {
                            self.stream.rewind(start);
                            return Ok(Outcome::Failed);
                        }
                    }
                }
                let span = self.span_from(start);
                Ok(Outcome::Node(Rc::new(ParseNode::branch(None, span, children))))
            }
            Expr::Choice(alternatives) => {
                for (name, alternative) in alternatives {
                    let node = match self.eval(alternative)? {
                        Outcome::Node(node) => node,
                        Outcome::Skipped => Rc::new(ParseNode::branch(None, self.here(), Vec::new())),
                        Outcome::Failed => continue,
                    };
                    let span = node.span();
                    return Ok(Outcome::Node(Rc::new(ParseNode::branch(
                        None,
                        span,
                        vec![(*name, node)],
                    ))));
                }
                Ok(Outcome::Failed)
            }
            Expr::Optional(inner) => Ok(match self.eval(inner)? {
                Outcome::Node(node) => Outcome::Node(node),
                Outcome::Skipped | Outcome::Failed => Outcome::Skipped,
            }),
            Expr::Repeat(inner) => {
                let start = self.stream.position();
                let mut children = Vec::new();
                loop {
                    let before = self.stream.position();
                    match self.eval(inner)? {
                        Outcome::Node(node) if self.stream.position() > before => {
                            children.push(("Item", node));
                        }
                        _ => {
                            self.stream.rewind(before);
                            break;
                        }
                    }
                }
                if children.is_empty() {
                    Ok(Outcome::Skipped)
                } else {
                    let span = self.span_from(start);
                    Ok(Outcome::Node(Rc::new(ParseNode::branch(None, span, children))))
                }
            }
            Expr::List {
                list,
                item,
                separator_name,
                separator,
            } => self.list(*list, *item, *separator_name, separator),
        }
    }

    fn list(
        &mut self,
        list: &'static str,
        item: &'static str,
        separator_name: &'static str,
        separator: &'g Expr,
    ) -> Result<Outcome> {
        let start = self.stream.position();
        let Some(first) = self.apply(item)? else {
            self.stream.rewind(start);
            return Ok(Outcome::Failed);
        };
        let mut items = vec![(start, first)];
        let mut separators = Vec::new();
        loop {
            let before = self.stream.position();
            let Outcome::Node(split) = self.eval(separator)? else {
                self.stream.rewind(before);
                break;
            };
            let item_start = self.stream.position();
            match self.apply(item)? {
                Some(node) => {
                    separators.push(split);
                    items.push((item_start, node));
                }
                None => {
                    self.stream.rewind(before);
                    break;
                }
            }
        }

        // Fold from the last item back so each level holds the rest.
        let end = self.stream.position();
        let mut remaining: Option<Rc<ParseNode>> = None;
        while let Some((item_start, node)) = items.pop() {
            let span = self.span_between(item_start, end);
            let alternative = match (remaining.take(), separators.pop()) {
                (Some(rest), Some(split)) => (
                    "Multiple",
                    ParseNode::branch(
                        None,
                        span,
                        vec![("First", node), (separator_name, split), ("Remaining", rest)],
                    ),
                ),
                _ => ("Single", ParseNode::branch(None, span, vec![("First", node)])),
            };
            let choice = Rc::new(ParseNode::branch(
                None,
                span,
                vec![(alternative.0, Rc::new(alternative.1))],
            ));
            if items.is_empty() {
                return Ok(Outcome::Node(choice));
            }
            remaining = Some(Rc::new(ParseNode::for_rule(list, choice)));
        }
        Err(Error::internal(list, "list matched no items"))
    }

    /// An empty span at the start of the current token.
    fn here(&mut self) -> Span {
        let pos = self.stream.position();
        Span::at(self.stream.token_at(pos).span.start)
    }

    /// The span of the tokens consumed since `start`.
    fn span_from(&mut self, start: usize) -> Span {
        let end = self.stream.position();
        self.span_between(start, end)
    }

    /// The span of the tokens from `start` up to, not including, `end`.
    fn span_between(&mut self, start: usize, end: usize) -> Span {
        if end == start {
            return self.here();
        }
        let first = self.stream.token_at(start).span;
        let last = self.stream.token_at(end - 1).span;
        first.merge(last)
    }

    fn syntax_error(&mut self) -> Error {
        let pos = self.stream.furthest().max(self.stream.position());
        let token = self.stream.token_at(pos);
        let message = match &token.kind {
            TokenKind::Eof => String::from("unexpected end of input"),
            TokenKind::Error(message) => message.clone(),
            _ => format!("unexpected token '{}'", token.text),
        };
        Error::Syntax {
            message,
            span: token.span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `Start = Greeting` where the first alternative shares a prefix with
    /// the second.
    fn greeting_grammar() -> Grammar {
        let mut grammar = Grammar::new();
        grammar
            .define(
                "Start",
                seq([
                    ("Greeting", rule("Greeting")),
                    ("Terminator", optional(symbol(TokenKind::Semicolon))),
                ]),
            )
            .define(
                "Greeting",
                choice([
                    (
                        "Pair",
                        seq([("First", rule("Name")), ("Second", rule("Name")), ("Bang", word("BANG"))]),
                    ),
                    ("Names", rule("Names")),
                ]),
            )
            .define("Names", list("Names", "Name", symbol(TokenKind::Comma)))
            .define("Name", identifier());
        grammar
    }

    #[test]
    fn test_first_matching_alternative_wins() {
        let grammar = greeting_grammar();
        let tree = grammar.parse("Start", "a b bang").unwrap();
        let greeting = tree.child("Greeting").unwrap();
        assert!(greeting.has("Pair"));
    }

    #[test]
    fn test_backtracks_into_later_alternative() {
        let grammar = greeting_grammar();
        let tree = grammar.parse("Start", "a, b, c;").unwrap();
        let names = tree.child("Greeting").unwrap().child("Names").unwrap();
        let multiple = names.child("Multiple").unwrap();
        assert_eq!(multiple.child("First").unwrap().text("a, b, c;"), "a");
        assert_eq!(multiple.child("Remaining").unwrap().text("a, b, c;"), "b, c");
        assert!(tree.has("Terminator"));
    }

    #[test]
    fn test_list_nests_to_the_right() {
        let grammar = greeting_grammar();
        let text = "a, b, c";
        let tree = grammar.parse("Start", text).unwrap();
        let names = tree.child("Greeting").unwrap().child("Names").unwrap();
        assert_eq!(names.rule(), Some("Names"));
        let rest = names.child("Multiple").unwrap().child("Remaining").unwrap();
        assert_eq!(rest.rule(), Some("Names"));
        let last = rest.child("Multiple").unwrap().child("Remaining").unwrap();
        assert_eq!(last.child("Single").unwrap().child("First").unwrap().text(text), "c");
        assert!(rest.child("Multiple").unwrap().has("Separator"));
    }

    #[test]
    fn test_long_list_does_not_exhaust_the_stack() {
        let grammar = greeting_grammar();
        let text = vec!["n"; 20_000].join(", ");
        let tree = grammar.parse("Start", &text).unwrap();
        let mut node = tree.child("Greeting").unwrap().child("Names").unwrap();
        let mut count = 1;
        while let Some(multiple) = node.child("Multiple") {
            node = multiple.child("Remaining").unwrap();
            count += 1;
        }
        assert_eq!(count, 20_000);
    }

    #[test]
    fn test_unconsumed_tokens_are_a_syntax_error() {
        let grammar = greeting_grammar();
        let err = grammar.parse("Start", "a b").unwrap_err();
        assert_eq!(
            err,
            Error::Syntax {
                message: String::from("unexpected end of input"),
                span: Span::at(3),
            }
        );
    }

    #[test]
    fn test_syntax_error_reports_furthest_token() {
        let grammar = greeting_grammar();
        let err = grammar.parse("Start", "a, b, 42").unwrap_err();
        assert!(matches!(err, Error::Syntax { ref message, span } if message == "unexpected token '42'" && span == Span::new(6, 8)));
    }

    #[test]
    fn test_tokenizer_message_becomes_syntax_error() {
        let grammar = greeting_grammar();
        let err = grammar.parse("Start", "a, 'open").unwrap_err();
        assert!(matches!(err, Error::Syntax { ref message, .. } if message == "unterminated string literal"));
    }

    #[test]
    fn test_undefined_rule_is_internal_error() {
        let mut grammar = Grammar::new();
        grammar.define("Start", rule("Missing"));
        assert_eq!(grammar.undefined_references(), vec!["Missing"]);
        assert!(matches!(grammar.parse("Start", "x"), Err(Error::Internal { .. })));
    }

    #[test]
    fn test_repeat_collects_items() {
        let mut grammar = Grammar::new();
        grammar.define(
            "Start",
            seq([("Words", repeat(choice([("Top", word("TOP")), ("Ties", word("TIES"))])))]),
        );
        let tree = grammar.parse("Start", "top ties TOP").unwrap();
        let words: Vec<_> = tree
            .child("Words")
            .unwrap()
            .children()
            .map(|(_, item)| item.alternative().unwrap().0)
            .collect();
        assert_eq!(words, vec!["Top", "Ties", "Top"]);
    }

    #[test]
    fn test_empty_repeat_leaves_member_absent() {
        let mut grammar = Grammar::new();
        grammar.define(
            "Start",
            seq([("Name", identifier()), ("Words", repeat(word("TOP")))]),
        );
        let tree = grammar.parse("Start", "a").unwrap();
        assert!(!tree.has("Words"));
    }
}
