//! The SQL rule table.
//!
//! Alternative order is significant: the engine commits to the first
//! alternative that matches.

use std::sync::OnceLock;

use super::{
    choice, identifier, keyword, list, list_with, number, optional, repeat, rule, seq, string, symbol, word,
    Grammar,
};
use crate::lexer::{Keyword, TokenKind};

/// Returns the shared SQL grammar, whose entry rule is `Start`.
pub fn sql_grammar() -> &'static Grammar {
    static GRAMMAR: OnceLock<Grammar> = OnceLock::new();
    GRAMMAR.get_or_init(build)
}

fn open() -> (&'static str, super::Expr) {
    ("Open", symbol(TokenKind::LeftParen))
}

fn close() -> (&'static str, super::Expr) {
    ("Close", symbol(TokenKind::RightParen))
}

fn comma() -> super::Expr {
    symbol(TokenKind::Comma)
}

#[allow(clippy::too_many_lines)]
fn build() -> Grammar {
    let mut g = Grammar::new();

    // Statements
    g.define(
        "Start",
        seq([
            ("Statement", rule("Statement")),
            ("Terminator", optional(symbol(TokenKind::Semicolon))),
        ]),
    );
    g.define(
        "Statement",
        choice([
            ("Select", rule("SelectStatement")),
            ("Insert", rule("InsertStatement")),
            ("Update", rule("UpdateStatement")),
            ("Delete", rule("DeleteStatement")),
        ]),
    );

    // SELECT
    g.define(
        "SelectStatement",
        seq([
            ("Expression", rule("SelectExpression")),
            (
                "OrderBy",
                optional(seq([
                    ("Order", keyword(Keyword::Order)),
                    ("By", keyword(Keyword::By)),
                    ("Items", rule("OrderByList")),
                ])),
            ),
        ]),
    );
    g.define(
        "SelectExpression",
        seq([
            ("Leading", rule("SelectTerm")),
            (
                "Remaining",
                optional(seq([
                    ("Combiner", rule("SelectCombiner")),
                    ("Qualifier", optional(rule("DistinctQualifier"))),
                    ("Expression", rule("SelectExpression")),
                ])),
            ),
        ]),
    );
    g.define(
        "SelectTerm",
        choice([
            (
                "Wrapped",
                seq([open(), ("Statement", rule("SelectStatement")), close()]),
            ),
            ("Specification", rule("SelectSpecification")),
        ]),
    );
    g.define(
        "SelectCombiner",
        choice([
            ("Union", keyword(Keyword::Union)),
            ("Intersect", keyword(Keyword::Intersect)),
            ("Except", keyword(Keyword::Except)),
            ("Minus", keyword(Keyword::Minus)),
        ]),
    );
    g.define(
        "DistinctQualifier",
        choice([
            ("Distinct", keyword(Keyword::Distinct)),
            ("All", keyword(Keyword::All)),
        ]),
    );
    g.define(
        "SelectSpecification",
        seq([
            ("Select", keyword(Keyword::Select)),
            ("Qualifier", optional(rule("DistinctQualifier"))),
            ("Top", optional(rule("Top"))),
            ("Projections", rule("ProjectionList")),
            (
                "From",
                optional(seq([
                    ("From", keyword(Keyword::From)),
                    ("Items", rule("FromList")),
                ])),
            ),
            (
                "Where",
                optional(seq([
                    ("Where", keyword(Keyword::Where)),
                    ("Filter", rule("OrFilter")),
                ])),
            ),
            (
                "GroupBy",
                optional(seq([
                    ("Group", keyword(Keyword::Group)),
                    ("By", keyword(Keyword::By)),
                    ("Items", rule("GroupByList")),
                ])),
            ),
            (
                "Having",
                optional(seq([
                    ("Having", keyword(Keyword::Having)),
                    ("Filter", rule("OrFilter")),
                ])),
            ),
        ]),
    );
    g.define(
        "Top",
        seq([
            ("Top", word("TOP")),
            ("Expression", rule("AdditiveExpression")),
            (
                "Modifiers",
                repeat(choice([
                    ("Percent", word("PERCENT")),
                    (
                        "WithTies",
                        seq([("With", keyword(Keyword::With)), ("Ties", word("TIES"))]),
                    ),
                ])),
            ),
        ]),
    );

    // Projections
    g.define("ProjectionList", list("ProjectionList", "ProjectionItem", comma()));
    g.define(
        "ProjectionItem",
        choice([
            (
                "Star",
                seq([
                    (
                        "Qualifier",
                        optional(seq([
                            ("Source", rule("MultipartIdentifier")),
                            ("Dot", symbol(TokenKind::Dot)),
                        ])),
                    ),
                    ("Star", symbol(TokenKind::Star)),
                ]),
            ),
            (
                "Expression",
                seq([
                    ("Item", rule("AdditiveExpression")),
                    ("Alias", optional(rule("AliasExpression"))),
                ]),
            ),
        ]),
    );
    g.define(
        "AliasExpression",
        seq([
            ("As", optional(keyword(Keyword::As))),
            ("Alias", identifier()),
        ]),
    );

    // FROM and joins
    g.define("FromList", list("FromList", "Join", comma()));
    g.define(
        "Join",
        choice([
            (
                "Wrapped",
                seq([
                    open(),
                    ("Join", rule("Join")),
                    close(),
                    ("Next", optional(rule("JoinPrime"))),
                ]),
            ),
            (
                "Joined",
                seq([
                    ("Item", rule("JoinItem")),
                    ("Next", optional(rule("JoinPrime"))),
                ]),
            ),
        ]),
    );
    g.define(
        "JoinItem",
        seq([
            (
                "Source",
                choice([
                    ("Function", rule("FunctionCall")),
                    ("Table", rule("MultipartIdentifier")),
                    (
                        "Select",
                        seq([open(), ("Statement", rule("SelectStatement")), close()]),
                    ),
                ]),
            ),
            ("Alias", optional(rule("AliasExpression"))),
        ]),
    );
    g.define(
        "JoinPrime",
        choice([
            (
                "Filtered",
                seq([
                    ("Type", rule("FilteredJoinType")),
                    ("Item", rule("JoinItem")),
                    ("On", keyword(Keyword::On)),
                    ("Filter", rule("OrFilter")),
                    ("Next", optional(rule("JoinPrime"))),
                ]),
            ),
            (
                "Cross",
                seq([
                    ("Cross", keyword(Keyword::Cross)),
                    ("Join", keyword(Keyword::Join)),
                    ("Item", rule("JoinItem")),
                    ("Next", optional(rule("JoinPrime"))),
                ]),
            ),
        ]),
    );
    g.define(
        "FilteredJoinType",
        choice([
            (
                "Inner",
                seq([
                    ("Inner", optional(keyword(Keyword::Inner))),
                    ("Join", keyword(Keyword::Join)),
                ]),
            ),
            ("LeftOuter", outer_join(Keyword::Left)),
            ("RightOuter", outer_join(Keyword::Right)),
            ("FullOuter", outer_join(Keyword::Full)),
        ]),
    );

    // Filters
    g.define("OrFilter", list("OrFilter", "AndFilter", keyword(Keyword::Or)));
    g.define("AndFilter", list("AndFilter", "Filter", keyword(Keyword::And)));
    g.define(
        "Filter",
        choice([
            (
                "Not",
                seq([
                    ("Not", keyword(Keyword::Not)),
                    ("Filter", rule("Filter")),
                ]),
            ),
            (
                "Wrapped",
                seq([open(), ("Filter", rule("OrFilter")), close()]),
            ),
            (
                "Quantify",
                seq([
                    ("Item", rule("AdditiveExpression")),
                    ("Operator", rule("ComparisonOperator")),
                    ("Quantifier", rule("Quantifier")),
                    open(),
                    (
                        "Values",
                        choice([
                            ("Select", rule("SelectStatement")),
                            ("Values", rule("ValueList")),
                        ]),
                    ),
                    close(),
                ]),
            ),
            (
                "Order",
                seq([
                    ("Left", rule("AdditiveExpression")),
                    ("Operator", rule("ComparisonOperator")),
                    ("Right", rule("AdditiveExpression")),
                ]),
            ),
            (
                "Between",
                seq([
                    ("Item", rule("AdditiveExpression")),
                    ("Not", optional(keyword(Keyword::Not))),
                    ("Between", keyword(Keyword::Between)),
                    ("Lower", rule("AdditiveExpression")),
                    ("And", keyword(Keyword::And)),
                    ("Upper", rule("AdditiveExpression")),
                ]),
            ),
            (
                "Like",
                seq([
                    ("Item", rule("AdditiveExpression")),
                    ("Not", optional(keyword(Keyword::Not))),
                    ("Like", keyword(Keyword::Like)),
                    ("Pattern", string()),
                ]),
            ),
            (
                "Is",
                seq([
                    ("Item", rule("AdditiveExpression")),
                    ("Is", keyword(Keyword::Is)),
                    ("Not", optional(keyword(Keyword::Not))),
                    ("Null", keyword(Keyword::Null)),
                ]),
            ),
            (
                "In",
                seq([
                    ("Item", rule("AdditiveExpression")),
                    ("Not", optional(keyword(Keyword::Not))),
                    ("In", keyword(Keyword::In)),
                    (
                        "Values",
                        choice([
                            (
                                "Select",
                                seq([open(), ("Statement", rule("SelectStatement")), close()]),
                            ),
                            (
                                "Values",
                                seq([open(), ("Values", rule("ValueList")), close()]),
                            ),
                            ("Function", rule("FunctionCall")),
                        ]),
                    ),
                ]),
            ),
            (
                "Exists",
                seq([
                    ("Exists", keyword(Keyword::Exists)),
                    open(),
                    ("Statement", rule("SelectStatement")),
                    close(),
                ]),
            ),
        ]),
    );
    g.define(
        "Quantifier",
        choice([
            ("All", keyword(Keyword::All)),
            ("Any", keyword(Keyword::Any)),
            ("Some", keyword(Keyword::Some)),
        ]),
    );
    g.define(
        "ComparisonOperator",
        choice([
            ("EqualTo", symbol(TokenKind::Eq)),
            ("NotEqualTo", symbol(TokenKind::NotEq)),
            ("LessThanEqualTo", symbol(TokenKind::LtEq)),
            ("GreaterThanEqualTo", symbol(TokenKind::GtEq)),
            ("LessThan", symbol(TokenKind::Lt)),
            ("GreaterThan", symbol(TokenKind::Gt)),
        ]),
    );

    // Arithmetic
    g.define(
        "AdditiveExpression",
        arithmetic("AdditiveExpression", "MultiplicativeExpression", "AdditiveOperator"),
    );
    g.define(
        "AdditiveOperator",
        choice([
            ("Plus", symbol(TokenKind::Plus)),
            ("Minus", symbol(TokenKind::Minus)),
        ]),
    );
    g.define(
        "MultiplicativeExpression",
        arithmetic("MultiplicativeExpression", "WrappedItem", "MultiplicativeOperator"),
    );
    g.define(
        "MultiplicativeOperator",
        choice([
            ("Multiply", symbol(TokenKind::Star)),
            ("Divide", symbol(TokenKind::Slash)),
        ]),
    );
    g.define(
        "WrappedItem",
        choice([
            (
                "Negated",
                seq([
                    ("Minus", symbol(TokenKind::Minus)),
                    ("Item", rule("WrappedItem")),
                ]),
            ),
            (
                "Wrapped",
                seq([open(), ("Expression", rule("AdditiveExpression")), close()]),
            ),
            ("Item", rule("Item")),
        ]),
    );
    g.define(
        "Item",
        choice([
            ("Number", number()),
            ("String", string()),
            ("Null", keyword(Keyword::Null)),
            ("Function", rule("FunctionCall")),
            ("Column", rule("MultipartIdentifier")),
            (
                "Select",
                seq([open(), ("Statement", rule("SelectStatement")), close()]),
            ),
        ]),
    );
    g.define(
        "FunctionCall",
        seq([
            ("Name", rule("MultipartIdentifier")),
            open(),
            (
                "Arguments",
                optional(choice([
                    ("Star", symbol(TokenKind::Star)),
                    ("Values", rule("ValueList")),
                ])),
            ),
            close(),
        ]),
    );

    // Lists and names
    g.define(
        "MultipartIdentifier",
        choice([
            (
                "Multiple",
                seq([
                    ("First", identifier()),
                    ("Separator", symbol(TokenKind::Dot)),
                    ("Remaining", rule("MultipartIdentifier")),
                ]),
            ),
            ("Single", seq([("First", identifier())])),
        ]),
    );
    g.define("ValueList", list("ValueList", "AdditiveExpression", comma()));
    g.define("GroupByList", list("GroupByList", "AdditiveExpression", comma()));
    g.define("OrderByList", list("OrderByList", "OrderByItem", comma()));
    g.define(
        "OrderByItem",
        seq([
            ("Expression", rule("AdditiveExpression")),
            (
                "Direction",
                optional(choice([
                    ("Descending", keyword(Keyword::Desc)),
                    ("Ascending", keyword(Keyword::Asc)),
                ])),
            ),
            (
                "Nulls",
                optional(choice([
                    (
                        "First",
                        seq([("Nulls", word("NULLS")), ("First", word("FIRST"))]),
                    ),
                    ("Last", seq([("Nulls", word("NULLS")), ("Last", word("LAST"))])),
                ])),
            ),
        ]),
    );

    // INSERT, UPDATE and DELETE are recognized so they can be reported as
    // unsupported instead of as syntax errors.
    g.define(
        "InsertStatement",
        seq([
            ("Insert", keyword(Keyword::Insert)),
            ("Into", optional(keyword(Keyword::Into))),
            ("Table", rule("MultipartIdentifier")),
            (
                "Columns",
                optional(seq([
                    open(),
                    ("Columns", rule("ColumnList")),
                    close(),
                ])),
            ),
            (
                "Values",
                choice([
                    (
                        "Values",
                        seq([
                            ("Values", keyword(Keyword::Values)),
                            open(),
                            ("Items", rule("ValueList")),
                            close(),
                        ]),
                    ),
                    ("Select", rule("SelectStatement")),
                ]),
            ),
        ]),
    );
    g.define("ColumnList", list("ColumnList", "MultipartIdentifier", comma()));
    g.define(
        "UpdateStatement",
        seq([
            ("Update", keyword(Keyword::Update)),
            ("Table", rule("JoinItem")),
            ("Set", keyword(Keyword::Set)),
            ("Setters", rule("SetterList")),
            (
                "Where",
                optional(seq([
                    ("Where", keyword(Keyword::Where)),
                    ("Filter", rule("OrFilter")),
                ])),
            ),
        ]),
    );
    g.define("SetterList", list("SetterList", "Setter", comma()));
    g.define(
        "Setter",
        seq([
            ("Column", rule("MultipartIdentifier")),
            ("Assign", symbol(TokenKind::Eq)),
            ("Value", rule("AdditiveExpression")),
        ]),
    );
    g.define(
        "DeleteStatement",
        seq([
            ("Delete", keyword(Keyword::Delete)),
            ("From", optional(keyword(Keyword::From))),
            ("Table", rule("JoinItem")),
            (
                "Where",
                optional(seq([
                    ("Where", keyword(Keyword::Where)),
                    ("Filter", rule("OrFilter")),
                ])),
            ),
        ]),
    );

    g
}

/// `First, Operator, Remaining` or just `First`, nesting to the right.
fn arithmetic(name: &'static str, operand: &'static str, operator: &'static str) -> super::Expr {
    list_with(name, operand, "Operator", rule(operator))
}

/// `LEFT [OUTER] JOIN` and friends.
fn outer_join(side: Keyword) -> super::Expr {
    seq([
        ("Side", keyword(side)),
        ("Outer", optional(keyword(Keyword::Outer))),
        ("Join", keyword(Keyword::Join)),
    ])
}
