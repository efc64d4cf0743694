//! Parse tree nodes produced by the grammar engine.

use std::rc::Rc;

use crate::lexer::{Span, Token};

/// The result of one successful rule invocation.
///
/// Sequence members and the chosen alternative of an ordered choice are
/// stored as named children; members that did not match (optional parts)
/// are simply absent. Leaves carry the token they consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNode {
    rule: Option<&'static str>,
    span: Span,
    token: Option<Token>,
    children: Vec<(&'static str, Rc<ParseNode>)>,
}

impl ParseNode {
    pub(crate) fn branch(
        rule: Option<&'static str>,
        span: Span,
        children: Vec<(&'static str, Rc<ParseNode>)>,
    ) -> Self {
        Self {
            rule,
            span,
            token: None,
            children,
        }
    }

    pub(crate) fn leaf(token: Token) -> Self {
        Self {
            rule: None,
            span: token.span,
            token: Some(token),
            children: Vec::new(),
        }
    }

    /// Wraps the body of rule `name` into that rule's node. An anonymous
    /// body (sequence or choice) hands its children to the rule node; a body
    /// that is itself a rule or a token becomes the single child.
    pub(crate) fn for_rule(name: &'static str, body: Rc<Self>) -> Self {
        let span = body.span;
        if body.rule.is_none() && body.token.is_none() {
            let children = Rc::try_unwrap(body)
                .map_or_else(|rc| rc.children.clone(), |mut node| std::mem::take(&mut node.children));
            Self::branch(Some(name), span, children)
        } else {
            let child_name = body.rule.unwrap_or("Token");
            Self::branch(Some(name), span, vec![(child_name, body)])
        }
    }

    /// Name of the rule that produced this node, if any.
    #[must_use]
    pub const fn rule(&self) -> Option<&'static str> {
        self.rule
    }

    /// Source location covered by this node.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// The token consumed by a leaf node.
    #[must_use]
    pub const fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Returns the child stored under `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children
            .iter()
            .find(|(child, _)| *child == name)
            .map(|(_, node)| node.as_ref())
    }

    /// Returns true if a child named `name` matched.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.child(name).is_some()
    }

    /// Iterates over all children in match order.
    pub fn children(&self) -> impl Iterator<Item = (&'static str, &Self)> {
        self.children.iter().map(|(name, node)| (*name, node.as_ref()))
    }

    /// Returns the first child, which for an ordered choice is the
    /// alternative that matched.
    #[must_use]
    pub fn alternative(&self) -> Option<(&'static str, &Self)> {
        self.children().next()
    }

    /// Returns the source text this node consumed.
    #[must_use]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.span.slice(source)
    }
}

impl Drop for ParseNode {
    // Long lists nest thousands of levels deep; release them with an
    // explicit stack instead of recursive drops.
    fn drop(&mut self) {
        let mut pending: Vec<Rc<Self>> = self.children.drain(..).map(|(_, node)| node).collect();
        while let Some(node) = pending.pop() {
            if let Ok(mut node) = Rc::try_unwrap(node) {
                pending.extend(node.children.drain(..).map(|(_, child)| child));
            }
        }
    }
}
