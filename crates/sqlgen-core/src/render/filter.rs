//! Rendering of filters and filter groups.

use crate::ast::{Filter, FilterGroup};
use crate::error::Result;

use super::{string_literal, Render, RenderContext};

fn not_keyword(not: bool) -> &'static str {
    if not {
        "NOT "
    } else {
        ""
    }
}

impl Render for Filter {
    fn render(&self, context: &RenderContext<'_>) -> Result<String> {
        match self {
            Self::Comparison { left, op, right } => Ok(format!(
                "{} {} {}",
                left.render(context)?,
                op.as_str(),
                right.render(context)?
            )),
            Self::Quantified {
                left,
                op,
                quantifier,
                values,
            } => Ok(format!(
                "{} {} {} {}",
                left.render(context)?,
                op.as_str(),
                quantifier.as_str(),
                values.render(context)?
            )),
            Self::Between {
                expression,
                lower,
                upper,
                not,
            } => Ok(format!(
                "{} {}BETWEEN {} AND {}",
                expression.render(context)?,
                not_keyword(*not),
                lower.render(context)?,
                upper.render(context)?
            )),
            Self::Like {
                expression,
                pattern,
                not,
            } => Ok(format!(
                "{} {}LIKE {}",
                expression.render(context)?,
                not_keyword(*not),
                string_literal(pattern)
            )),
            Self::Null { expression, not } => Ok(format!(
                "{} IS {}NULL",
                expression.render(context)?,
                not_keyword(*not)
            )),
            Self::In {
                expression,
                values,
                not,
            } => Ok(format!(
                "{} {}IN {}",
                expression.render(context)?,
                not_keyword(*not),
                values.render(context)?
            )),
            Self::Exists(query) => Ok(format!("EXISTS ({})", query.render(&context.indent())?)),
            Self::Not(inner) => Ok(format!("NOT {}", inner.render(context)?)),
            Self::Group(group) => group.render(context),
        }
    }
}

impl Render for FilterGroup {
    /// Joins the entries with their conjunctions. Nested groups that would
    /// render nothing are skipped, as is the first remaining conjunction.
    fn render(&self, context: &RenderContext<'_>) -> Result<String> {
        let mut text = String::new();
        for (conjunction, filter) in self.entries() {
            if let Filter::Group(group) = filter {
                if !group.has_filters() {
                    continue;
                }
            }
            if !text.is_empty() {
                text.push(' ');
                text.push_str(conjunction.as_str());
                text.push(' ');
            }
            text.push_str(&filter.render(context)?);
        }
        if self.wrap_in_parentheses && !text.is_empty() {
            Ok(format!("({text})"))
        } else {
            Ok(text)
        }
    }
}
