//! Rendering of expressions, value lists and value providers.

use crate::ast::{
    Arithmetic, Column, Expression, Function, Literal, Projection, ValueList, ValueProvider,
};
use crate::error::{Error, Result};

use super::{identifier, string_literal, Render, RenderContext, StatementKind};

impl Render for Literal {
    fn render(&self, _context: &RenderContext<'_>) -> Result<String> {
        Ok(match self {
            Self::Number(value) => value.to_string(),
            Self::String(value) => string_literal(value),
            Self::Null => String::from("NULL"),
        })
    }
}

impl Render for Column {
    fn render(&self, context: &RenderContext<'_>) -> Result<String> {
        let name = identifier(&self.name);
        match self.source {
            Some(source) if self.qualify && context.statement() != StatementKind::Insert => {
                Ok(format!("{}.{name}", context.source(source)?.reference()?))
            }
            _ => Ok(name.into_owned()),
        }
    }
}

impl Render for Function {
    fn render(&self, context: &RenderContext<'_>) -> Result<String> {
        let single_line = context.with_options(|options| options.one_value_list_item_per_line = false);
        let arguments = self
            .arguments()
            .values()
            .iter()
            .map(|argument| argument.render(&single_line))
            .collect::<Result<Vec<_>>>()?;
        Ok(format!(
            "{}({})",
            self.qualified_name(),
            arguments.join(", ")
        ))
    }
}

impl Render for Arithmetic {
    /// Walks an unwrapped right-nested chain in a loop, so long chains
    /// render without deep recursion.
    fn render(&self, context: &RenderContext<'_>) -> Result<String> {
        let mut text = String::new();
        let mut current = self;
        loop {
            text.push_str(&current.left.render(context)?);
            text.push(' ');
            text.push_str(current.op.as_str());
            text.push(' ');
            match current.right.as_ref() {
                Expression::Arithmetic(next) if !next.wrap_in_parentheses => current = next,
                right => {
                    text.push_str(&right.render(context)?);
                    break;
                }
            }
        }
        if self.wrap_in_parentheses {
            Ok(format!("({text})"))
        } else {
            Ok(text)
        }
    }
}

impl Render for Expression {
    fn render(&self, context: &RenderContext<'_>) -> Result<String> {
        match self {
            Self::Column(column) => column.render(context),
            Self::Literal(literal) => literal.render(context),
            Self::Function(function) => function.render(context),
            Self::Arithmetic(arithmetic) => arithmetic.render(context),
            Self::Negation(inner) => {
                let operand = inner.render(context)?;
                // `--` would start a line comment.
                if operand.starts_with('-') {
                    Ok(format!("-({operand})"))
                } else {
                    Ok(format!("-{operand}"))
                }
            }
            Self::Subquery(query) => Ok(format!("({})", query.render(&context.indent())?)),
            Self::AllColumns(None) => Ok(String::from("*")),
            Self::AllColumns(Some(source)) => Ok(format!("{}.*", context.source(*source)?.reference()?)),
        }
    }
}

impl Render for Projection {
    fn render(&self, context: &RenderContext<'_>) -> Result<String> {
        let item = self.item.render(context)?;
        match &self.alias {
            Some(alias) if !matches!(self.item, Expression::AllColumns(_)) => {
                let keyword = if context.options().alias_columns_using_as {
                    "AS "
                } else {
                    ""
                };
                Ok(format!("{item} {keyword}{}", identifier(alias)))
            }
            _ => Ok(item),
        }
    }
}

impl Render for ValueList {
    fn render(&self, context: &RenderContext<'_>) -> Result<String> {
        if self.is_empty() {
            return Err(Error::EmptyValueList);
        }
        let values = self
            .values()
            .iter()
            .map(|value| value.render(context))
            .collect::<Result<Vec<_>>>()?;
        let options = context.options();
        if options.one_value_list_item_per_line {
            let prefix = if options.indent_value_list_items {
                context.indent().indentation()
            } else {
                context.indentation()
            };
            let lines: Vec<String> = values.iter().map(|value| format!("{prefix}{value}")).collect();
            Ok(format!("(\n{}\n{})", lines.join(",\n"), context.indentation()))
        } else {
            Ok(format!("({})", values.join(", ")))
        }
    }
}

impl Render for ValueProvider {
    fn render(&self, context: &RenderContext<'_>) -> Result<String> {
        match self {
            Self::List(list) => list.render(context),
            Self::Query(query) => Ok(format!("({})", query.render(&context.indent())?)),
            Self::Function(function) => function.render(context),
        }
    }
}
