//! Library half of the `sqlgen` command-line tool.
//!
//! Loads format options, applies flag overrides and runs the parser and
//! renderer of `sqlgen-core`.

use std::path::{Path, PathBuf};

use serde::Serialize;
use sqlgen_core::{Command, FormatOptions};
use tracing::debug;

/// Errors reported by the command-line tool.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Reading input or an options file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An options file is not valid JSON for [`FormatOptions`].
    #[error("Invalid options file '{path}': {source}")]
    Options {
        /// Path of the options file.
        path: PathBuf,
        /// The JSON error.
        source: serde_json::Error,
    },

    /// Encoding a report failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parsing or rendering failed.
    #[error(transparent)]
    Sql(#[from] sqlgen_core::Error),
}

/// Result type for command-line operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Flag overrides applied on top of the loaded options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Overrides {
    /// Start from the pretty preset instead of the default style.
    pub pretty: bool,
    pub clause_per_line: bool,
    pub verbose_joins: bool,
    pub use_as: bool,
    pub indent: Option<usize>,
}

impl Overrides {
    /// Turns on every option named by a flag. Flags never turn an option
    /// off.
    pub fn apply(&self, options: &mut FormatOptions) {
        if self.clause_per_line {
            options.one_clause_per_line = true;
        }
        if self.verbose_joins {
            options.verbose_inner_join = true;
            options.verbose_outer_join = true;
        }
        if self.use_as {
            options.alias_columns_using_as = true;
            options.alias_join_items_using_as = true;
        }
        if let Some(indent) = self.indent {
            options.indent_step = indent;
        }
    }
}

/// Reads [`FormatOptions`] from a JSON file. Missing fields keep their
/// defaults.
///
/// # Errors
///
/// Returns [`CliError::Io`] if the file cannot be read and
/// [`CliError::Options`] if it is not valid.
pub fn load_options(path: &Path) -> Result<FormatOptions> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|source| CliError::Options {
        path: path.to_path_buf(),
        source,
    })
}

/// The options for a run: the file (or a preset) with the flags applied.
///
/// # Errors
///
/// See [`load_options`].
pub fn resolve_options(path: Option<&Path>, overrides: &Overrides) -> Result<FormatOptions> {
    let mut options = match path {
        Some(path) => load_options(path)?,
        None if overrides.pretty => FormatOptions::pretty(),
        None => FormatOptions::default(),
    };
    overrides.apply(&mut options);
    debug!(?options, "resolved format options");
    Ok(options)
}

/// Parses `sql` and renders it again with `options`.
///
/// # Errors
///
/// Returns [`CliError::Sql`] if parsing or rendering fails.
pub fn format_sql(sql: &str, options: &FormatOptions) -> Result<String> {
    let command = sqlgen_core::parse(sql)?;
    Ok(sqlgen_core::render(&command, options)?)
}

/// What `check` reports for a statement that parses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// The statement keyword.
    pub statement: String,
    /// Number of sources the statement declares, subqueries included.
    pub sources: usize,
    /// Number of queries combined at the top level; 1 for a plain SELECT.
    pub queries: usize,
}

impl CheckReport {
    fn of(command: &Command) -> Self {
        let queries = match command.query() {
            Some(sqlgen_core::ast::Query::Combined(combiner)) => combiner.queries.len(),
            _ => 1,
        };
        Self {
            statement: command.statement.kind().to_string(),
            sources: command.sources.len(),
            queries,
        }
    }

    /// JSON form of the report.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Json`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Parses `sql` without rendering it.
///
/// # Errors
///
/// Returns [`CliError::Sql`] with the syntax error if parsing fails.
pub fn check_sql(sql: &str) -> Result<CheckReport> {
    let command = sqlgen_core::parse(sql)?;
    Ok(CheckReport::of(&command))
}
