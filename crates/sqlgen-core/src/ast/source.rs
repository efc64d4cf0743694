//! Column sources: tables, subqueries and functions, stored in an arena.

use crate::error::{Error, Result};
use crate::render::identifier;

use super::expression::Function;
use super::statement::Query;

/// Handle to an [`AliasedSource`] inside a [`SourceArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(usize);

impl SourceId {
    /// Position of the source in its arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Schema or database qualifiers in front of a name (`db.dbo.` in
/// `db.dbo.employee`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    qualifiers: Vec<String>,
}

impl Namespace {
    /// Creates an empty namespace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a namespace from its qualifiers, outermost first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if a qualifier is blank.
    pub fn from_qualifiers<I, S>(qualifiers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut namespace = Self::new();
        for qualifier in qualifiers {
            namespace.add_qualifier(qualifier)?;
        }
        Ok(namespace)
    }

    /// Appends an inner qualifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the qualifier is blank.
    pub fn add_qualifier(&mut self, qualifier: impl Into<String>) -> Result<()> {
        let qualifier = qualifier.into();
        if qualifier.trim().is_empty() {
            return Err(Error::invalid_argument(
                "qualifier",
                "a namespace qualifier cannot be blank",
            ));
        }
        self.qualifiers.push(qualifier);
        Ok(())
    }

    /// The qualifiers, outermost first.
    #[must_use]
    pub fn qualifiers(&self) -> &[String] {
        &self.qualifiers
    }

    /// Returns true if there are no qualifiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.qualifiers.is_empty()
    }

    /// Prefixes `name` with the qualifiers, joined by dots. Every part is
    /// written as an SQL identifier, quoted when it would not read back as
    /// itself.
    #[must_use]
    pub fn qualify(&self, name: &str) -> String {
        let mut text = String::new();
        for qualifier in &self.qualifiers {
            text.push_str(&identifier(qualifier));
            text.push('.');
        }
        text.push_str(&identifier(name));
        text
    }
}

/// A table or view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    namespace: Option<Namespace>,
    name: String,
}

impl Table {
    /// Creates a table reference.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `name` is blank.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::invalid_argument("name", "a table name cannot be blank"));
        }
        Ok(Self {
            namespace: None,
            name,
        })
    }

    /// Places the table inside `namespace`. An empty namespace is dropped.
    #[must_use]
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = (!namespace.is_empty()).then_some(namespace);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn namespace(&self) -> Option<&Namespace> {
        self.namespace.as_ref()
    }

    /// The name with its namespace, e.g. `dbo.employee`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(namespace) => namespace.qualify(&self.name),
            None => identifier(&self.name).into_owned(),
        }
    }
}

/// Anything that can appear as a join item and provide columns.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// A table or view.
    Table(Table),
    /// A subquery or select combiner.
    Query(Query),
    /// A table-valued function.
    Function(Function),
}

/// A [`Source`] with an optional alias.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasedSource {
    pub source: Source,
    pub alias: Option<String>,
}

impl AliasedSource {
    /// The name a scope knows this source by: its alias, or the bare table or
    /// function name. Unaliased queries have none.
    #[must_use]
    pub fn scope_name(&self) -> Option<&str> {
        if let Some(alias) = &self.alias {
            return Some(alias);
        }
        match &self.source {
            Source::Table(table) => Some(table.name()),
            Source::Function(function) => Some(function.name()),
            Source::Query(_) => None,
        }
    }

    /// The text used to qualify this source's columns, as rendered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnaliasedSource`] for a query without an alias.
    pub fn reference(&self) -> Result<String> {
        if let Some(alias) = &self.alias {
            return Ok(identifier(alias).into_owned());
        }
        match &self.source {
            Source::Table(table) => Ok(table.qualified_name()),
            Source::Function(function) => Ok(function.qualified_name()),
            Source::Query(_) => Err(Error::UnaliasedSource),
        }
    }
}

/// Owns every source of a command. Expressions and joins refer to sources
/// through [`SourceId`] handles, so one source can be shared by a join,
/// its columns and `alias.*` projections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceArena {
    sources: Vec<AliasedSource>,
}

impl SourceArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a source and returns its handle.
    pub fn add(&mut self, source: Source, alias: Option<String>) -> SourceId {
        self.sources.push(AliasedSource { source, alias });
        SourceId(self.sources.len() - 1)
    }

    /// Stores a table without an alias.
    pub fn add_table(&mut self, table: Table) -> SourceId {
        self.add(Source::Table(table), None)
    }

    #[must_use]
    pub fn get(&self, id: SourceId) -> Option<&AliasedSource> {
        self.sources.get(id.0)
    }

    pub fn get_mut(&mut self, id: SourceId) -> Option<&mut AliasedSource> {
        self.sources.get_mut(id.0)
    }

    /// Looks up a source that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for a handle from another arena.
    pub fn source(&self, id: SourceId) -> Result<&AliasedSource> {
        self.get(id).ok_or_else(|| {
            Error::invalid_argument("source", format!("no source with id {}", id.0))
        })
    }

    /// Number of stored sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Iterates over the handles and sources in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (SourceId, &AliasedSource)> {
        self.sources
            .iter()
            .enumerate()
            .map(|(index, source)| (SourceId(index), source))
    }
}
