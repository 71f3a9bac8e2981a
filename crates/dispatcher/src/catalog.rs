// Standard Library Imports
use std::{
    collections::{BTreeMap, btree_map::Entry},
    fs::{self, File},
    io::{self, BufReader},
    path::{Path, PathBuf},
};

// External Crate Imports
use chrono::TimeDelta;
use knuffel::{
    Decode,
    span::{Span, Spanned},
};
use miette::{Diagnostic, NamedSource, Result};
use proteome::{FastaReader, ProteomeError};
use thiserror::Error;
use tracing::debug;

// Local Crate Imports
use crate::{DatabaseCatalog, ReferenceLibrary};

// Public API ==========================================================================================================

pub const DEFAULT_KDL: &str = include_str!("../data/databases.kdl");

impl DatabaseCatalog {
    /// Reads a catalog file, resolving any relative database paths against the directory containing the catalog
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CatalogReadError {
            path: path.to_owned(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));

        Self::from_kdl(base_dir, path.display().to_string(), text)
    }

    /// The bundled catalog of reference databases, which are expected to live in `base_dir`
    pub fn bundled(base_dir: impl AsRef<Path>) -> Self {
        // SAFETY: The bundled catalog is checked by the tests below, so parsing it can't fail
        Self::from_kdl(base_dir, "databases.kdl", DEFAULT_KDL).unwrap()
    }

    pub fn from_kdl(
        base_dir: impl AsRef<Path>,
        file_name: impl AsRef<str>,
        text: impl AsRef<str>,
    ) -> Result<Self> {
        let parsed: CatalogKdl = knuffel::parse(file_name.as_ref(), text.as_ref())?;

        let mut databases = BTreeMap::new();
        let mut first_spans = BTreeMap::new();
        for DatabaseKdl { name, path } in parsed.databases {
            let span = *name.span();
            let name = String::clone(&name);
            match first_spans.entry(name.clone()) {
                Entry::Occupied(e) => {
                    return Err(DuplicateDatabaseError {
                        kdl: NamedSource::new(file_name, text.as_ref().to_owned()),
                        first: *e.get(),
                        second: span,
                        name,
                    }
                    .into());
                }
                Entry::Vacant(e) => e.insert(span),
            };
            databases.insert(name, base_dir.as_ref().join(path));
        }

        let stale_after = parsed.stale_after.map(|secs| TimeDelta::seconds(i64::from(secs)));
        Ok(Self {
            stale_after,
            databases,
        })
    }

    /// How long a search may stay running before it should be considered abandoned
    #[must_use]
    pub const fn stale_after(&self) -> Option<TimeDelta> {
        self.stale_after
    }

    /// Resolves a database name to the path of its FASTA file
    #[must_use]
    pub fn path(&self, database: &str) -> Option<&Path> {
        self.databases.get(database).map(PathBuf::as_path)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.databases.keys().map(String::as_str)
    }
}

impl ReferenceLibrary for DatabaseCatalog {
    type Reader = BufReader<File>;

    fn contains(&self, database: &str) -> bool {
        self.databases.contains_key(database)
    }

    fn open(&self, database: &str) -> Result<Option<FastaReader<Self::Reader>>, ProteomeError> {
        let Some(path) = self.path(database) else {
            return Ok(None);
        };

        debug!(database, path = %path.display(), "opening reference database");
        FastaReader::open(path).map(Some)
    }
}

// KDL File Schema =====================================================================================================

#[derive(Debug, Decode)]
#[knuffel(span_type=Span)]
struct CatalogKdl {
    #[knuffel(child, unwrap(argument))]
    stale_after: Option<u32>,
    #[knuffel(children(name = "database"))]
    databases: Vec<DatabaseKdl>,
}

#[derive(Debug, Decode)]
#[knuffel(span_type=Span)]
struct DatabaseKdl {
    #[knuffel(argument)]
    name: Spanned<String, Span>,
    #[knuffel(property(name = "path"))]
    path: String,
}

// Catalog Errors ======================================================================================================

#[derive(Debug, Diagnostic, Error)]
#[diagnostic(help("check that the catalog file exists and is readable"))]
#[error("failed to read the database catalog at {path:?}")]
struct CatalogReadError {
    path: PathBuf,
    #[source]
    source: io::Error,
}

#[derive(Debug, Diagnostic, Error)]
#[diagnostic(help("each database name may only be listed once"))]
#[error("the database {name:?} was listed more than once")]
struct DuplicateDatabaseError {
    #[source_code]
    kdl: NamedSource<String>,
    #[label("first listed here")]
    first: Span,
    #[label("then again here")]
    second: Span,
    name: String,
}

// Module Tests ========================================================================================================
