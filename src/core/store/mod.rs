//! SQLite-backed food-donation store
//!
//! This module owns the storage boundary:
//! - Four whole-table reads (`SELECT * FROM Providers|Receivers|Food|Claims`)
//! - Five parameterized writes (insert/update/delete providers, insert/delete food)
//! - Schema creation for fresh databases (`fwms init`)
//! - Row-by-row CSV import
//!
//! A connection is opened for each unit of work and dropped right after.
//! Referential integrity is enforced by SQLite itself (`PRAGMA foreign_keys`).

mod import;
mod mutations;
mod queries;
mod schema;

pub use import::{ImportRecord, Importer};
pub use schema::TABLES;

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use rusqlite::Connection;
use thiserror::Error;

use crate::core::dataset::Dataset;
use crate::core::session::FoodRepository;
use crate::entities::{NewFoodListing, NewProvider};

/// Errors raised at the storage boundary
#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("database not found at {path:?}")]
    #[diagnostic(
        code(fwms::store::missing),
        help("run `fwms init` to create it, or point --db / FWMS_DB at an existing database")
    )]
    Missing { path: PathBuf },

    #[error("cannot open database {path:?}")]
    #[diagnostic(code(fwms::store::open))]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("I/O error at {path:?}")]
    #[diagnostic(code(fwms::store::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("database has no {table} table")]
    #[diagnostic(
        code(fwms::store::not_initialized),
        help("run `fwms init` to create the tables")
    )]
    NotInitialized { table: &'static str },

    #[error("failed to read table {table}")]
    #[diagnostic(code(fwms::store::read))]
    Read {
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("write failed: {operation}")]
    #[diagnostic(
        code(fwms::store::write_failed),
        help("the database rejected the statement; nothing was changed")
    )]
    WriteFailed {
        operation: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to create schema")]
    #[diagnostic(code(fwms::store::schema))]
    Schema(#[source] rusqlite::Error),
}

#[cfg(test)]
impl StoreError {
    /// True if this is a rejected mutation rather than an I/O or read problem
    pub fn is_write_failure(&self) -> bool {
        matches!(self, StoreError::WriteFailed { .. })
    }
}

/// A stored value that could not be converted to its entity field
#[derive(Debug, Error)]
#[error("unparseable {kind} value {value:?}")]
pub(crate) struct InvalidValue {
    kind: &'static str,
    value: String,
}

/// Handle to a SQLite database file
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Open an existing database
    ///
    /// Only checks that the file exists; tables are checked on first load.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(StoreError::Missing { path });
        }
        Ok(Self { path })
    }

    /// Create the database file (if needed) and its four tables
    ///
    /// With `force`, existing tables are dropped first.
    pub fn create(path: impl AsRef<Path>, force: bool) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let store = Self { path };
        let conn = store.connect()?;
        if force {
            schema::drop_schema(&conn)?;
        }
        schema::init_schema(&conn)?;
        log::info!("initialized schema in {}", store.path.display());
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a connection for one unit of work
    fn connect(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(&self.path).map_err(|source| StoreError::Open {
            path: self.path.clone(),
            source,
        })?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|source| StoreError::Open {
                path: self.path.clone(),
                source,
            })?;
        log::trace!("opened connection to {}", self.path.display());
        Ok(conn)
    }

    /// Row counts per table, in load order
    pub fn table_counts(&self) -> Result<Vec<(&'static str, usize)>, StoreError> {
        let conn = self.connect()?;
        schema::ensure_tables(&conn)?;
        TABLES
            .iter()
            .map(|&table| {
                conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                    row.get::<_, i64>(0)
                })
                .map(|n| (table, n as usize))
                .map_err(|source| StoreError::Read { table, source })
            })
            .collect()
    }
}

impl FoodRepository for SqliteStore {
    fn load(&self) -> Result<Dataset, StoreError> {
        let conn = self.connect()?;
        schema::ensure_tables(&conn)?;
        let dataset = Dataset {
            providers: queries::load_providers(&conn)?,
            receivers: queries::load_receivers(&conn)?,
            food: queries::load_food(&conn)?,
            claims: queries::load_claims(&conn)?,
        };
        log::debug!(
            "loaded {} providers, {} receivers, {} food listings, {} claims",
            dataset.providers.len(),
            dataset.receivers.len(),
            dataset.food.len(),
            dataset.claims.len()
        );
        Ok(dataset)
    }

    fn insert_provider(&self, provider: &NewProvider) -> Result<i64, StoreError> {
        mutations::insert_provider(&self.connect()?, provider)
    }

    fn update_provider_contact(&self, provider_id: i64, contact: &str) -> Result<usize, StoreError> {
        mutations::update_provider_contact(&self.connect()?, provider_id, contact)
    }

    fn delete_provider(&self, provider_id: i64) -> Result<usize, StoreError> {
        mutations::delete_provider(&self.connect()?, provider_id)
    }

    fn insert_food(&self, food: &NewFoodListing) -> Result<i64, StoreError> {
        mutations::insert_food(&self.connect()?, food)
    }

    fn delete_food(&self, food_id: i64) -> Result<usize, StoreError> {
        mutations::delete_food(&self.connect()?, food_id)
    }
}
