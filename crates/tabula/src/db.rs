mod builder;
mod connect;
mod introspect;
mod pool;

pub use builder::Builder;
pub use connect::Connect;
pub use introspect::ColumnInfo;
pub use pool::*;

use crate::{migrate::VersionManifest, Query, Record, Result, Table};

use tabula_sql::{Dialect, Placeholder};

use std::{path::Path, sync::Arc};

/// Shared state between all `Db` clones.
pub(crate) struct Shared {
    pub(crate) pool: Pool,
    pub(crate) dialect: Dialect,
    pub(crate) default_schema: String,
    pub(crate) database: String,
    pub(crate) manifest: Option<VersionManifest>,
}

/// A database handle.
///
/// Cloning is cheap; all clones share one connection pool. Each operation
/// checks out a single connection for its whole duration and returns it to
/// the pool when done.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Connects using the driver selected by the URL scheme.
    ///
    /// Fails unless a default schema can be determined, so most callers go
    /// through [`Db::builder`].
    pub async fn connect(url: &str) -> Result<Db> {
        Builder::default().connect(url).await
    }

    pub fn dialect(&self) -> Dialect {
        self.shared.dialect
    }

    /// Name of the driver, as used in migration script file names.
    pub fn driver_name(&self) -> &'static str {
        self.shared.pool.driver_name()
    }

    /// Connection URL of the underlying driver.
    pub fn url(&self) -> String {
        self.shared.pool.url()
    }

    /// Schema used by [`Db::table`] and the forwarding CRUD methods.
    pub fn default_schema(&self) -> &str {
        &self.shared.default_schema
    }

    /// Database name, taken from the connection URL unless set explicitly.
    pub fn database(&self) -> &str {
        &self.shared.database
    }

    /// The version manifest the handle was built with, if any.
    pub fn manifest(&self) -> Option<&VersionManifest> {
        self.shared.manifest.as_ref()
    }

    /// Placeholder for the `ordinal`-th bound argument (1-based) in the active
    /// dialect. Use it to build WHERE clauses for [`Query`].
    pub fn p(&self, ordinal: usize) -> Placeholder {
        self.shared.dialect.p(ordinal)
    }

    /// Table access in the default schema.
    pub fn table(&self) -> Table<'_> {
        Table::new(self, &self.shared.default_schema)
    }

    /// Table access in an explicit schema.
    pub fn table_in<'a>(&'a self, schema: &'a str) -> Table<'a> {
        Table::new(self, schema)
    }

    /// Checks out a connection from the pool.
    pub async fn connection(&self) -> Result<PoolConnection> {
        self.shared.pool.get().await
    }

    pub async fn insert<R: Record>(&self, record: &mut R) -> Result<()> {
        self.table().insert(record).await
    }

    pub async fn insert_without_auto_id<R: Record>(&self, record: &R) -> Result<()> {
        self.table().insert_without_auto_id(record).await
    }

    pub async fn insert_batch<R: Record>(&self, records: &mut [R]) -> Result<()> {
        self.table().insert_batch(records).await
    }

    pub async fn update<R: Record>(&self, record: &R) -> Result<u64> {
        self.table().update(record).await
    }

    pub async fn delete<R: Record>(&self, record: &R) -> Result<u64> {
        self.table().delete(record).await
    }

    pub async fn delete_where<R: Record>(&self, predicate: &str) -> Result<u64> {
        self.table().delete_where::<R>(predicate).await
    }

    pub async fn fetch<R: Record>(&self, record: &mut R) -> Result<()> {
        self.table().fetch(record).await
    }

    pub async fn fetch_all<R: Record + Default>(&self, query: &Query) -> Result<Vec<R>> {
        self.table().fetch_all(query).await
    }

    /// Runs a SQL script file in one transaction.
    ///
    /// See [`crate::migrate::run_script`].
    pub async fn run_script(&self, path: impl AsRef<Path>) -> Result<()> {
        crate::migrate::run_script(self, path).await
    }
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("driver", &self.driver_name())
            .field("default_schema", &self.shared.default_schema)
            .field("database", &self.shared.database)
            .finish()
    }
}
