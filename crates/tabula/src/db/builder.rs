use super::{Connect, Db, Pool, PoolConfig, Shared};
use crate::{migrate::VersionManifest, Result};

use tabula_core::{Driver, Error};
use tabula_sql::Dialect;

use std::sync::Arc;

use url::Url;

#[derive(Debug, Default)]
pub struct Builder {
    /// Schema used when a table is not given one explicitly
    default_schema: Option<String>,

    /// Database name override for introspection queries
    database: Option<String>,

    manifest: Option<VersionManifest>,

    pool: PoolConfig,
}

impl Builder {
    /// Set the schema tables live in unless one is given explicitly.
    ///
    /// Takes precedence over the manifest's `default_schema`.
    pub fn default_schema(&mut self, schema: impl Into<String>) -> &mut Self {
        self.default_schema = Some(schema.into());
        self
    }

    /// Set the database name used by introspection queries. Defaults to the
    /// path of the connection URL.
    pub fn database(&mut self, database: impl Into<String>) -> &mut Self {
        self.database = Some(database.into());
        self
    }

    /// Attach a schema-version manifest. Its default schema is used unless
    /// [`Builder::default_schema`] is also called.
    pub fn manifest(&mut self, manifest: VersionManifest) -> &mut Self {
        self.manifest = Some(manifest);
        self
    }

    pub fn pool_config(&mut self, config: PoolConfig) -> &mut Self {
        self.pool = config;
        self
    }

    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        self.build(Connect::new(url)?).await
    }

    pub async fn build(&mut self, driver: impl Driver) -> Result<Db> {
        let dialect = Dialect::from_driver_name(driver.driver_name())?;

        let default_schema = self
            .default_schema
            .clone()
            .or_else(|| self.manifest.as_ref().map(|m| m.default_schema.clone()))
            .ok_or_else(|| {
                Error::configuration(
                    "no default schema; set one on the builder or attach a version manifest",
                )
            })?;

        let database = match &self.database {
            Some(database) => database.clone(),
            None => database_from_url(&driver.url()),
        };

        tracing::debug!(
            driver = driver.driver_name(),
            default_schema = %default_schema,
            database = %database,
            "building database handle"
        );

        let pool = Pool::new(driver, self.pool.clone()).await?;

        Ok(Db {
            shared: Arc::new(Shared {
                pool,
                dialect,
                default_schema,
                database,
                manifest: self.manifest.clone(),
            }),
        })
    }
}

/// The last path segment of a connection URL, or the empty string.
fn database_from_url(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|url| {
            url.path()
                .rsplit('/')
                .find(|segment| !segment.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_default()
}
