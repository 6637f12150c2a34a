//! Connection pooling for database connections.

use std::ops::{Deref, DerefMut};

pub use deadpool::managed::Timeouts;
use tabula_core::{driver::Driver, Connection, Error};

use crate::db::Connect;

/// Get the default maximum size of a pool, which is `cpu_core_count * 2`
/// including logical cores (Hyper-Threading).
fn get_default_pool_max_size() -> usize {
    deadpool::managed::PoolConfig::default().max_size
}

/// Configuration for connection pool behavior.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_size: usize,
    pub timeouts: Timeouts,
}

impl PoolConfig {
    /// Creates a new pool configuration with default settings.
    pub fn new() -> Self {
        Self {
            max_size: get_default_pool_max_size(),
            timeouts: Default::default(),
        }
    }

    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A connection pool that manages database connections.
#[derive(Debug)]
pub struct Pool {
    inner: deadpool::managed::Pool<Manager>,
    driver_name: &'static str,
}

impl Pool {
    /// Creates a new connection pool from the given driver.
    ///
    /// One connection is opened eagerly so that an unreachable database is
    /// reported here rather than on first use.
    pub async fn new(driver: impl Driver, config: PoolConfig) -> crate::Result<Self> {
        let driver_name = driver.driver_name();
        let max_size = match driver.max_connections() {
            Some(max_connections) => config.max_size.min(max_connections),
            None => config.max_size,
        };

        let inner = deadpool::managed::Pool::builder(Manager {
            driver: Box::new(driver),
        })
        .runtime(deadpool::Runtime::Tokio1)
        .max_size(max_size.max(1))
        .timeouts(config.timeouts)
        .build()
        .map_err(Error::connection_pool)?;

        drop(inner.get().await.map_err(Error::connection_pool)?);

        Ok(Self { inner, driver_name })
    }

    /// Creates a new connection pool from a connection URL.
    pub async fn connect(url: &str) -> crate::Result<Self> {
        Self::new(Connect::new(url)?, PoolConfig::default()).await
    }

    /// Retrieves a connection from the pool.
    pub async fn get(&self) -> crate::Result<PoolConnection> {
        let connection = self.inner.get().await.map_err(Error::connection_pool)?;
        Ok(PoolConnection { inner: connection })
    }

    /// Name of the underlying driver.
    pub fn driver_name(&self) -> &'static str {
        self.driver_name
    }

    /// Connection URL of the underlying driver.
    pub fn url(&self) -> String {
        self.inner.manager().driver.url().into_owned()
    }
}

#[derive(Debug)]
struct Manager {
    driver: Box<dyn Driver>,
}

impl deadpool::managed::Manager for Manager {
    type Type = Box<dyn Connection>;
    type Error = crate::Error;

    async fn create(&self) -> Result<Self::Type, Self::Error> {
        self.driver.connect().await
    }

    async fn recycle(
        &self,
        _obj: &mut Self::Type,
        _metrics: &deadpool::managed::Metrics,
    ) -> deadpool::managed::RecycleResult<Self::Error> {
        Ok(())
    }
}

/// A connection retrieved from a pool.
///
/// When dropped, the connection is returned to the pool for reuse.
pub struct PoolConnection {
    inner: deadpool::managed::Object<Manager>,
}

impl Deref for PoolConnection {
    type Target = Box<dyn Connection>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for PoolConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
