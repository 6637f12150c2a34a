use crate::Result;

use tabula_core::{async_trait, Connection, Driver, Error};

use std::borrow::Cow;

use url::Url;

/// A driver selected from a connection URL's scheme.
///
/// `postgresql://` (or `postgres://`), `mysql://` and `sqlite:` URLs are
/// recognized. Each backend is only available when its crate feature is
/// enabled.
#[derive(Debug)]
pub struct Connect {
    driver: Box<dyn Driver>,
}

impl Connect {
    pub fn new(url: &str) -> Result<Self> {
        let parsed = Url::parse(url)
            .map_err(|err| Error::invalid_connection_url(format!("{url}: {err}")))?;

        let driver = match parsed.scheme() {
            "postgresql" | "postgres" => connect_postgresql(url)?,
            "mysql" => connect_mysql(url)?,
            "sqlite" => connect_sqlite(url)?,
            scheme => {
                return Err(Error::invalid_connection_url(format!(
                    "unsupported database; scheme={scheme}"
                )))
            }
        };

        Ok(Self { driver })
    }
}

#[async_trait]
impl Driver for Connect {
    fn driver_name(&self) -> &'static str {
        self.driver.driver_name()
    }

    fn url(&self) -> Cow<'_, str> {
        self.driver.url()
    }

    async fn connect(&self) -> Result<Box<dyn Connection>> {
        self.driver.connect().await
    }

    fn max_connections(&self) -> Option<usize> {
        self.driver.max_connections()
    }
}

#[cfg(feature = "postgresql")]
fn connect_postgresql(url: &str) -> Result<Box<dyn Driver>> {
    Ok(Box::new(tabula_driver_postgresql::PostgreSQL::new(url)?))
}

#[cfg(not(feature = "postgresql"))]
fn connect_postgresql(_url: &str) -> Result<Box<dyn Driver>> {
    Err(Error::configuration("`postgresql` feature not enabled"))
}

#[cfg(feature = "mysql")]
fn connect_mysql(url: &str) -> Result<Box<dyn Driver>> {
    Ok(Box::new(tabula_driver_mysql::MySQL::new(url)?))
}

#[cfg(not(feature = "mysql"))]
fn connect_mysql(_url: &str) -> Result<Box<dyn Driver>> {
    Err(Error::configuration("`mysql` feature not enabled"))
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(url: &str) -> Result<Box<dyn Driver>> {
    Ok(Box::new(tabula_driver_sqlite::Sqlite::new(url)?))
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(_url: &str) -> Result<Box<dyn Driver>> {
    Err(Error::configuration("`sqlite` feature not enabled"))
}
