mod value;
pub(crate) use value::Value;

use rusqlite::Connection as RusqliteConnection;
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use tabula_core::{
    async_trait,
    driver::{operation::QuerySql, Driver, Operation, Response},
    stmt, Error, Result,
};
use tabula_sql::Dialect;
use url::Url;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver_operation_failed)?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

#[async_trait]
impl Driver for Sqlite {
    fn driver_name(&self) -> &'static str {
        "sqlite"
    }

    fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    async fn connect(&self) -> Result<Box<dyn tabula_core::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory()?,
        };
        Ok(Box::new(connection))
    }

    fn max_connections(&self) -> Option<usize> {
        // Every in-memory connection is a separate database.
        matches!(self, Self::InMemory).then_some(1)
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection =
            RusqliteConnection::open_in_memory().map_err(Error::driver_operation_failed)?;
        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver_operation_failed)?;
        Ok(Self { connection })
    }

    fn query_sql(&mut self, query: QuerySql) -> Result<Response> {
        let mut stmt = self
            .connection
            .prepare_cached(&query.sql)
            .map_err(Error::driver_operation_failed)?;

        let params = query.params.into_iter().map(Value::from).collect::<Vec<_>>();

        let Some(ret_tys) = query.ret else {
            let count = stmt
                .execute(rusqlite::params_from_iter(params.iter()))
                .map_err(Error::driver_operation_failed)?;

            return Ok(Response::count(count as _));
        };

        let width = stmt.column_count();
        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(Error::driver_operation_failed)?;

        let mut ret = vec![];

        while let Some(row) = rows.next().map_err(Error::driver_operation_failed)? {
            let mut items = Vec::with_capacity(width);

            for index in 0..width {
                let ty = ret_tys.get(index).copied().unwrap_or(stmt::Type::Null);
                items.push(Value::from_sql(row, index, ty)?.into_inner());
            }

            ret.push(stmt::ValueRecord::from_vec(items));
        }

        Ok(Response::values(ret))
    }
}

#[async_trait]
impl tabula_core::driver::Connection for Connection {
    async fn exec(&mut self, op: Operation) -> Result<Response> {
        match op {
            Operation::QuerySql(query) => self.query_sql(query),
            Operation::Transaction(op) => {
                self.connection
                    .execute(Dialect::sqlite().transaction(op), [])
                    .map_err(Error::driver_operation_failed)?;
                Ok(Response::count(0))
            }
        }
    }
}
