mod value;
pub(crate) use value::Value;

use mysql_async::{
    prelude::{Queryable, ToValue},
    Conn, Pool,
};
use std::borrow::Cow;
use tabula_core::{
    async_trait,
    driver::{operation::QuerySql, Driver, Operation, Response},
    stmt::ValueRecord,
    Error, Result,
};
use tabula_sql::Dialect;
use url::Url;

#[derive(Debug)]
pub struct MySQL {
    url: String,
    pool: Pool,
}

impl MySQL {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver_operation_failed)?;

        if url.scheme() != "mysql" {
            return Err(Error::invalid_connection_url(format!(
                "connection url does not have a `mysql` scheme; url={url_str}"
            )));
        }

        url.host_str().ok_or_else(|| {
            Error::invalid_connection_url(format!("missing host in connection URL; url={url_str}"))
        })?;

        if url.path().trim_start_matches('/').is_empty() {
            return Err(Error::invalid_connection_url(format!(
                "no database specified - missing path in connection URL; url={url_str}"
            )));
        }

        let opts = mysql_async::Opts::from_url(url.as_ref())
            .map_err(|e| Error::invalid_connection_url(e.to_string()))?;

        let pool = Pool::new(opts);
        Ok(Self { url: url_str, pool })
    }
}

#[async_trait]
impl Driver for MySQL {
    fn driver_name(&self) -> &'static str {
        "mysql"
    }

    fn url(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.url)
    }

    async fn connect(&self) -> Result<Box<dyn tabula_core::driver::Connection>> {
        let conn = self
            .pool
            .get_conn()
            .await
            .map_err(Error::driver_operation_failed)?;
        Ok(Box::new(Connection::new(conn)))
    }
}

#[derive(Debug)]
pub struct Connection {
    conn: Conn,
}

impl Connection {
    pub fn new(conn: Conn) -> Self {
        Self { conn }
    }

    async fn query_sql(&mut self, query: QuerySql) -> Result<Response> {
        let QuerySql { sql, params, ret } = query;

        // Script statements carry no parameters; the text protocol accepts DDL
        // the prepared-statement protocol rejects.
        if ret.is_none() && params.is_empty() {
            let count = self
                .conn
                .query_iter(sql.as_str())
                .await
                .map_err(Error::driver_operation_failed)?
                .affected_rows();
            return Ok(Response::count(count));
        }

        let args = params
            .into_iter()
            .map(|param| Value::from(param).to_value())
            .collect::<Vec<_>>();

        let statement = self
            .conn
            .prep(sql.as_str())
            .await
            .map_err(Error::driver_operation_failed)?;

        let Some(returning) = ret else {
            let count = self
                .conn
                .exec_iter(&statement, mysql_async::Params::Positional(args))
                .await
                .map_err(Error::driver_operation_failed)?
                .affected_rows();
            return Ok(Response::count(count));
        };

        let rows: Vec<mysql_async::Row> = self
            .conn
            .exec(&statement, mysql_async::Params::Positional(args))
            .await
            .map_err(Error::driver_operation_failed)?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let mut fields = Vec::with_capacity(row.len());
            for (i, value) in row.unwrap_raw().into_iter().enumerate() {
                let value = value.unwrap_or(mysql_async::Value::NULL);
                let expected = returning.get(i).copied();
                fields.push(Value::from_sql(value, expected)?.into_inner());
            }
            records.push(ValueRecord::from_vec(fields));
        }

        Ok(Response::values(records))
    }
}

impl From<Conn> for Connection {
    fn from(conn: Conn) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl tabula_core::driver::Connection for Connection {
    async fn exec(&mut self, op: Operation) -> Result<Response> {
        match op {
            Operation::QuerySql(query) => self.query_sql(query).await,
            Operation::Transaction(op) => {
                self.conn
                    .query_drop(Dialect::mysql().transaction(op))
                    .await
                    .map_err(Error::driver_operation_failed)?;
                Ok(Response::count(0))
            }
        }
    }
}
