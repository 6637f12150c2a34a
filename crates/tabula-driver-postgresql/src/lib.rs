mod value;
pub(crate) use value::Value;

use std::borrow::Cow;
use tabula_core::{
    driver::{operation::QuerySql, Operation, Response},
    stmt::{self, ValueRecord},
    Driver, Error, Result,
};
use tabula_sql::Dialect;
use tokio_postgres::{
    tls::MakeTlsConnect,
    types::{ToSql, Type},
    Client, Column, Config, Row, Socket,
};
use url::Url;

/// PostgreSQL driver.
///
/// Holds the parsed connection configuration; every call to
/// [`Driver::connect`] opens a new session.
#[derive(Debug)]
pub struct PostgreSQL {
    url: String,
    config: Config,
}

impl PostgreSQL {
    /// Creates a driver from a `postgresql://` (or `postgres://`) URL.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver_operation_failed)?;

        if !matches!(url.scheme(), "postgresql" | "postgres") {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `postgresql` scheme; url={url_str}"
            )));
        }

        let host = url.host_str().ok_or_else(|| {
            Error::invalid_connection_url(format!("missing host in connection URL; url={url_str}"))
        })?;

        let dbname = url.path().trim_start_matches('/');
        if dbname.is_empty() {
            return Err(Error::invalid_connection_url(format!(
                "no database specified - missing path in connection URL; url={url_str}"
            )));
        }

        let mut config = Config::new();
        config.host(host);
        config.dbname(dbname);

        if let Some(port) = url.port() {
            config.port(port);
        }

        if !url.username().is_empty() {
            config.user(url.username());
        }

        if let Some(password) = url.password() {
            config.password(password);
        }

        Ok(Self {
            url: url_str,
            config,
        })
    }
}

#[tabula_core::async_trait]
impl Driver for PostgreSQL {
    fn driver_name(&self) -> &'static str {
        "postgres"
    }

    fn url(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.url)
    }

    async fn connect(&self) -> Result<Box<dyn tabula_core::Connection>> {
        let connection = Connection::connect_with_config(&self.config, tokio_postgres::NoTls).await?;
        Ok(Box::new(connection))
    }
}

#[derive(Debug)]
pub struct Connection {
    client: Client,
}

impl Connection {
    /// Wraps an already connected client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Opens a session using a [`tokio_postgres::Config`].
    pub async fn connect_with_config<T>(config: &Config, tls: T) -> Result<Self>
    where
        T: MakeTlsConnect<Socket> + 'static,
        T::Stream: Send,
    {
        let (client, connection) = config
            .connect(tls)
            .await
            .map_err(Error::driver_operation_failed)?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::warn!(error = %e, "postgresql connection error");
            }
        });

        Ok(Self::new(client))
    }

    async fn query_sql(&mut self, query: QuerySql) -> Result<Response> {
        let params = query.params.into_iter().map(Value::from).collect::<Vec<_>>();
        let args = params
            .iter()
            .map(|param| param as &(dyn ToSql + Sync))
            .collect::<Vec<_>>();

        let Some(ret_tys) = query.ret else {
            let count = self
                .client
                .execute(&query.sql, &args)
                .await
                .map_err(Error::driver_operation_failed)?;
            return Ok(Response::count(count));
        };

        let rows = self
            .client
            .query(&query.sql, &args)
            .await
            .map_err(Error::driver_operation_failed)?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut fields = Vec::with_capacity(row.len());
            for (i, column) in row.columns().iter().enumerate() {
                let expected = ret_tys.get(i).copied().unwrap_or(stmt::Type::Null);
                fields.push(postgres_to_tabula(i, row, column, expected)?);
            }
            records.push(ValueRecord::from_vec(fields));
        }

        Ok(Response::values(records))
    }
}

impl From<Client> for Connection {
    fn from(client: Client) -> Self {
        Self { client }
    }
}

#[tabula_core::async_trait]
impl tabula_core::driver::Connection for Connection {
    async fn exec(&mut self, op: Operation) -> Result<Response> {
        match op {
            Operation::QuerySql(query) => self.query_sql(query).await,
            Operation::Transaction(op) => {
                self.client
                    .batch_execute(Dialect::postgresql().transaction(op))
                    .await
                    .map_err(Error::driver_operation_failed)?;
                Ok(Response::count(0))
            }
        }
    }
}

/// Converts a PostgreSQL value within a row to a [`tabula_core::stmt::Value`].
fn postgres_to_tabula(
    index: usize,
    row: &Row,
    column: &Column,
    expected_ty: stmt::Type,
) -> Result<stmt::Value> {
    fn get<'a, T>(row: &'a Row, index: usize) -> Result<Option<T>>
    where
        T: tokio_postgres::types::FromSql<'a>,
    {
        row.try_get::<usize, Option<T>>(index)
            .map_err(Error::driver_operation_failed)
    }

    // NOTE: the inner representation of the PostgreSQL type enum is not
    // accessible, so each type is matched by hand.
    let ty = column.type_();
    let value = if *ty == Type::TEXT
        || *ty == Type::VARCHAR
        || *ty == Type::BPCHAR
        || *ty == Type::NAME
    {
        get::<String>(row, index)?.map(stmt::Value::String)
    } else if *ty == Type::BOOL {
        get::<bool>(row, index)?.map(stmt::Value::Bool)
    } else if *ty == Type::INT2 {
        get::<i16>(row, index)?.map(|v| stmt::Value::I32(v as i32))
    } else if *ty == Type::INT4 {
        get::<i32>(row, index)?.map(|v| match expected_ty {
            stmt::Type::I64 => stmt::Value::I64(v as i64),
            _ => stmt::Value::I32(v),
        })
    } else if *ty == Type::INT8 {
        get::<i64>(row, index)?.map(stmt::Value::I64)
    } else if *ty == Type::FLOAT4 {
        get::<f32>(row, index)?.map(|v| stmt::Value::F64(v as f64))
    } else if *ty == Type::FLOAT8 {
        get::<f64>(row, index)?.map(stmt::Value::F64)
    } else if *ty == Type::BYTEA {
        get::<Vec<u8>>(row, index)?.map(stmt::Value::Bytes)
    } else if *ty == Type::TIMESTAMPTZ {
        get::<chrono::DateTime<chrono::Utc>>(row, index)?.map(stmt::Value::ChronoDateTimeUtc)
    } else if *ty == Type::TIMESTAMP {
        get::<chrono::NaiveDateTime>(row, index)?.map(|v| match expected_ty {
            stmt::Type::ChronoDateTimeUtc => stmt::Value::ChronoDateTimeUtc(v.and_utc()),
            _ => stmt::Value::ChronoNaiveDateTime(v),
        })
    } else if *ty == Type::DATE {
        get::<chrono::NaiveDate>(row, index)?.map(stmt::Value::ChronoNaiveDate)
    } else {
        return Err(Error::driver_operation_failed(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!(
                "unsupported PostgreSQL column type `{}` for column `{}`",
                ty,
                column.name()
            ),
        )));
    };

    Ok(value.unwrap_or(stmt::Value::Null))
}
