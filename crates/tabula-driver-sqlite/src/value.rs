use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rusqlite::{
    types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef},
    Row,
};
use tabula_core::{
    stmt::{self, Value as CoreValue},
    Error, Result,
};

/// Text layout of timestamps. Fixed-width, so text order is time order.
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Converts this SQLite driver value into the core Tabula value.
    pub fn into_inner(self) -> CoreValue {
        self.0
    }

    /// Converts a SQLite value within a row to a Tabula value.
    ///
    /// SQLite column affinity is loose, so the expected type decides how an
    /// integer or a text value is interpreted.
    pub fn from_sql(row: &Row, index: usize, ty: stmt::Type) -> Result<Self> {
        let value: SqlValue = row.get(index).map_err(Error::driver_operation_failed)?;

        let core_value = match value {
            SqlValue::Null => stmt::Value::Null,
            SqlValue::Integer(value) => match ty {
                stmt::Type::Bool => stmt::Value::Bool(value != 0),
                stmt::Type::I32 => match i32::try_from(value) {
                    Ok(value) => stmt::Value::I32(value),
                    Err(_) => return Err(Error::type_conversion(stmt::Value::I64(value), "i32")),
                },
                stmt::Type::F64 => stmt::Value::F64(value as f64),
                _ => stmt::Value::I64(value),
            },
            SqlValue::Real(value) => stmt::Value::F64(value),
            SqlValue::Text(value) => match ty {
                stmt::Type::ChronoDateTimeUtc => {
                    stmt::Value::ChronoDateTimeUtc(parse_datetime(&value)?.and_utc())
                }
                stmt::Type::ChronoNaiveDateTime => {
                    stmt::Value::ChronoNaiveDateTime(parse_datetime(&value)?)
                }
                stmt::Type::ChronoNaiveDate => stmt::Value::ChronoNaiveDate(
                    NaiveDate::parse_from_str(&value, DATE_FORMAT)
                        .map_err(Error::driver_operation_failed)?,
                ),
                stmt::Type::Bytes => stmt::Value::Bytes(value.into_bytes()),
                _ => stmt::Value::String(value),
            },
            SqlValue::Blob(value) => match ty {
                stmt::Type::String => stmt::Value::String(
                    String::from_utf8(value).map_err(Error::driver_operation_failed)?,
                ),
                _ => stmt::Value::Bytes(value),
            },
        };

        Ok(Value(core_value))
    }
}

/// Parses the stored timestamp layout, falling back to RFC 3339 for rows
/// written by other tools.
fn parse_datetime(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| DateTime::parse_from_rfc3339(text).map(|v| v.with_timezone(&Utc).naive_utc()))
        .map_err(Error::driver_operation_failed)
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use stmt::Value;

        match &self.0 {
            Value::Bool(true) => Ok(ToSqlOutput::Owned(SqlValue::Integer(1))),
            Value::Bool(false) => Ok(ToSqlOutput::Owned(SqlValue::Integer(0))),
            Value::I32(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v as i64))),
            Value::I64(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            Value::F64(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v))),
            Value::String(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            Value::Bytes(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Blob(&v[..]))),
            Value::ChronoDateTimeUtc(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(
                v.naive_utc().format(DATETIME_FORMAT).to_string(),
            ))),
            Value::ChronoNaiveDateTime(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(
                v.format(DATETIME_FORMAT).to_string(),
            ))),
            Value::ChronoNaiveDate(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(
                v.format(DATE_FORMAT).to_string(),
            ))),
            Value::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
        }
    }
}
