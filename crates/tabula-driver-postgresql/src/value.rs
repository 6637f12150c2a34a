use tabula_core::stmt::{self, Value as CoreValue};
use tokio_postgres::types::{to_sql_checked, IsNull, ToSql, Type};

type BoxError = Box<dyn std::error::Error + Sync + Send>;

/// Binds a [`tabula_core::stmt::Value`] to a parameter of whatever type the
/// server inferred for its placeholder.
#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut tokio_postgres::types::private::BytesMut,
    ) -> std::result::Result<IsNull, BoxError>
    where
        Self: Sized,
    {
        match &self.0 {
            stmt::Value::Null => Ok(IsNull::Yes),
            stmt::Value::Bool(value) => value.to_sql(ty, out),
            stmt::Value::I32(value) => int_to_sql(*value as i64, ty, out),
            stmt::Value::I64(value) => int_to_sql(*value, ty, out),
            stmt::Value::F64(value) => match *ty {
                Type::FLOAT4 => (*value as f32).to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
            stmt::Value::String(value) => value.to_sql(ty, out),
            stmt::Value::Bytes(value) => value.to_sql(ty, out),
            stmt::Value::ChronoDateTimeUtc(value) => match *ty {
                Type::TIMESTAMP => value.naive_utc().to_sql(ty, out),
                Type::DATE => value.date_naive().to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
            stmt::Value::ChronoNaiveDateTime(value) => match *ty {
                Type::TIMESTAMPTZ => value.and_utc().to_sql(ty, out),
                Type::DATE => value.date().to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
            stmt::Value::ChronoNaiveDate(value) => value.to_sql(ty, out),
        }
    }

    fn accepts(ty: &Type) -> bool {
        matches!(
            *ty,
            Type::BOOL
                | Type::INT2
                | Type::INT4
                | Type::INT8
                | Type::FLOAT4
                | Type::FLOAT8
                | Type::TEXT
                | Type::VARCHAR
                | Type::BPCHAR
                | Type::NAME
                | Type::BYTEA
                | Type::TIMESTAMP
                | Type::TIMESTAMPTZ
                | Type::DATE
        )
    }

    to_sql_checked!();
}

fn int_to_sql(
    value: i64,
    ty: &Type,
    out: &mut tokio_postgres::types::private::BytesMut,
) -> std::result::Result<IsNull, BoxError> {
    match *ty {
        Type::INT2 => i16::try_from(value)?.to_sql(ty, out),
        Type::INT4 => i32::try_from(value)?.to_sql(ty, out),
        Type::INT8 => value.to_sql(ty, out),
        Type::FLOAT8 => (value as f64).to_sql(ty, out),
        Type::BOOL => (value != 0).to_sql(ty, out),
        _ => Err(format!("cannot bind integer to a `{ty}` parameter").into()),
    }
}
