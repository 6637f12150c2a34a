use super::Type;
use crate::{Error, Result};

/// A single column value, as bound to a statement or read back from a row.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// 64-bit floating point number
    F64(f64),

    /// String value
    String(String),

    /// Raw bytes
    Bytes(Vec<u8>),

    /// An instant in UTC
    ChronoDateTimeUtc(chrono::DateTime<chrono::Utc>),

    /// A date and time without a time zone
    ChronoNaiveDateTime(chrono::NaiveDateTime),

    /// A calendar date
    ChronoNaiveDate(chrono::NaiveDate),

    /// Null value
    #[default]
    Null,
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the type of the value.
    pub fn infer_ty(&self) -> Type {
        match self {
            Self::Bool(_) => Type::Bool,
            Self::I32(_) => Type::I32,
            Self::I64(_) => Type::I64,
            Self::F64(_) => Type::F64,
            Self::String(_) => Type::String,
            Self::Bytes(_) => Type::Bytes,
            Self::ChronoDateTimeUtc(_) => Type::ChronoDateTimeUtc,
            Self::ChronoNaiveDateTime(_) => Type::ChronoNaiveDateTime,
            Self::ChronoNaiveDate(_) => Type::ChronoNaiveDate,
            Self::Null => Type::Null,
        }
    }

    /// Returns `true` if the value can be stored in a column of type `ty`.
    pub fn is_a(&self, ty: &Type) -> bool {
        match self {
            Self::Null => true,
            Self::I32(_) | Self::I64(_) => ty.is_integer(),
            _ => self.infer_ty() == *ty,
        }
    }

    /// Returns the value as an `i64` if it holds an integer of either width.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::I32(v) => Some(v as i64),
            Self::I64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(&**v),
            _ => None,
        }
    }

    /// Renders the value the way it is embedded in an identity clause.
    ///
    /// Only integers have a literal form; everything else is bound as a
    /// parameter.
    pub fn to_sql_literal(&self) -> Option<String> {
        self.as_i64().map(|v| v.to_string())
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I32(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(src: Vec<u8>) -> Self {
        Self::Bytes(src)
    }
}

impl<T> From<Option<T>> for Value
where
    Value: From<T>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::from(value),
            None => Self::Null,
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            // MySQL and SQLite store booleans as small integers
            Value::I32(v) => Ok(v != 0),
            Value::I64(v) => Ok(v != 0),
            _ => Err(Error::type_conversion(value, "bool")),
        }
    }
}

impl TryFrom<Value> for i32 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::I32(v) => Ok(v),
            Value::I64(v) => i32::try_from(v).map_err(|_| Error::type_conversion(value, "i32")),
            _ => Err(Error::type_conversion(value, "i32")),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::I32(v) => Ok(v as i64),
            Value::I64(v) => Ok(v),
            _ => Err(Error::type_conversion(value, "i64")),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::F64(v) => Ok(v),
            Value::I32(v) => Ok(v as f64),
            Value::I64(v) => Ok(v as f64),
            _ => Err(Error::type_conversion(value, "f64")),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(v) => Ok(v),
            _ => Err(Error::type_conversion(value, "String")),
        }
    }
}

impl TryFrom<Value> for Vec<u8> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bytes(v) => Ok(v),
            Value::String(v) => Ok(v.into_bytes()),
            _ => Err(Error::type_conversion(value, "Vec<u8>")),
        }
    }
}
