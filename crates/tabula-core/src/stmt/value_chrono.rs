use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::{stmt::Value, Error};

macro_rules! impl_chrono_conversions {
    ($chrono:ty, $name:ident) => {
        impl From<$chrono> for Value {
            fn from(value: $chrono) -> Self {
                Self::$name(value)
            }
        }

        impl From<&$chrono> for Value {
            fn from(value: &$chrono) -> Self {
                Self::$name(*value)
            }
        }
    };
}

impl_chrono_conversions!(DateTime<Utc>, ChronoDateTimeUtc);
impl_chrono_conversions!(NaiveDateTime, ChronoNaiveDateTime);
impl_chrono_conversions!(NaiveDate, ChronoNaiveDate);

// Drivers without a zoned timestamp type hand back naive values; they are
// interpreted as UTC.
impl TryFrom<Value> for DateTime<Utc> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::ChronoDateTimeUtc(v) => Ok(v),
            Value::ChronoNaiveDateTime(v) => Ok(v.and_utc()),
            _ => Err(Error::type_conversion(value, "DateTime<Utc>")),
        }
    }
}

impl TryFrom<Value> for NaiveDateTime {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::ChronoNaiveDateTime(v) => Ok(v),
            Value::ChronoDateTimeUtc(v) => Ok(v.naive_utc()),
            _ => Err(Error::type_conversion(value, "NaiveDateTime")),
        }
    }
}

impl TryFrom<Value> for NaiveDate {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::ChronoNaiveDate(v) => Ok(v),
            Value::ChronoNaiveDateTime(v) => Ok(v.date()),
            _ => Err(Error::type_conversion(value, "NaiveDate")),
        }
    }
}
