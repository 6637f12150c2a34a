use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use mysql_async::prelude::ToValue;
use tabula_core::{
    stmt::{Type, Value as CoreValue},
    Error, Result,
};

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Converts a column value, steering integer and temporal results toward
    /// the type the caller expects.
    pub fn from_sql(value: mysql_async::Value, expected: Option<Type>) -> Result<Self> {
        use mysql_async::Value as My;

        let value = match value {
            My::NULL => CoreValue::Null,
            My::Int(v) => match expected {
                Some(Type::Bool) => CoreValue::Bool(v != 0),
                Some(Type::I32) => match i32::try_from(v) {
                    Ok(v) => CoreValue::I32(v),
                    Err(_) => return Err(Error::type_conversion(CoreValue::I64(v), "i32")),
                },
                Some(Type::F64) => CoreValue::F64(v as f64),
                _ => CoreValue::I64(v),
            },
            My::UInt(v) => match i64::try_from(v) {
                Ok(v) => match expected {
                    Some(Type::Bool) => CoreValue::Bool(v != 0),
                    _ => CoreValue::I64(v),
                },
                Err(_) => return Err(invalid_data(format!("unsigned value {v} exceeds i64"))),
            },
            My::Float(v) => CoreValue::F64(v as f64),
            My::Double(v) => CoreValue::F64(v),
            My::Date(year, month, day, hour, minute, second, micros) => {
                let date = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
                    .ok_or_else(|| invalid_data(format!("invalid date {year}-{month}-{day}")))?;

                match expected {
                    Some(Type::ChronoNaiveDate) => CoreValue::ChronoNaiveDate(date),
                    _ => {
                        let datetime = date
                            .and_hms_micro_opt(hour as u32, minute as u32, second as u32, micros)
                            .ok_or_else(|| {
                                invalid_data(format!("invalid time {hour}:{minute}:{second}"))
                            })?;

                        match expected {
                            Some(Type::ChronoDateTimeUtc) => {
                                CoreValue::ChronoDateTimeUtc(datetime.and_utc())
                            }
                            _ => CoreValue::ChronoNaiveDateTime(datetime),
                        }
                    }
                }
            }
            My::Bytes(bytes) => match expected {
                Some(Type::Bytes) => CoreValue::Bytes(bytes),
                Some(Type::I64 | Type::I32) => parse_text::<i64>(bytes)?.into(),
                Some(Type::F64) => parse_text::<f64>(bytes)?.into(),
                _ => CoreValue::String(
                    String::from_utf8(bytes).map_err(Error::driver_operation_failed)?,
                ),
            },
            My::Time(..) => {
                return Err(invalid_data("TIME columns are not supported".to_string()));
            }
        };

        Ok(Self(value))
    }

    pub fn into_inner(self) -> CoreValue {
        self.0
    }
}

impl ToValue for Value {
    fn to_value(&self) -> mysql_async::Value {
        match &self.0 {
            CoreValue::Bool(value) => value.to_value(),
            CoreValue::I32(value) => value.to_value(),
            CoreValue::I64(value) => value.to_value(),
            CoreValue::F64(value) => value.to_value(),
            CoreValue::String(value) => value.to_value(),
            CoreValue::Bytes(value) => value.to_value(),
            CoreValue::ChronoDateTimeUtc(value) => datetime_to_value(&value.naive_utc()),
            CoreValue::ChronoNaiveDateTime(value) => datetime_to_value(value),
            CoreValue::ChronoNaiveDate(value) => mysql_async::Value::Date(
                value.year() as u16,
                value.month() as u8,
                value.day() as u8,
                0,
                0,
                0,
                0,
            ),
            CoreValue::Null => mysql_async::Value::NULL,
        }
    }
}

fn datetime_to_value(value: &NaiveDateTime) -> mysql_async::Value {
    mysql_async::Value::Date(
        value.year() as u16,
        value.month() as u8,
        value.day() as u8,
        value.hour() as u8,
        value.minute() as u8,
        value.second() as u8,
        value.and_utc().timestamp_subsec_micros(),
    )
}

fn parse_text<T: std::str::FromStr>(bytes: Vec<u8>) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let text = String::from_utf8(bytes).map_err(Error::driver_operation_failed)?;
    text.trim().parse().map_err(Error::driver_operation_failed)
}

fn invalid_data(message: String) -> Error {
    Error::driver_operation_failed(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        message,
    ))
}
