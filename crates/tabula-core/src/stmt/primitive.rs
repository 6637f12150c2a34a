use super::{Type, Value};
use crate::Result;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// A field type that maps to a single column.
pub trait Primitive: Sized {
    const TYPE: Type;
    const NULLABLE: bool = false;

    fn load(value: Value) -> Result<Self>;

    fn to_value(&self) -> Value;
}

macro_rules! impl_primitive {
    ( $( $ty:ty => $variant:ident, )* ) => {
        $(
            impl Primitive for $ty {
                const TYPE: Type = Type::$variant;

                fn load(value: Value) -> Result<Self> {
                    value.try_into()
                }

                fn to_value(&self) -> Value {
                    Value::from(self.clone())
                }
            }
        )*
    };
}

impl_primitive! {
    bool => Bool,
    i32 => I32,
    i64 => I64,
    f64 => F64,
    String => String,
    Vec<u8> => Bytes,
    DateTime<Utc> => ChronoDateTimeUtc,
    NaiveDateTime => ChronoNaiveDateTime,
    NaiveDate => ChronoNaiveDate,
}

impl<T: Primitive> Primitive for Option<T> {
    const TYPE: Type = T::TYPE;
    const NULLABLE: bool = true;

    fn load(value: Value) -> Result<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            Ok(Some(T::load(value)?))
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}
