/// The storage type of a column value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// Boolean value
    Bool,

    /// Signed 32-bit integer
    I32,

    /// Signed 64-bit integer
    I64,

    /// 64-bit floating point number
    F64,

    /// String type
    String,

    /// Raw bytes
    Bytes,

    /// An instant in UTC (`timestamptz` on PostgreSQL)
    ChronoDateTimeUtc,

    /// A date and time without a time zone
    ChronoNaiveDateTime,

    /// A calendar date
    ChronoNaiveDate,

    /// The null type
    Null,
}

impl Type {
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool)
    }

    /// Returns `true` for both integer widths.
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::I32 | Self::I64)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }

    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            Self::ChronoDateTimeUtc | Self::ChronoNaiveDateTime | Self::ChronoNaiveDate
        )
    }
}
