use crate::stmt::ValueRecord;

#[derive(Debug)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Rows returned by a query
    Values(Vec<ValueRecord>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn values(values: Vec<ValueRecord>) -> Self {
        Self {
            rows: Rows::Values(values),
        }
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }

    /// Returns the affected-row count, or the number of rows returned.
    pub fn into_count(self) -> u64 {
        match self {
            Rows::Count(count) => count,
            Rows::Values(values) => values.len() as u64,
        }
    }

    /// Returns the returned rows; a count response yields no rows.
    pub fn into_values(self) -> Vec<ValueRecord> {
        match self {
            Self::Values(values) => values,
            Self::Count(_) => vec![],
        }
    }
}
