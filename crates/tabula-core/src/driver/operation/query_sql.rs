use super::Operation;

use crate::stmt::{Type, Value};

#[derive(Debug, Clone)]
pub struct QuerySql {
    /// The SQL text, with placeholders in the dialect's syntax
    pub sql: String,

    /// Values bound to the placeholders, in order
    pub params: Vec<Value>,

    /// The column types of the returned rows. `None` for statements that
    /// return only an affected-row count.
    pub ret: Option<Vec<Type>>,
}

impl QuerySql {
    /// A statement that returns an affected-row count.
    pub fn execute(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
            ret: None,
        }
    }

    /// A query returning rows with the given column types.
    pub fn query(sql: impl Into<String>, params: Vec<Value>, ret: Vec<Type>) -> Self {
        Self {
            sql: sql.into(),
            params,
            ret: Some(ret),
        }
    }
}

impl From<QuerySql> for Operation {
    fn from(value: QuerySql) -> Self {
        Self::QuerySql(value)
    }
}
