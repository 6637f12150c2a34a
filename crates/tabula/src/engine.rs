mod row;
pub use row::RowDescriptor;

mod table;
pub use table::Table;

use crate::Result;

use tabula_core::{
    driver::{
        operation::{QuerySql, Transaction},
        Operation, Rows,
    },
    err,
    stmt::{Type, Value},
    Connection,
};

/// Executes one statement, logging it and any failure.
pub(crate) async fn exec(conn: &mut dyn Connection, query: QuerySql) -> Result<Rows> {
    tracing::debug!(sql = %query.sql, params = query.params.len(), "exec");

    let sql = query.sql.clone();
    match conn.exec(Operation::QuerySql(query)).await {
        Ok(response) => Ok(response.rows),
        Err(err) => {
            tracing::warn!(sql = %sql, error = %err, "statement failed");
            Err(err)
        }
    }
}

/// Runs a query expected to return a single integer.
pub(crate) async fn query_scalar(conn: &mut dyn Connection, sql: String) -> Result<i64> {
    let rows = exec(conn, QuerySql::query(sql.clone(), vec![], vec![Type::I64]))
        .await?
        .into_values();

    rows.first()
        .and_then(|row| row.first())
        .and_then(Value::as_i64)
        .ok_or_else(|| err!("query returned no integer value; sql={sql}"))
}

pub(crate) async fn transaction(conn: &mut dyn Connection, op: Transaction) -> Result<()> {
    tracing::debug!(?op, "transaction");
    conn.exec(Operation::Transaction(op)).await?;
    Ok(())
}

/// Rolls back after `cause`, logging (not returning) a rollback failure so the
/// original error reaches the caller.
pub(crate) async fn rollback(conn: &mut dyn Connection, cause: &crate::Error) {
    tracing::warn!(error = %cause, "rolling back");
    if let Err(err) = transaction(conn, Transaction::Rollback).await {
        tracing::warn!(error = %err, "rollback failed");
    }
}
