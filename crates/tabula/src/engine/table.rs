use super::{exec, rollback, transaction, RowDescriptor};
use crate::{Db, Query, Record, Result};

use tabula_core::{
    driver::operation::{QuerySql, Transaction},
    err,
    stmt::{Type, Value},
    Connection, Error,
};
use tabula_sql::Dialect;

/// Record access against the tables of one schema.
///
/// Obtained from [`Db::table`] or [`Db::table_in`]. Every method checks out a
/// single pooled connection for its duration.
///
/// Methods that address one row by identity ([`Table::update`],
/// [`Table::delete`], [`Table::fetch`]) do nothing when the record's identity
/// is unset, meaning the type has no identity field or it holds a value of
/// zero or less. No statement is sent in that case.
#[derive(Debug, Clone, Copy)]
pub struct Table<'a> {
    db: &'a Db,
    schema: &'a str,
}

impl<'a> Table<'a> {
    pub(crate) fn new(db: &'a Db, schema: &'a str) -> Table<'a> {
        Table { db, schema }
    }

    pub fn schema(&self) -> &str {
        self.schema
    }

    pub fn describe<R: Record>(&self, record: &R, include_identity: bool) -> Result<RowDescriptor> {
        RowDescriptor::describe(record, include_identity, self.schema, &self.dialect())
    }

    /// Inserts `record`, then writes the generated identity back into its
    /// identity field. The record is left untouched if either step fails.
    pub async fn insert<R: Record>(&self, record: &mut R) -> Result<()> {
        let mut conn = self.db.connection().await?;
        self.insert_on(&mut **conn, record).await
    }

    /// Inserts `record` including its identity column, as set by the caller.
    /// No identity is read back.
    pub async fn insert_without_auto_id<R: Record>(&self, record: &R) -> Result<()> {
        let row = self.describe(record, true)?;
        let sql = self.dialect().insert(&row.table_name, &row.columns);

        let mut conn = self.db.connection().await?;
        exec(&mut **conn, QuerySql::execute(sql, row.values)).await?;
        Ok(())
    }

    /// Inserts every record in one transaction.
    ///
    /// On the first failure, including a failed commit, the transaction is
    /// rolled back, identities already written back into records are
    /// restored, later records are not touched, and the failure is returned.
    pub async fn insert_batch<R: Record>(&self, records: &mut [R]) -> Result<()> {
        let identity_index = R::identity_index();
        let saved: Vec<Value> = match identity_index {
            Some(index) => records.iter().map(|record| record.get(index)).collect(),
            None => vec![],
        };

        let mut conn = self.db.connection().await?;
        transaction(&mut **conn, Transaction::Start).await?;

        for position in 0..records.len() {
            if let Err(err) = self.insert_on(&mut **conn, &mut records[position]).await {
                rollback(&mut **conn, &err).await;
                restore_identities(&mut records[..position], identity_index, saved);
                return Err(err);
            }
        }

        if let Err(err) = transaction(&mut **conn, Transaction::Commit).await {
            rollback(&mut **conn, &err).await;
            restore_identities(records, identity_index, saved);
            return Err(err);
        }

        Ok(())
    }

    /// Writes every non-identity column of `record` to the row with its
    /// identity. Returns the number of rows changed, which is 0 when no such
    /// row exists or the identity is unset.
    pub async fn update<R: Record>(&self, record: &R) -> Result<u64> {
        let row = self.describe(record, false)?;
        let (Some(id), Some(id_column)) = (row.identity, &row.identity_column) else {
            tracing::debug!(record = R::NAME, "identity unset; skipping update");
            return Ok(0);
        };

        let sql = self
            .dialect()
            .update(&row.table_name, &row.columns, id_column, id);

        let mut conn = self.db.connection().await?;
        Ok(exec(&mut **conn, QuerySql::execute(sql, row.values))
            .await?
            .into_count())
    }

    /// Deletes the row with `record`'s identity. Returns the number of rows
    /// removed.
    pub async fn delete<R: Record>(&self, record: &R) -> Result<u64> {
        let row = self.describe(record, false)?;
        let (Some(id), Some(id_column)) = (row.identity, &row.identity_column) else {
            tracing::debug!(record = R::NAME, "identity unset; skipping delete");
            return Ok(0);
        };

        let sql = self.dialect().delete(&row.table_name, id_column, id);

        let mut conn = self.db.connection().await?;
        Ok(exec(&mut **conn, QuerySql::execute(sql, vec![]))
            .await?
            .into_count())
    }

    /// Deletes every row of `R`'s table matching `predicate`.
    ///
    /// The predicate is SQL inserted verbatim into the statement. It is not
    /// escaped or parameterized.
    pub async fn delete_where<R: Record>(&self, predicate: &str) -> Result<u64> {
        let table = super::row::table_name::<R>()?;
        let sql = self
            .dialect()
            .delete_where(&self.dialect().table_name(self.schema, &table), predicate);

        let mut conn = self.db.connection().await?;
        Ok(exec(&mut **conn, QuerySql::execute(sql, vec![]))
            .await?
            .into_count())
    }

    /// Loads the row with `record`'s identity into its other fields.
    ///
    /// A missing row is reported as [`Error::is_record_not_found`].
    pub async fn fetch<R: Record>(&self, record: &mut R) -> Result<()> {
        let row = self.describe(record, false)?;
        let (Some(id), Some(id_column)) = (row.identity, &row.identity_column) else {
            tracing::debug!(record = R::NAME, "identity unset; skipping fetch");
            return Ok(());
        };

        let sql = self
            .dialect()
            .fetch(&row.table_name, &row.columns, id_column, id);
        let query = QuerySql::query(sql, vec![], row.types::<R>());

        let mut conn = self.db.connection().await?;
        let values = exec(&mut **conn, query).await?.into_values();

        match values.into_iter().next() {
            Some(values) => row.scan(record, values),
            None => Err(Error::record_not_found(format!(
                "table={}; {id_column}={id}",
                row.table_name
            ))),
        }
    }

    /// Loads every row of `R`'s table selected by `query`, in the order the
    /// database returns them.
    pub async fn fetch_all<R: Record + Default>(&self, query: &Query) -> Result<Vec<R>> {
        let row = self.describe(&R::default(), true)?;

        let dialect = self.dialect();
        let sql = query.to_sql(
            &dialect,
            dialect.fetch_all_select(&row.table_name, &row.columns),
        );
        let query = QuerySql::query(sql, query.args.clone(), row.types::<R>());

        let mut conn = self.db.connection().await?;
        let values = exec(&mut **conn, query).await?.into_values();

        let mut records = Vec::with_capacity(values.len());
        for values in values {
            let mut record = R::default();
            row.scan(&mut record, values)?;
            records.push(record);
        }

        Ok(records)
    }

    async fn insert_on<R: Record>(&self, conn: &mut dyn Connection, record: &mut R) -> Result<()> {
        let row = self.describe(record, false)?;
        let dialect = self.dialect();
        let sql = dialect.insert(&row.table_name, &row.columns);

        exec(conn, QuerySql::execute(sql, row.values)).await?;

        if let Some(index) = row.identity_index {
            let sql = dialect.last_insert_id(&row.sequence_name);
            let rows = exec(conn, QuerySql::query(sql, vec![], vec![Type::I64]))
                .await?
                .into_values();

            let id = rows
                .first()
                .and_then(|values| values.first())
                .and_then(Value::as_i64)
                .ok_or_else(|| err!("no identity generated for `{}`", row.table_name))?;

            record.set(index, Value::I64(id))?;
        }

        Ok(())
    }

    fn dialect(&self) -> Dialect {
        self.db.dialect()
    }
}

/// Puts back the identity values `records` held before a failed batch.
fn restore_identities<R: Record>(records: &mut [R], index: Option<usize>, saved: Vec<Value>) {
    let Some(index) = index else {
        return;
    };

    for (record, value) in records.iter_mut().zip(saved) {
        if let Err(err) = record.set(index, value) {
            tracing::warn!(error = %err, "failed to restore identity");
        }
    }
}
