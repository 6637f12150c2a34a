use super::Db;
use crate::{engine, naming, Result};

use tabula_core::{
    driver::operation::QuerySql,
    stmt::{Type, Value},
};

/// One column of an existing table, as reported by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name
    pub name: String,

    /// Database type name, as the backend spells it
    pub data_type: String,

    pub nullable: bool,

    /// The record field name the column maps to (`first_name` → `FirstName`)
    pub field_name: String,
}

impl Db {
    /// Returns `true` when `schema` contains no tables.
    ///
    /// On backends where a schema is a table-name prefix, tables of other
    /// manifest schemas nested under this one (`user_data` under `user`) are
    /// not counted.
    pub async fn is_schema_empty(&self, schema: &str) -> Result<bool> {
        let nested: Vec<String> = self
            .manifest()
            .map(|manifest| {
                let prefix = format!("{schema}_");
                manifest
                    .schemas()
                    .map(|entry| entry.name)
                    .filter(|name| name.starts_with(&prefix))
                    .collect()
            })
            .unwrap_or_default();

        let sql = self
            .dialect()
            .db_empty_excluding(schema, self.database(), &nested);

        let mut conn = self.connection().await?;
        Ok(engine::query_scalar(&mut **conn, sql).await? == 0)
    }

    /// The highest version recorded in `schema`'s version history, or 0 when
    /// the history table does not exist yet.
    pub async fn schema_version(&self, schema: &str) -> Result<i64> {
        let dialect = self.dialect();
        let mut conn = self.connection().await?;

        // Checked by exact name: a prefix match would also see the tables of
        // a schema whose name extends this one.
        let exists = dialect.db_version_exists(schema, self.database());
        if engine::query_scalar(&mut **conn, exists).await? == 0 {
            return Ok(0);
        }

        engine::query_scalar(&mut **conn, dialect.db_version(schema)).await
    }

    /// Lists the columns of `schema.table` in declaration order.
    pub async fn describe_table(&self, schema: &str, table: &str) -> Result<Vec<ColumnInfo>> {
        let sql = self.dialect().describe_table(table, schema, self.database());
        let query = QuerySql::query(sql, vec![], vec![Type::String, Type::String, Type::String]);

        let mut conn = self.connection().await?;
        let rows = engine::exec(&mut **conn, query).await?.into_values();

        rows.into_iter()
            .map(|row| {
                let mut columns = row.into_vec().into_iter().map(|value| match value {
                    Value::String(s) => s,
                    _ => String::new(),
                });
                let name = columns.next().unwrap_or_default();
                let data_type = columns.next().unwrap_or_default();
                let nullable = columns.next().is_some_and(|n| n.eq_ignore_ascii_case("YES"));
                let field_name = naming::to_field_name(&name)?;

                Ok(ColumnInfo {
                    name,
                    data_type,
                    nullable,
                    field_name,
                })
            })
            .collect()
    }
}
