use super::{quote_literal, Dialect, Flavor};

/// Name of the per-schema version history table.
pub(super) const VERSION_TABLE: &str = "db_version";

impl Dialect {
    /// Query returning the highest applied version of `schema`, 0 when the
    /// history table is empty.
    pub fn db_version(&self, schema: &str) -> String {
        format!(
            "SELECT COALESCE(MAX(version_id), 0) FROM {}",
            self.table_name(schema, VERSION_TABLE)
        )
    }

    /// Query returning the number of tables that belong to `schema`.
    ///
    /// `database` is only consulted by MySQL, where a schema is a table-name
    /// prefix inside one database.
    pub fn db_empty(&self, schema: &str, database: &str) -> String {
        self.db_empty_excluding::<&str>(schema, database, &[])
    }

    /// Like [`Dialect::db_empty`], but on prefixing backends tables of the
    /// `nested` schemas are not counted. A schema `user` otherwise owns every
    /// table of a schema `user_data`.
    pub fn db_empty_excluding<S: AsRef<str>>(
        &self,
        schema: &str,
        database: &str,
        nested: &[S],
    ) -> String {
        let (column, mut sql) = match self.flavor {
            Flavor::Postgresql => {
                return format!(
                    "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = {}",
                    quote_literal(schema)
                )
            }
            Flavor::Mysql => (
                "table_name",
                format!(
                    "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = {} AND table_name LIKE {} ESCAPE '!'",
                    quote_literal(database),
                    prefix_pattern(schema)
                ),
            ),
            Flavor::Sqlite => (
                "name",
                format!(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name LIKE {} ESCAPE '!'",
                    prefix_pattern(schema)
                ),
            ),
        };

        for other in nested {
            sql.push_str(&format!(
                " AND {column} NOT LIKE {} ESCAPE '!'",
                prefix_pattern(other.as_ref())
            ));
        }

        sql
    }

    /// Query returning 1 when `schema`'s version history table exists, else 0.
    /// Matches the exact table name, never a prefix.
    pub fn db_version_exists(&self, schema: &str, database: &str) -> String {
        match self.flavor {
            Flavor::Postgresql => format!(
                "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = {} AND table_name = {}",
                quote_literal(schema),
                quote_literal(VERSION_TABLE)
            ),
            Flavor::Mysql => format!(
                "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = {} AND table_name = {}",
                quote_literal(database),
                quote_literal(&self.table_name(schema, VERSION_TABLE))
            ),
            Flavor::Sqlite => format!(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = {}",
                quote_literal(&self.table_name(schema, VERSION_TABLE))
            ),
        }
    }

    /// Query returning `(column_name, data_type, is_nullable)` for each column
    /// of a table, in ordinal order. `is_nullable` is `YES` or `NO`.
    pub fn describe_table(&self, table: &str, schema: &str, database: &str) -> String {
        match self.flavor {
            Flavor::Postgresql => format!(
                "SELECT column_name::text, data_type::text, is_nullable::text \
                 FROM information_schema.columns \
                 WHERE table_name = {} AND table_schema = {} ORDER BY ordinal_position",
                quote_literal(table),
                quote_literal(schema)
            ),
            Flavor::Mysql => format!(
                "SELECT column_name, data_type, is_nullable \
                 FROM information_schema.columns \
                 WHERE table_name = {} AND table_schema = {} ORDER BY ordinal_position",
                quote_literal(&self.table_name(schema, table)),
                quote_literal(database)
            ),
            Flavor::Sqlite => format!(
                "SELECT name, type, CASE WHEN \"notnull\" = 0 THEN 'YES' ELSE 'NO' END \
                 FROM pragma_table_info({}) ORDER BY cid",
                quote_literal(&self.table_name(schema, table))
            ),
        }
    }
}

/// A LIKE pattern matching names that start with `<schema>_`, using `!` as
/// the escape character.
fn prefix_pattern(schema: &str) -> String {
    let mut escaped = String::with_capacity(schema.len() + 4);
    for ch in schema.chars() {
        if matches!(ch, '!' | '%' | '_') {
            escaped.push('!');
        }
        escaped.push(ch);
    }
    quote_literal(&format!("{escaped}!_%"))
}
