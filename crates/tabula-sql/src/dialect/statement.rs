//! Row statement templates.
//!
//! The identity of single-row statements is embedded in the WHERE clause as an
//! integer literal rather than bound. It is always an `i64` produced by the
//! engine, never caller text.

use super::{Comma, Dialect, Flavor};

impl Dialect {
    /// `SELECT <columns> FROM <table> WHERE <id_column>=<id>`
    pub fn fetch<C: AsRef<str>>(
        &self,
        table: &str,
        columns: &[C],
        id_column: &str,
        id: i64,
    ) -> String {
        format!(
            "SELECT {} FROM {table} WHERE {id_column}={id}",
            Comma(columns.iter().map(|c| c.as_ref()))
        )
    }

    /// `UPDATE <table> SET <col>=<p1>, ... WHERE <id_column>=<id>`
    pub fn update<C: AsRef<str>>(
        &self,
        table: &str,
        columns: &[C],
        id_column: &str,
        id: i64,
    ) -> String {
        let assignments = columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{}={}", column.as_ref(), self.p(i + 1)))
            .collect::<Vec<_>>();

        format!(
            "UPDATE {table} SET {} WHERE {id_column}={id}",
            Comma(&assignments)
        )
    }

    /// `INSERT INTO <table> (<columns>) VALUES (<p1>, ...)`
    pub fn insert<C: AsRef<str>>(&self, table: &str, columns: &[C]) -> String {
        format!(
            "INSERT INTO {table} ({}) VALUES ({})",
            Comma(columns.iter().map(|c| c.as_ref())),
            Comma((1..=columns.len()).map(|i| self.p(i)))
        )
    }

    /// `DELETE FROM <table> WHERE <id_column>=<id>`
    pub fn delete(&self, table: &str, id_column: &str, id: i64) -> String {
        format!("DELETE FROM {table} WHERE {id_column}={id}")
    }

    /// `DELETE FROM <table> WHERE <predicate>`
    ///
    /// The predicate is inserted verbatim.
    pub fn delete_where(&self, table: &str, predicate: &str) -> String {
        format!("DELETE FROM {table} WHERE {predicate}")
    }

    /// First step of a FetchAll query: `SELECT <columns> FROM <table>`.
    pub fn fetch_all_select<C: AsRef<str>>(&self, table: &str, columns: &[C]) -> String {
        format!(
            "SELECT {} FROM {table}",
            Comma(columns.iter().map(|c| c.as_ref()))
        )
    }

    pub fn fetch_all_where(&self, query: String, predicate: &str) -> String {
        format!("{query} WHERE {predicate}")
    }

    pub fn fetch_all_order(&self, query: String, order: &str) -> String {
        format!("{query} ORDER BY {order}")
    }

    pub fn fetch_all_limit(&self, query: String, limit: u64) -> String {
        format!("{query} LIMIT {limit}")
    }

    /// Appends an OFFSET clause.
    ///
    /// MySQL and SQLite only accept OFFSET after a LIMIT; when `limited` is
    /// false they get an unbounded LIMIT first.
    pub fn fetch_all_offset(&self, query: String, offset: u64, limited: bool) -> String {
        match self.flavor {
            Flavor::Mysql if !limited => {
                format!("{query} LIMIT 18446744073709551615 OFFSET {offset}")
            }
            Flavor::Sqlite if !limited => format!("{query} LIMIT -1 OFFSET {offset}"),
            _ => format!("{query} OFFSET {offset}"),
        }
    }

    /// Query returning the identity generated by the last insert on this
    /// session.
    pub fn last_insert_id(&self, sequence_name: &str) -> String {
        match self.flavor {
            Flavor::Postgresql => format!("SELECT CURRVAL({sequence_name})"),
            Flavor::Mysql => "SELECT LAST_INSERT_ID()".to_string(),
            Flavor::Sqlite => "SELECT last_insert_rowid()".to_string(),
        }
    }
}
