use crate::{engine, Db, Result};

use tabula_core::{
    driver::operation::{QuerySql, Transaction},
    Error,
};

use std::path::Path;

/// Splits a script into statements.
///
/// Splitting is purely lexical on `;`: a semicolon inside a string literal or
/// a `--` comment splits the statement. Fragments that are empty after
/// trimming, or that are a single `/* ... */` comment, are dropped.
pub fn split_statements(script: &str) -> Vec<&str> {
    script
        .split(';')
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .filter(|fragment| !(fragment.starts_with("/*") && fragment.ends_with("*/")))
        .collect()
}

/// Runs every statement of the script at `path` inside one transaction.
///
/// The first failing statement rolls the transaction back and its error is
/// returned, wrapped in [`Error::migration`] naming the script.
pub async fn run_script(db: &Db, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let name = path.display().to_string();

    let script = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| Error::from(err).context(Error::migration(&name)))?;

    tracing::info!(script = %name, "running script");

    let mut conn = db.connection().await?;
    let conn = &mut **conn;

    engine::transaction(conn, Transaction::Start)
        .await
        .map_err(|err| err.context(Error::migration(&name)))?;

    for statement in split_statements(&script) {
        if let Err(err) = engine::exec(conn, QuerySql::execute(statement, vec![])).await {
            engine::rollback(conn, &err).await;
            return Err(err.context(Error::migration(&name)));
        }
    }

    engine::transaction(conn, Transaction::Commit)
        .await
        .map_err(|err| err.context(Error::migration(&name)))
}
