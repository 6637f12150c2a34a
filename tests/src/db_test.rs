use crate::{
    exec_log::ExecLog,
    logging_driver::{DriverOp, FailOn, LoggingDriver},
    Column, Setup,
};
use std::{
    future::Future,
    pin::Pin,
    sync::{Arc, Mutex},
};
use tabula::{db::Builder, migrate::VersionManifest, Db, Result};
use tabula_core::{
    driver::operation::{QuerySql, Transaction},
    Connection,
};

/// Owns the runtime, the backend setup and the database handle of one test.
///
/// Every handle it builds goes through a [`LoggingDriver`], so tests can
/// assert on the exact operations sent to the database. Cleanup runs on drop.
pub struct DbTest {
    runtime: Option<tokio::runtime::Runtime>,
    setup: Box<dyn Setup>,
    db: Option<Db>,
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
    fail_on: FailOn,
}

impl DbTest {
    /// Create a new DbTest with a current-thread runtime.
    pub fn new(setup: Box<dyn Setup>) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to create Tokio runtime");

        Self {
            runtime: Some(runtime),
            setup,
            db: None,
            ops_log: Arc::new(Mutex::new(Vec::new())),
            fail_on: Arc::new(Mutex::new(None)),
        }
    }

    /// Schema the test's tables live in.
    pub fn schema(&self) -> String {
        self.setup.schema()
    }

    /// Build a handle whose default schema is the test schema.
    pub async fn try_setup_db(&mut self, mut builder: Builder) -> Result<Db> {
        builder.default_schema(self.setup.schema());

        let logging_driver = LoggingDriver::new(self.setup.driver()?);
        self.ops_log = logging_driver.ops_log_handle();
        self.fail_on = logging_driver.fail_on_handle();

        let db = builder.build(logging_driver).await?;
        self.setup.prepare(&db).await?;
        self.db = Some(db.clone());

        Ok(db)
    }

    pub async fn setup_db(&mut self) -> Db {
        self.try_setup_db(Db::builder()).await.unwrap()
    }

    pub async fn setup_db_with(&mut self, builder: Builder) -> Db {
        self.try_setup_db(builder).await.unwrap()
    }

    /// A manifest targeting `version` for the test schema.
    pub fn manifest(&self, version: i64) -> VersionManifest {
        self.manifest_for(&[(&self.schema(), version)])
    }

    /// A manifest with the test schema as default and the given targets.
    pub fn manifest_for(&self, versions: &[(&str, i64)]) -> VersionManifest {
        let mut manifest = format!(
            "default_schema = \"{}\"\n[schema_versions]\n",
            self.schema()
        );
        for (schema, version) in versions {
            manifest.push_str(&format!("{schema} = {version}\n"));
        }
        manifest.parse().unwrap()
    }

    /// `CREATE TABLE` statement for `table` in the test schema.
    pub fn ddl(&self, db: &Db, table: &str, columns: &[(&str, Column)]) -> String {
        self.ddl_in(db, &self.schema(), table, columns)
    }

    /// `CREATE TABLE` statement for `table` in `schema`.
    pub fn ddl_in(&self, db: &Db, schema: &str, table: &str, columns: &[(&str, Column)]) -> String {
        let columns = columns
            .iter()
            .map(|(name, column)| format!("{name} {}", self.setup.column_type(*column)))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "CREATE TABLE {} ({columns})",
            db.dialect().table_name(schema, table)
        )
    }

    pub async fn create_table(&self, db: &Db, table: &str, columns: &[(&str, Column)]) {
        let ddl = self.ddl(db, table, columns);
        exec(db, &ddl).await.unwrap();
    }

    /// Make the next `op` sent through the test's handle fail without
    /// reaching the database.
    pub fn fail_next(&self, op: Transaction) {
        *self.fail_on.lock().unwrap() = Some(op);
    }

    /// Get the operations log for assertions
    pub fn log(&self) -> ExecLog {
        ExecLog::new(self.ops_log.clone())
    }

    /// Run a test function with a mutable reference to self, using our managed runtime.
    pub fn run_test<F>(&mut self, test_fn: F)
    where
        F: for<'a> FnOnce(&'a mut DbTest) -> Pin<Box<dyn Future<Output = ()> + 'a>>,
    {
        let runtime = self.runtime.take().expect("runtime already in use");
        runtime.block_on(test_fn(self));
        self.runtime = Some(runtime);
    }
}

impl Drop for DbTest {
    fn drop(&mut self) {
        if let (Some(runtime), Some(db)) = (self.runtime.as_ref(), self.db.take()) {
            runtime.block_on(async {
                let _ = self.setup.cleanup(&db).await;
            });
        }
    }
}

/// Executes raw SQL outside the record API.
pub async fn exec(db: &Db, sql: &str) -> Result<u64> {
    let mut conn = db.connection().await?;
    let response = conn.exec(QuerySql::execute(sql, vec![]).into()).await?;
    Ok(response.rows.into_count())
}

/// Runs a query returning one integer.
pub async fn query_i64(db: &Db, sql: &str) -> Result<i64> {
    let mut conn = db.connection().await?;
    let response = conn
        .exec(QuerySql::query(sql, vec![], vec![tabula::Type::I64]).into())
        .await?;

    Ok(response
        .rows
        .into_values()
        .first()
        .and_then(|row| row.first())
        .and_then(tabula::Value::as_i64)
        .unwrap_or_default())
}
