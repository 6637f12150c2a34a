#[macro_use]
mod macros;


mod db_test;
pub use db_test::{exec, query_i64, DbTest};

pub use exec_log::ExecLog;

mod isolation;

pub use logging_driver::{DriverOp, FailOn, LoggingDriver};

pub use std_util::*;

use tabula::{Db, Result};
use tabula_core::Driver;

/// Column kinds used by test tables, mapped to DDL per backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Auto-generated integer primary key
    Id,
    Text,
    OptionalText,
    UniqueText,
    Int,
    Timestamp,
}

#[async_trait::async_trait]
pub trait Setup: Send + Sync + 'static {
    fn driver(&self) -> Result<Box<dyn Driver>>;

    /// Schema the test's tables live in. Unique per test on shared servers.
    fn schema(&self) -> String;

    /// Column definition for `column` in this backend's DDL.
    fn column_type(&self, column: Column) -> &'static str;

    /// Runs once after connecting, before the test body.
    async fn prepare(&self, _db: &Db) -> Result<()> {
        Ok(())
    }

    /// Drops everything the test created.
    async fn cleanup(&self, _db: &Db) -> Result<()> {
        Ok(())
    }
}
