use super::{Dialect, Flavor};

use tabula_core::driver::operation::Transaction;

impl Dialect {
    /// SQL for a transaction control operation.
    pub fn transaction(&self, op: Transaction) -> &'static str {
        match op {
            Transaction::Start => match self.flavor {
                Flavor::Mysql => "START TRANSACTION",
                Flavor::Postgresql | Flavor::Sqlite => "BEGIN",
            },
            Transaction::Commit => "COMMIT",
            Transaction::Rollback => "ROLLBACK",
        }
    }
}
