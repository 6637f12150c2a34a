use tabula::Result;
use tabula_core::Driver;
use tabula_driver_sqlite::Sqlite;

use crate::{Column, Setup};

/// In-memory SQLite. Every test gets a fresh database, so nothing needs
/// isolating or cleaning up.
pub struct SetupSqlite;

impl SetupSqlite {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SetupSqlite {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Setup for SetupSqlite {
    fn driver(&self) -> Result<Box<dyn Driver>> {
        Ok(Box::new(Sqlite::in_memory()))
    }

    fn schema(&self) -> String {
        "app".to_string()
    }

    fn column_type(&self, column: Column) -> &'static str {
        match column {
            Column::Id => "INTEGER PRIMARY KEY AUTOINCREMENT",
            Column::Text => "TEXT NOT NULL",
            Column::OptionalText => "TEXT",
            Column::UniqueText => "TEXT NOT NULL UNIQUE",
            Column::Int => "INTEGER NOT NULL",
            Column::Timestamp => "TEXT NOT NULL",
        }
    }
}
