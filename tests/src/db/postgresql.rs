use tabula::{Db, Result};
use tabula_core::Driver;
use tabula_driver_postgresql::PostgreSQL;

use crate::{db_test::exec, isolation::TestIsolation, Column, Setup};

pub struct SetupPostgreSQL {
    isolation: TestIsolation,
}

impl SetupPostgreSQL {
    pub fn new() -> Self {
        Self {
            isolation: TestIsolation::new(),
        }
    }
}

impl Default for SetupPostgreSQL {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Setup for SetupPostgreSQL {
    fn driver(&self) -> Result<Box<dyn Driver>> {
        let url = std::env::var("TABULA_TEST_POSTGRES_URL")
            .unwrap_or_else(|_| "postgresql://localhost:5432/tabula_test".to_string());

        Ok(Box::new(PostgreSQL::new(url)?))
    }

    fn schema(&self) -> String {
        self.isolation.schema()
    }

    fn column_type(&self, column: Column) -> &'static str {
        match column {
            Column::Id => "BIGSERIAL PRIMARY KEY",
            Column::Text => "TEXT NOT NULL",
            Column::OptionalText => "TEXT",
            Column::UniqueText => "TEXT NOT NULL UNIQUE",
            Column::Int => "BIGINT NOT NULL",
            Column::Timestamp => "TIMESTAMPTZ NOT NULL",
        }
    }

    async fn prepare(&self, db: &Db) -> Result<()> {
        exec(db, &format!("CREATE SCHEMA \"{}\"", self.schema())).await?;
        Ok(())
    }

    async fn cleanup(&self, db: &Db) -> Result<()> {
        exec(db, &format!("DROP SCHEMA IF EXISTS \"{}\" CASCADE", self.schema())).await?;
        Ok(())
    }
}
