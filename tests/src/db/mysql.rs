use tabula::{Db, Result, Type, Value};
use tabula_core::{driver::operation::QuerySql, Connection, Driver};
use tabula_driver_mysql::MySQL;

use crate::{db_test::exec, isolation::TestIsolation, Column, Setup};

pub struct SetupMySQL {
    isolation: TestIsolation,
}

impl SetupMySQL {
    pub fn new() -> Self {
        Self {
            isolation: TestIsolation::new(),
        }
    }
}

impl Default for SetupMySQL {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Setup for SetupMySQL {
    fn driver(&self) -> Result<Box<dyn Driver>> {
        let url = std::env::var("TABULA_TEST_MYSQL_URL")
            .unwrap_or_else(|_| "mysql://root@localhost:3306/tabula_test".to_string());

        Ok(Box::new(MySQL::new(url)?))
    }

    fn schema(&self) -> String {
        self.isolation.schema()
    }

    fn column_type(&self, column: Column) -> &'static str {
        match column {
            Column::Id => "BIGINT AUTO_INCREMENT PRIMARY KEY",
            Column::Text => "VARCHAR(255) NOT NULL",
            Column::OptionalText => "VARCHAR(255)",
            Column::UniqueText => "VARCHAR(255) NOT NULL UNIQUE",
            Column::Int => "BIGINT NOT NULL",
            Column::Timestamp => "DATETIME(6) NOT NULL",
        }
    }

    async fn cleanup(&self, db: &Db) -> Result<()> {
        // Schemas are table-name prefixes in MySQL; drop the tables that carry ours.
        let sql = format!(
            "SELECT table_name FROM information_schema.tables WHERE table_schema = DATABASE() AND table_name LIKE '{}!_%' ESCAPE '!'",
            self.schema().replace('_', "!_")
        );

        let tables = {
            let mut conn = db.connection().await?;
            conn.exec(QuerySql::query(sql, vec![], vec![Type::String]).into())
                .await?
                .rows
                .into_values()
        };

        for row in tables {
            if let Some(Value::String(table)) = row.first() {
                if self.isolation.owns_table(table) {
                    let _ = exec(db, &format!("DROP TABLE IF EXISTS `{table}`")).await;
                }
            }
        }

        Ok(())
    }
}
