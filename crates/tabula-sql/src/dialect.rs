mod connect;
pub use connect::ConnectParams;

mod delim;
use delim::Comma;

mod flavor;
pub use flavor::Flavor;

mod introspect;

mod placeholder;
pub use placeholder::Placeholder;

mod statement;

mod transaction;

/// The SQL dialect of one database backend.
///
/// Selected once from the driver name when a `Db` is built and immutable
/// afterwards. Cheap to copy and safe to share between tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    flavor: Flavor,
}

impl Dialect {
    pub const fn postgresql() -> Dialect {
        Dialect {
            flavor: Flavor::Postgresql,
        }
    }

    pub const fn mysql() -> Dialect {
        Dialect {
            flavor: Flavor::Mysql,
        }
    }

    pub const fn sqlite() -> Dialect {
        Dialect {
            flavor: Flavor::Sqlite,
        }
    }

    /// Selects the dialect for a driver name (`postgres`, `postgresql`,
    /// `mysql` or `sqlite`).
    pub fn from_driver_name(name: &str) -> tabula_core::Result<Dialect> {
        match name {
            "postgres" | "postgresql" => Ok(Dialect::postgresql()),
            "mysql" => Ok(Dialect::mysql()),
            "sqlite" => Ok(Dialect::sqlite()),
            _ => Err(tabula_core::Error::configuration(format!(
                "database driver `{name}` is not supported"
            ))),
        }
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// The driver name used in migration script file names.
    pub fn driver_name(&self) -> &'static str {
        match self.flavor {
            Flavor::Postgresql => "postgres",
            Flavor::Mysql => "mysql",
            Flavor::Sqlite => "sqlite",
        }
    }

    /// Placeholder for the `ordinal`-th bound parameter (1-based).
    ///
    /// MySQL renders `?` for every ordinal, so parameters must always be bound
    /// in the order their placeholders were generated.
    pub fn p(&self, ordinal: usize) -> Placeholder {
        Placeholder::new(self.flavor, ordinal)
    }

    /// Resolves a table name within a schema.
    ///
    /// PostgreSQL qualifies and quotes it (`"app"."post"`). MySQL and SQLite
    /// have no schema separate from the database here, so the schema becomes
    /// a name prefix (`app_post`).
    pub fn table_name(&self, schema: &str, table: &str) -> String {
        match self.flavor {
            Flavor::Postgresql => format!("{}.{}", quote_ident(schema), quote_ident(table)),
            Flavor::Mysql | Flavor::Sqlite => format!("{schema}_{table}"),
        }
    }

    /// Resolves the identity sequence of a table as a string literal holding
    /// a quoted name (`'"app"."post_id_seq"'`), so mixed-case schemas resolve
    /// to the sequence `table_name` created. Empty for backends without
    /// sequences.
    pub fn sequence_name(&self, schema: &str, table: &str) -> String {
        self.sequence_name_for(schema, table, "id")
    }

    /// Like [`Dialect::sequence_name`], for an identity column not named `id`.
    pub fn sequence_name_for(&self, schema: &str, table: &str, column: &str) -> String {
        match self.flavor {
            Flavor::Postgresql => quote_literal(&format!(
                "{}.{}",
                quote_ident(schema),
                quote_ident(&format!("{table}_{column}_seq"))
            )),
            Flavor::Mysql | Flavor::Sqlite => String::new(),
        }
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
