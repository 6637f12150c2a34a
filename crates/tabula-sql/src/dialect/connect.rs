use super::{Dialect, Flavor};

use regex::Regex;
use std::{collections::BTreeMap, sync::OnceLock};

/// Connection parameters extracted from a connection string.
pub type ConnectParams = BTreeMap<String, String>;

impl Dialect {
    /// Renders a native connection string.
    pub fn conn_string(
        &self,
        user: &str,
        password: &str,
        host: &str,
        dbname: &str,
        port: &str,
    ) -> String {
        match self.flavor {
            Flavor::Postgresql => format!(
                "user={user} password={password} host={host} dbname={dbname} port={port} sslmode=disable"
            ),
            Flavor::Mysql => format!(
                "{user}:{password}@tcp({host}:{port})/{dbname}?autocommit=true&parseTime=true"
            ),
            Flavor::Sqlite => format!("sqlite:{dbname}"),
        }
    }

    /// Extracts components from a native connection string.
    ///
    /// This is deliberately partial: it exists to find the database name.
    /// PostgreSQL strings are space separated `key=value` pairs (tokens
    /// without `=` are skipped). For MySQL only `dbname` is extracted, from
    /// the `/dbname?` fragment. For SQLite the whole string, minus any
    /// `sqlite:` prefix, is the `dbname`.
    pub fn parse_connect(&self, conn: &str) -> ConnectParams {
        let mut params = ConnectParams::new();

        match self.flavor {
            Flavor::Postgresql => {
                for token in conn.split_whitespace() {
                    if let Some((key, value)) = token.split_once('=') {
                        params.insert(key.to_string(), value.to_string());
                    }
                }
            }
            Flavor::Mysql => {
                static DBNAME: OnceLock<Option<Regex>> = OnceLock::new();
                let re = DBNAME.get_or_init(|| Regex::new(r"/([^/?]+)\?").ok());

                if let Some(captures) = re.as_ref().and_then(|re| re.captures(conn)) {
                    params.insert("dbname".to_string(), captures[1].to_string());
                }
            }
            Flavor::Sqlite => {
                let path = conn.strip_prefix("sqlite:").unwrap_or(conn);
                params.insert("dbname".to_string(), path.to_string());
            }
        }

        params
    }
}
