use crate::Record;

use chrono::{DateTime, Utc};

/// One row of a schema's version history (`db_version`).
///
/// Each schema's first change script must create this table with a
/// `version_id` integer column and a `ran_on` timestamp column.
#[derive(Debug, Clone, PartialEq, Default, Record)]
#[table = "db_version"]
pub struct DbVersion {
    pub version_id: i64,
    pub ran_on: DateTime<Utc>,
}

impl DbVersion {
    /// A history row for `version_id` applied now.
    pub fn applied(version_id: i64) -> DbVersion {
        DbVersion {
            version_id,
            ran_on: Utc::now(),
        }
    }
}
