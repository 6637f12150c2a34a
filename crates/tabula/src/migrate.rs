//! Schema versioning: SQL script execution and startup reconciliation of each
//! schema's stored version against the version the application expects.

mod config;
pub use config::MigrationConfig;

mod manifest;
pub use manifest::{SchemaEntry, VersionManifest};

mod reconcile;
pub use reconcile::{reconcile, status, ReconcileReport, SchemaReport};

mod script;
pub use script::{run_script, split_statements};

mod version;
pub use version::DbVersion;
