use super::{run_script, DbVersion, MigrationConfig, VersionManifest};
use crate::{Db, Result};

use tabula_core::Error;

/// What reconciliation found, and did, for each schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub schemas: Vec<SchemaReport>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaReport {
    pub name: String,

    /// Version stored in the database before reconciling
    pub found: i64,

    /// Version the manifest expects
    pub target: i64,

    /// Versions applied by this run, in order
    pub applied: Vec<i64>,
}

impl SchemaReport {
    pub fn is_current(&self) -> bool {
        self.found == self.target
    }
}

impl ReconcileReport {
    /// `true` when every schema was already at its target version.
    pub fn is_current(&self) -> bool {
        self.schemas.iter().all(SchemaReport::is_current)
    }

    /// The first schema whose stored version differs from its target.
    pub fn first_mismatch(&self) -> Option<&SchemaReport> {
        self.schemas.iter().find(|schema| !schema.is_current())
    }
}

/// Reads the stored version of every schema in `manifest` without changing
/// anything.
pub async fn status(db: &Db, manifest: &VersionManifest) -> Result<ReconcileReport> {
    let mut report = ReconcileReport::default();

    for entry in manifest.schemas() {
        let found = db.schema_version(&entry.name).await?;
        report.schemas.push(SchemaReport {
            name: entry.name,
            found,
            target: entry.version,
            applied: vec![],
        });
    }

    Ok(report)
}

/// Brings every schema in `manifest` to its target version.
///
/// Without `migrate`, any schema whose stored version differs from its target
/// is a [`Error::is_version_mismatch`] error and nothing is written. With
/// `migrate`, each missing version's change script is run and recorded in the
/// schema's `db_version` table, then every schema's views script is run.
/// The first failure stops reconciliation. A stored version above the target
/// is an error either way.
///
/// The history row is written after the change script's own transaction has
/// committed. If that write fails, the script's changes stay in place while
/// the stored version does not advance, and the error names the script. The
/// next run then replays that script, so the failure needs manual repair.
///
/// Schema names are used verbatim in identifiers; keep them lowercase so
/// PostgreSQL resolves them the same way quoted and unquoted.
pub async fn reconcile(
    db: &Db,
    manifest: &VersionManifest,
    config: &MigrationConfig,
    migrate: bool,
) -> Result<ReconcileReport> {
    let mut report = status(db, manifest).await?;

    for schema in &report.schemas {
        tracing::info!(
            schema = %schema.name,
            found = schema.found,
            target = schema.target,
            "schema version"
        );
    }

    if !migrate {
        if let Some(schema) = report.first_mismatch() {
            return Err(Error::version_mismatch(
                &schema.name,
                schema.found,
                schema.target,
            ));
        }
        return Ok(report);
    }

    // There are no scripts for moving a schema backwards.
    if let Some(schema) = report.schemas.iter().find(|s| s.found > s.target) {
        return Err(Error::version_mismatch(
            &schema.name,
            schema.found,
            schema.target,
        ));
    }

    let driver = db.driver_name();

    for schema in &mut report.schemas {
        for version in (schema.found + 1)..=schema.target {
            let script = config.change_script(driver, &schema.name, version);
            run_script(db, &script).await?;

            db.table_in(&schema.name)
                .insert(&mut DbVersion::applied(version))
                .await
                .map_err(|err| err.context(Error::migration(script.display().to_string())))?;

            tracing::info!(schema = %schema.name, version, "applied");
            schema.applied.push(version);
        }
    }

    for schema in &report.schemas {
        run_script(db, config.views_script(driver, &schema.name)).await?;
    }

    Ok(report)
}
