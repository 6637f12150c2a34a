use tabula::{
    migrate::{reconcile, status, MigrationConfig},
    Db, Flavor,
};
use tabula_core::driver::operation::Transaction;
use tempfile::TempDir;
use tests::{exec, prelude::*, query_i64, tests, Column, DbTest};

use pretty_assertions::assert_eq;
use std::fs;

/// Change and view scripts for the test schema, laid out in a temp dir.
struct Scripts {
    _dir: TempDir,
    config: MigrationConfig,
    driver: &'static str,
    schema: String,
}

impl Scripts {
    fn new(test: &DbTest, db: &Db) -> Scripts {
        let dir = tempfile::tempdir().unwrap();
        let config = MigrationConfig::new().base_path(dir.path());
        fs::create_dir_all(dir.path().join(&config.changes_path)).unwrap();
        fs::create_dir_all(dir.path().join(&config.objects_path)).unwrap();

        Scripts {
            _dir: dir,
            config,
            driver: db.driver_name(),
            schema: test.schema(),
        }
    }

    fn change(&self, version: i64, statements: &[String]) {
        self.change_in(&self.schema, version, statements);
    }

    fn change_in(&self, schema: &str, version: i64, statements: &[String]) {
        let path = self.config.change_script(self.driver, schema, version);
        fs::write(path, statements.join(";\n")).unwrap();
    }

    fn views(&self, statements: &[String]) {
        self.views_in(&self.schema, statements);
    }

    fn views_in(&self, schema: &str, statements: &[String]) {
        let path = self.config.views_script(self.driver, schema);
        fs::write(path, statements.join(";\n")).unwrap();
    }
}

fn table(test: &DbTest, db: &Db, name: &str) -> String {
    db.dialect().table_name(&test.schema(), name)
}

/// Version 1 creates the history and `note` tables, version 2 seeds `note`.
/// The views script defines `note_titles` over `note`.
fn standard_scripts(test: &DbTest, db: &Db) -> Scripts {
    let scripts = Scripts::new(test, db);
    let note = table(test, db, "note");
    let view = table(test, db, "note_titles");

    scripts.change(
        1,
        &[
            test.ddl(
                db,
                "db_version",
                &[("version_id", Column::Int), ("ran_on", Column::Timestamp)],
            ),
            test.ddl(db, "note", &[("id", Column::Id), ("title", Column::Text)]),
        ],
    );
    scripts.change(
        2,
        &[
            format!("INSERT INTO {note} (title) VALUES ('first')"),
            format!("INSERT INTO {note} (title) VALUES ('second')"),
        ],
    );
    scripts.views(&[
        format!("DROP VIEW IF EXISTS {view}"),
        format!("CREATE VIEW {view} AS SELECT title FROM {note}"),
    ]);

    scripts
}

async fn history_rows(test: &DbTest, db: &Db) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM {}", table(test, db, "db_version"));
    assert_ok!(query_i64(db, &sql).await)
}

async fn migrates_empty_schema(test: &mut DbTest) {
    let db = test.setup_db().await;
    let scripts = standard_scripts(test, &db);

    assert!(assert_ok!(db.is_schema_empty(&test.schema()).await));
    assert_eq!(assert_ok!(db.schema_version(&test.schema()).await), 0);

    let report = assert_ok!(reconcile(&db, &test.manifest(2), &scripts.config, true).await);
    assert_eq!(report.schemas.len(), 1);
    assert_eq!(report.schemas[0].found, 0);
    assert_eq!(report.schemas[0].target, 2);
    assert_eq!(report.schemas[0].applied, [1, 2]);
    assert!(!report.is_current());

    assert!(!assert_ok!(db.is_schema_empty(&test.schema()).await));
    assert_eq!(assert_ok!(db.schema_version(&test.schema()).await), 2);
    assert_eq!(history_rows(test, &db).await, 2);

    let sql = format!("SELECT COUNT(*) FROM {}", table(test, &db, "note_titles"));
    assert_eq!(assert_ok!(query_i64(&db, &sql).await), 2);
}

async fn second_run_is_idempotent(test: &mut DbTest) {
    let db = test.setup_db().await;
    let scripts = standard_scripts(test, &db);
    let manifest = test.manifest(2);

    assert_ok!(reconcile(&db, &manifest, &scripts.config, true).await);

    let mut log = test.log();
    log.clear();

    let report = assert_ok!(reconcile(&db, &manifest, &scripts.config, true).await);
    assert!(report.is_current());
    assert!(report.schemas[0].applied.is_empty());
    assert_eq!(history_rows(test, &db).await, 2);

    // Views are rebuilt on every run, but no change script is replayed.
    assert_eq!(log.count_sql("CREATE VIEW"), 1);
    assert_eq!(log.count_sql("INSERT"), 0);
}

async fn upgrades_one_version_at_a_time(test: &mut DbTest) {
    let db = test.setup_db().await;
    let scripts = standard_scripts(test, &db);

    let report = assert_ok!(reconcile(&db, &test.manifest(1), &scripts.config, true).await);
    assert_eq!(report.schemas[0].applied, [1]);
    assert_eq!(assert_ok!(db.schema_version(&test.schema()).await), 1);

    let report = assert_ok!(reconcile(&db, &test.manifest(2), &scripts.config, true).await);
    assert_eq!(report.schemas[0].found, 1);
    assert_eq!(report.schemas[0].applied, [2]);
    assert_eq!(history_rows(test, &db).await, 2);
}

async fn mismatch_without_migrate_writes_nothing(test: &mut DbTest) {
    let db = test.setup_db().await;
    let scripts = standard_scripts(test, &db);

    let mut log = test.log();
    log.clear();

    let err = assert_err!(reconcile(&db, &test.manifest(1), &scripts.config, false).await);
    assert!(err.is_version_mismatch(), "{err}");

    assert_eq!(log.count_sql("CREATE"), 0);
    assert_eq!(log.count_sql("INSERT"), 0);
    assert!(!log.has_transaction(Transaction::Start));
    assert!(assert_ok!(db.is_schema_empty(&test.schema()).await));
}

async fn current_schema_passes_without_migrate(test: &mut DbTest) {
    let db = test.setup_db().await;
    let scripts = standard_scripts(test, &db);
    let manifest = test.manifest(2);

    assert_ok!(reconcile(&db, &manifest, &scripts.config, true).await);

    let report = assert_ok!(reconcile(&db, &manifest, &scripts.config, false).await);
    assert!(report.is_current());

    let report = assert_ok!(status(&db, &manifest).await);
    assert!(report.is_current());
    assert_eq!(report.schemas[0].found, 2);
}

async fn failing_script_rolls_back(test: &mut DbTest) {
    let db = test.setup_db().await;
    let scripts = standard_scripts(test, &db);
    let note = table(test, &db, "note");

    scripts.change(
        2,
        &[
            format!("INSERT INTO {note} (title) VALUES ('lost')"),
            format!("INSERT INTO {} (title) VALUES ('boom')", table(test, &db, "missing")),
        ],
    );

    let log = test.log();
    let err = assert_err!(reconcile(&db, &test.manifest(2), &scripts.config, true).await);
    assert!(err.is_migration(), "{err}");
    assert!(err.to_string().contains("0002"), "{err}");
    assert!(log.has_transaction(Transaction::Rollback));

    // Version 1 stays applied; nothing of version 2 survives.
    assert_eq!(assert_ok!(db.schema_version(&test.schema()).await), 1);
    let sql = format!("SELECT COUNT(*) FROM {note}");
    assert_eq!(assert_ok!(query_i64(&db, &sql).await), 0);
}

async fn stored_version_above_target_fails(test: &mut DbTest) {
    let db = test.setup_db().await;
    let scripts = standard_scripts(test, &db);

    assert_ok!(reconcile(&db, &test.manifest(2), &scripts.config, true).await);

    let err = assert_err!(reconcile(&db, &test.manifest(1), &scripts.config, true).await);
    assert!(err.is_version_mismatch(), "{err}");
    assert_eq!(history_rows(test, &db).await, 2);
}

async fn missing_change_script_fails(test: &mut DbTest) {
    let db = test.setup_db().await;
    let scripts = standard_scripts(test, &db);

    let err = assert_err!(reconcile(&db, &test.manifest(3), &scripts.config, true).await);
    assert!(err.is_migration(), "{err}");

    // Versions before the gap are applied and recorded.
    assert_eq!(assert_ok!(db.schema_version(&test.schema()).await), 2);
}

async fn missing_views_script_fails(test: &mut DbTest) {
    let db = test.setup_db().await;
    let scripts = standard_scripts(test, &db);
    fs::remove_file(scripts.config.views_script(scripts.driver, &scripts.schema)).unwrap();

    let err = assert_err!(reconcile(&db, &test.manifest(1), &scripts.config, true).await);
    assert!(err.is_migration(), "{err}");
}

async fn run_script_directly(test: &mut DbTest) {
    let db = test.setup_db().await;
    let scripts = standard_scripts(test, &db);

    let path = scripts.config.change_script(scripts.driver, &scripts.schema, 1);
    assert_ok!(db.run_script(&path).await);

    assert!(!assert_ok!(db.is_schema_empty(&test.schema()).await));
    assert_eq!(history_rows(test, &db).await, 0);
}

async fn history_write_failure_keeps_script_changes(test: &mut DbTest) {
    let db = test.setup_db().await;
    let scripts = Scripts::new(test, &db);

    // The history table lacks `ran_on`, so recording version 1 fails.
    scripts.change(
        1,
        &[
            test.ddl(&db, "db_version", &[("version_id", Column::Int)]),
            test.ddl(&db, "note", &[("id", Column::Id), ("title", Column::Text)]),
        ],
    );
    scripts.views(&[]);

    let err = assert_err!(reconcile(&db, &test.manifest(1), &scripts.config, true).await);
    assert!(err.is_migration(), "{err}");
    assert!(err.to_string().contains("0001"), "{err}");

    // The script committed; the version did not advance.
    let sql = format!("SELECT COUNT(*) FROM {}", table(test, &db, "note"));
    assert_eq!(assert_ok!(query_i64(&db, &sql).await), 0);
    assert_eq!(assert_ok!(db.schema_version(&test.schema()).await), 0);
}

async fn schema_named_as_prefix_of_another(test: &mut DbTest) {
    let outer = test.schema();
    let inner = format!("{outer}_data");
    let both = test.manifest_for(&[(&outer, 1), (&inner, 1)]);

    let mut builder = Db::builder();
    builder.manifest(both.clone());
    let db = test.setup_db_with(builder).await;

    if db.dialect().flavor() == Flavor::Postgresql {
        assert_ok!(exec(&db, &format!("CREATE SCHEMA \"{inner}\"")).await);
    }

    let scripts = Scripts::new(test, &db);
    for schema in [&outer, &inner] {
        scripts.change_in(
            schema,
            1,
            &[test.ddl_in(
                &db,
                schema,
                "db_version",
                &[("version_id", Column::Int), ("ran_on", Column::Timestamp)],
            )],
        );
        scripts.views_in(schema, &[]);
    }

    // Only the longer-named schema exists at first.
    let inner_only = test.manifest_for(&[(&inner, 1)]);
    assert_ok!(reconcile(&db, &inner_only, &scripts.config, true).await);

    assert!(assert_ok!(db.is_schema_empty(&outer).await));
    assert!(!assert_ok!(db.is_schema_empty(&inner).await));
    assert_eq!(assert_ok!(db.schema_version(&outer).await), 0);

    let report = assert_ok!(reconcile(&db, &both, &scripts.config, true).await);
    let applied: Vec<_> = report
        .schemas
        .iter()
        .map(|schema| (schema.name.as_str(), schema.found, schema.applied.clone()))
        .collect();
    assert_eq!(
        applied,
        [(outer.as_str(), 0, vec![1]), (inner.as_str(), 1, vec![])]
    );

    assert_eq!(assert_ok!(db.schema_version(&outer).await), 1);
    assert_eq!(assert_ok!(db.schema_version(&inner).await), 1);

    if db.dialect().flavor() == Flavor::Postgresql {
        assert_ok!(exec(&db, &format!("DROP SCHEMA \"{inner}\" CASCADE")).await);
    }
}

tests!(
    history_write_failure_keeps_script_changes,
    schema_named_as_prefix_of_another,
    migrates_empty_schema,
    second_run_is_idempotent,
    upgrades_one_version_at_a_time,
    mismatch_without_migrate_writes_nothing,
    current_schema_passes_without_migrate,
    failing_script_rolls_back,
    stored_version_above_target_fails,
    missing_change_script_fails,
    missing_views_script_fails,
    run_script_directly,
);
