use tabula::{db::Builder, migrate::ReconcileReport, Db, Error, Query, Table};

fn assert_sync_send<T: Send + Sync>() {}

#[test]
fn public_types_are_sync_send() {
    assert_sync_send::<Db>();
    assert_sync_send::<Table<'static>>();
    assert_sync_send::<Query>();
    assert_sync_send::<Builder>();
    assert_sync_send::<Error>();
    assert_sync_send::<ReconcileReport>();
}

#[test]
fn db_futures_are_send() {
    fn assert_send<T: Send>(_: T) {}

    fn check(db: Db) {
        assert_send(async move {
            db.fetch_all::<tabula::migrate::DbVersion>(&Query::new())
                .await
                .ok();
            db.insert(&mut tabula::migrate::DbVersion::applied(1)).await.ok();
        });
    }

    let _ = check;
}
