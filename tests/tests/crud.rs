use tabula::{Db, Record};
use tests::{prelude::*, query_i64, tests, Column, DbTest};

use pretty_assertions::assert_eq;

#[derive(Debug, Clone, Default, PartialEq, Record)]
struct Person {
    id: i64,
    first_name: String,
    nick: Option<String>,
    age: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Record)]
#[table = "tags"]
struct Tag {
    #[key]
    tag_no: i64,
    label: String,
}

async fn setup(test: &mut DbTest) -> Db {
    let db = test.setup_db().await;
    test.create_table(
        &db,
        "person",
        &[
            ("id", Column::Id),
            ("first_name", Column::Text),
            ("nick", Column::OptionalText),
            ("age", Column::Int),
        ],
    )
    .await;
    db
}

fn person(first_name: &str, age: i64) -> Person {
    Person {
        first_name: first_name.to_string(),
        age,
        ..Person::default()
    }
}

async fn insert_then_fetch(test: &mut DbTest) {
    let db = setup(test).await;

    let mut ada = Person {
        nick: Some("countess".to_string()),
        ..person("Ada", 36)
    };
    assert_ok!(db.insert(&mut ada).await);
    assert!(ada.id > 0);

    let mut grace = person("Grace", 85);
    assert_ok!(db.insert(&mut grace).await);
    assert!(grace.id > ada.id);

    let mut loaded = Person {
        id: ada.id,
        ..Person::default()
    };
    assert_ok!(db.fetch(&mut loaded).await);
    assert_eq!(loaded, ada);

    let mut loaded = Person {
        id: grace.id,
        ..Person::default()
    };
    assert_ok!(db.fetch(&mut loaded).await);
    assert_eq!(loaded.nick, None);
    assert_eq!(loaded, grace);
}

async fn update_writes_every_column(test: &mut DbTest) {
    let db = setup(test).await;

    let mut ada = person("Ada", 36);
    assert_ok!(db.insert(&mut ada).await);

    ada.first_name = "Augusta".to_string();
    ada.nick = Some("enchantress".to_string());
    ada.age = 37;
    assert_eq!(assert_ok!(db.update(&ada).await), 1);

    let mut loaded = Person {
        id: ada.id,
        ..Person::default()
    };
    assert_ok!(db.fetch(&mut loaded).await);
    assert_eq!(loaded, ada);
}

async fn update_missing_row_changes_nothing(test: &mut DbTest) {
    let db = setup(test).await;

    let ghost = Person {
        id: 4242,
        ..person("Nobody", 1)
    };
    assert_eq!(assert_ok!(db.update(&ghost).await), 0);

    let sql = format!(
        "SELECT COUNT(*) FROM {}",
        db.dialect().table_name(&test.schema(), "person")
    );
    assert_eq!(assert_ok!(query_i64(&db, &sql).await), 0);
}

async fn delete_removes_row(test: &mut DbTest) {
    let db = setup(test).await;

    let mut ada = person("Ada", 36);
    let mut grace = person("Grace", 85);
    assert_ok!(db.insert(&mut ada).await);
    assert_ok!(db.insert(&mut grace).await);

    assert_eq!(assert_ok!(db.delete(&ada).await), 1);
    assert_eq!(assert_ok!(db.delete(&ada).await), 0);

    let mut loaded = Person {
        id: ada.id,
        ..Person::default()
    };
    let err = assert_err!(db.fetch(&mut loaded).await);
    assert!(err.is_record_not_found(), "{err}");
    assert_eq!(loaded.first_name, "");

    let mut loaded = Person {
        id: grace.id,
        ..Person::default()
    };
    assert_ok!(db.fetch(&mut loaded).await);
    assert_eq!(loaded, grace);
}

async fn unset_identity_sends_nothing(test: &mut DbTest) {
    let db = setup(test).await;
    let mut log = test.log();
    log.clear();

    let mut unsaved = person("Ada", 36);
    assert_eq!(assert_ok!(db.update(&unsaved).await), 0);
    assert_eq!(assert_ok!(db.delete(&unsaved).await), 0);
    assert_ok!(db.fetch(&mut unsaved).await);
    assert_eq!(unsaved, person("Ada", 36));

    unsaved.id = -3;
    assert_eq!(assert_ok!(db.update(&unsaved).await), 0);
    assert_ok!(db.fetch(&mut unsaved).await);

    assert!(log.is_empty(), "{:?}", log.sql());
}

async fn insert_with_caller_identity(test: &mut DbTest) {
    let db = setup(test).await;
    let mut log = test.log();
    log.clear();

    let ada = Person {
        id: 77,
        ..person("Ada", 36)
    };
    assert_ok!(db.insert_without_auto_id(&ada).await);

    // Nothing is read back.
    assert_eq!(log.len(), 1);
    assert!(log.sql()[0].contains("id"));

    let mut loaded = Person {
        id: 77,
        ..Person::default()
    };
    assert_ok!(db.fetch(&mut loaded).await);
    assert_eq!(loaded, ada);
}

async fn explicit_key_and_table_override(test: &mut DbTest) {
    let db = test.setup_db().await;
    test.create_table(&db, "tags", &[("tag_no", Column::Id), ("label", Column::Text)])
        .await;

    let mut tag = Tag {
        label: "rust".to_string(),
        ..Tag::default()
    };
    assert_ok!(db.insert(&mut tag).await);
    assert!(tag.tag_no > 0);

    tag.label = "systems".to_string();
    assert_eq!(assert_ok!(db.update(&tag).await), 1);

    let mut loaded = Tag {
        tag_no: tag.tag_no,
        ..Tag::default()
    };
    assert_ok!(db.fetch(&mut loaded).await);
    assert_eq!(loaded.label, "systems");
}

async fn delete_where_removes_matching_rows(test: &mut DbTest) {
    let db = setup(test).await;

    for (name, age) in [("Ada", 36), ("Grace", 85), ("Linus", 21), ("Barbara", 90)] {
        assert_ok!(db.insert(&mut person(name, age)).await);
    }

    assert_eq!(assert_ok!(db.delete_where::<Person>("age > 50").await), 2);
    assert_eq!(assert_ok!(db.delete_where::<Person>("age > 50").await), 0);

    let remaining: Vec<Person> = assert_ok!(db.fetch_all(&tabula::Query::new().order("age")).await);
    let names: Vec<_> = remaining.iter().map(|p| p.first_name.as_str()).collect();
    assert_eq!(names, ["Linus", "Ada"]);
}

async fn insert_failure_leaves_record_untouched(test: &mut DbTest) {
    let db = test.setup_db().await;

    // No table was created.
    let mut ada = person("Ada", 36);
    let err = assert_err!(db.insert(&mut ada).await);
    assert!(err.is_driver_operation_failed(), "{err}");
    assert_eq!(ada.id, 0);
}

async fn explicit_schema_table_access(test: &mut DbTest) {
    let db = setup(test).await;
    let schema = test.schema();

    let mut ada = person("Ada", 36);
    assert_ok!(db.table_in(&schema).insert(&mut ada).await);

    let mut loaded = Person {
        id: ada.id,
        ..Person::default()
    };
    assert_ok!(db.table().fetch(&mut loaded).await);
    assert_eq!(loaded, ada);
}

tests!(
    insert_then_fetch,
    update_writes_every_column,
    update_missing_row_changes_nothing,
    delete_removes_row,
    unset_identity_sends_nothing,
    insert_with_caller_identity,
    explicit_key_and_table_override,
    delete_where_removes_matching_rows,
    insert_failure_leaves_record_untouched,
    explicit_schema_table_access,
);
