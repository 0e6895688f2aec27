//! Storage semantics of the flat-file store, exercised against real
//! database files in temporary directories.

use breezedb::datatype::{FieldType, Value};
use breezedb::error::BreezeError;
use breezedb::store::{JsonStore, Store};
use tempfile::TempDir;

/// A fresh store with one database already on disk.
fn setup() -> (TempDir, JsonStore, String) {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::new();
    store
        .create_db("test", dir.path().to_str().unwrap())
        .unwrap();
    let db = dir.path().join("test").to_str().unwrap().to_owned();
    (dir, store, db)
}

/// A database with a `people` table holding id/name/active columns and
/// two rows.
fn setup_people() -> (TempDir, JsonStore, String) {
    let (dir, store, db) = setup();
    store.create_table("people", &db).unwrap();
    store
        .create_field("id", FieldType::Int, "people", &db)
        .unwrap();
    store
        .create_field("name", FieldType::Str, "people", &db)
        .unwrap();
    store
        .create_field("active", FieldType::Bool, "people", &db)
        .unwrap();
    store
        .insert_row(
            &["1".to_owned(), "Ada".to_owned(), "true".to_owned()],
            "people",
            &db,
        )
        .unwrap();
    store
        .insert_row(
            &["2".to_owned(), "Grace".to_owned(), "false".to_owned()],
            "people",
            &db,
        )
        .unwrap();
    (dir, store, db)
}

#[test]
fn create_db_writes_an_empty_document() {
    let (_dir, store, db) = setup();
    assert_eq!(store.get_table_list(&db).unwrap(), Vec::<String>::new());
}

#[test]
fn create_db_refuses_an_existing_file() {
    let (dir, store, _db) = setup();
    let err = store
        .create_db("test", dir.path().to_str().unwrap())
        .unwrap_err();
    assert!(matches!(err, BreezeError::Storage(_)), "got {err}");
}

#[test]
fn create_db_refuses_a_missing_parent_directory() {
    let store = JsonStore::new();
    let err = store.create_db("test", "/no/such/directory").unwrap_err();
    assert!(matches!(err, BreezeError::Storage(_)), "got {err}");
}

#[test]
fn remove_db_deletes_only_a_parsable_database() {
    let (dir, store, db) = setup();
    let stray = dir.path().join("notes.txt");
    std::fs::write(&stray, "not a database").unwrap();
    assert!(store.remove_db(stray.to_str().unwrap()).is_err());
    assert!(stray.exists());

    store.remove_db(&db).unwrap();
    assert!(!std::path::Path::new(&db).exists());
}

#[test]
fn duplicate_table_is_rejected() {
    let (_dir, store, db) = setup();
    store.create_table("t", &db).unwrap();
    let err = store.create_table("t", &db).unwrap_err();
    assert!(matches!(err, BreezeError::Storage(_)), "got {err}");
}

#[test]
fn rename_table_refuses_an_existing_target() {
    let (_dir, store, db) = setup();
    store.create_table("a", &db).unwrap();
    store.create_table("b", &db).unwrap();
    assert!(store.rename_table("a", &db, "b").is_err());
    store.rename_table("a", &db, "c").unwrap();
    assert_eq!(
        store.get_table_list(&db).unwrap(),
        vec!["c".to_owned(), "b".to_owned()]
    );
}

#[test]
fn field_lists_keep_declaration_order() {
    let (_dir, store, db) = setup_people();
    assert_eq!(
        store.get_field_list("people", &db).unwrap(),
        vec!["id".to_owned(), "name".to_owned(), "active".to_owned()]
    );
    assert_eq!(
        store.get_field_type("name", "people", &db).unwrap(),
        FieldType::Str
    );
}

#[test]
fn create_field_pads_existing_rows() {
    let (_dir, store, db) = setup_people();
    store
        .create_field("score", FieldType::Int, "people", &db)
        .unwrap();
    assert_eq!(
        store.get_element_list("score", "people", &db).unwrap(),
        vec![Value::Int(0), Value::Int(0)]
    );
    // rows still read whole
    assert_eq!(
        store.get_row(1, "people", &db).unwrap(),
        vec![
            Value::Int(2),
            Value::Str("Grace".to_owned()),
            Value::Bool(false),
            Value::Int(0),
        ]
    );
}

#[test]
fn insert_row_is_all_or_nothing() {
    let (_dir, store, db) = setup_people();
    let err = store
        .insert_row(
            &["3".to_owned(), "Edsger".to_owned(), "not a bool".to_owned()],
            "people",
            &db,
        )
        .unwrap_err();
    assert!(matches!(err, BreezeError::Storage(_)), "got {err}");
    // nothing was pushed on any field
    assert_eq!(
        store.get_element_list("id", "people", &db).unwrap().len(),
        2
    );
    assert_eq!(
        store.get_element_list("name", "people", &db).unwrap().len(),
        2
    );
}

#[test]
fn insert_row_requires_one_value_per_field() {
    let (_dir, store, db) = setup_people();
    let err = store
        .insert_row(&["3".to_owned(), "Edsger".to_owned()], "people", &db)
        .unwrap_err();
    assert!(matches!(err, BreezeError::Storage(_)), "got {err}");
}

#[test]
fn remove_row_shifts_later_rows_down() {
    let (_dir, store, db) = setup_people();
    store.remove_row(0, "people", &db).unwrap();
    assert_eq!(
        store.get_row(0, "people", &db).unwrap(),
        vec![
            Value::Int(2),
            Value::Str("Grace".to_owned()),
            Value::Bool(false),
        ]
    );
    assert!(!store.row_exists(1, "people", &db).unwrap());
}

#[test]
fn row_bounds_are_checked() {
    let (_dir, store, db) = setup_people();
    assert!(store.get_row(2, "people", &db).is_err());
    assert!(store.remove_row(2, "people", &db).is_err());
    assert!(store.get_element(2, "name", "people", &db).is_err());
}

#[test]
fn modify_element_coerces_to_the_field_type() {
    let (_dir, store, db) = setup_people();
    store
        .modify_element(0, "id", "people", &db, "42")
        .unwrap();
    assert_eq!(
        store.get_element(0, "id", "people", &db).unwrap(),
        Value::Int(42)
    );
    let err = store
        .modify_element(0, "id", "people", &db, "forty-two")
        .unwrap_err();
    assert!(matches!(err, BreezeError::Storage(_)), "got {err}");
}

#[test]
fn empty_element_resets_to_the_type_empty_value() {
    let (_dir, store, db) = setup_people();
    store.empty_element(0, "name", "people", &db).unwrap();
    store.empty_element(0, "id", "people", &db).unwrap();
    store.empty_element(0, "active", "people", &db).unwrap();
    assert_eq!(
        store.get_row(0, "people", &db).unwrap(),
        vec![Value::Int(0), Value::Str(String::new()), Value::Bool(false)]
    );
}

#[test]
fn empty_field_keeps_sibling_fields_aligned() {
    let (_dir, store, db) = setup_people();
    store.empty_field("name", "people", &db).unwrap();
    assert_eq!(
        store.get_element_list("name", "people", &db).unwrap(),
        vec![Value::Str(String::new()), Value::Str(String::new())]
    );
    // the other columns are untouched and rows still line up
    assert_eq!(
        store.get_element_list("id", "people", &db).unwrap(),
        vec![Value::Int(1), Value::Int(2)]
    );
    assert!(store.row_exists(1, "people", &db).unwrap());
}

#[test]
fn swap_fields_reorders_rows() {
    let (_dir, store, db) = setup_people();
    store.swap_fields(0, 2, "people", &db).unwrap();
    assert_eq!(
        store.get_field_list("people", &db).unwrap(),
        vec!["active".to_owned(), "name".to_owned(), "id".to_owned()]
    );
    assert_eq!(
        store.get_row(0, "people", &db).unwrap(),
        vec![Value::Bool(true), Value::Str("Ada".to_owned()), Value::Int(1)]
    );
    assert!(store.swap_fields(0, 3, "people", &db).is_err());
}

#[test]
fn search_is_a_case_insensitive_substring_match() {
    let (_dir, store, db) = setup_people();
    assert_eq!(store.search_data("GRA", "people", &db, None).unwrap(), vec![1]);
    // "a" hits Ada and Grace in name, plus false in active at row 1
    assert_eq!(
        store.search_data("a", "people", &db, None).unwrap(),
        vec![0, 1]
    );
    assert_eq!(
        store.search_data("nobody", "people", &db, None).unwrap(),
        Vec::<i64>::new()
    );
}

#[test]
fn search_can_be_narrowed_to_one_field() {
    let (_dir, store, db) = setup_people();
    // row 1 matches "2" only through its id column
    assert_eq!(
        store.search_data("2", "people", &db, Some("name")).unwrap(),
        Vec::<i64>::new()
    );
    assert_eq!(
        store.search_data("2", "people", &db, Some("id")).unwrap(),
        vec![1]
    );
    assert!(store
        .search_data("2", "people", &db, Some("missing"))
        .is_err());
}

#[test]
fn remove_field_and_table_round_trip() {
    let (_dir, store, db) = setup_people();
    assert!(store.field_exists("name", "people", &db).unwrap());
    store.remove_field("name", "people", &db).unwrap();
    assert!(!store.field_exists("name", "people", &db).unwrap());
    assert!(store.remove_field("name", "people", &db).is_err());

    assert!(store.table_exists("people", &db).unwrap());
    store.remove_table("people", &db).unwrap();
    assert!(!store.table_exists("people", &db).unwrap());
}

#[test]
fn rename_field_refuses_an_existing_target() {
    let (_dir, store, db) = setup_people();
    assert!(store.rename_field("id", "people", &db, "name").is_err());
    store
        .rename_field("id", "people", &db, "number")
        .unwrap();
    assert_eq!(
        store.get_field_list("people", &db).unwrap(),
        vec!["number".to_owned(), "name".to_owned(), "active".to_owned()]
    );
}

#[test]
fn operations_on_a_missing_table_are_storage_errors() {
    let (_dir, store, db) = setup();
    let err = store.get_field_list("ghost", &db).unwrap_err();
    assert!(matches!(err, BreezeError::Storage(_)), "got {err}");
    assert!(store.insert_row(&["1".to_owned()], "ghost", &db).is_err());
}
