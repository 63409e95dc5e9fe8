//! Item CRUD integration tests

use itemsheet::app::{
    item_create, item_delete, item_delete_many, item_get, item_list, item_update, ItemCreateReq,
    ItemDeleteManyReq, ItemUpdateReq,
};
use itemsheet::infra::db::init_test_db;
use itemsheet::infra::DbPool;

// ──────────────────────── Helper ────────────────────────

fn make_create_req(name: &str, description: Option<&str>) -> ItemCreateReq {
    ItemCreateReq {
        name: name.to_string(),
        description: description.map(str::to_string),
    }
}

fn seed(pool: &DbPool, names: &[&str]) -> Vec<i64> {
    names
        .iter()
        .map(|n| item_create(pool, make_create_req(n, None)).unwrap().id)
        .collect()
}

// ══════════════════════════════════════════════════════════
//  item_create
// ══════════════════════════════════════════════════════════

#[test]
fn create_item_returns_dto_with_assigned_id() {
    let pool = init_test_db();
    let dto = item_create(&pool, make_create_req("Pen", Some("Blue pen"))).unwrap();
    assert!(dto.id > 0);
    assert_eq!(dto.name, "Pen");
    assert_eq!(dto.description.as_deref(), Some("Blue pen"));
}

#[test]
fn create_then_list_contains_exactly_one_match() {
    let pool = init_test_db();
    let dto = item_create(&pool, make_create_req("Pen", Some("Blue pen"))).unwrap();
    let items = item_list(&pool).unwrap();
    let matches: Vec<_> = items
        .iter()
        .filter(|i| i.name == "Pen" && i.description.as_deref() == Some("Blue pen"))
        .collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, dto.id);
}

#[test]
fn create_item_trims_name_and_description() {
    let pool = init_test_db();
    let dto = item_create(&pool, make_create_req("  Pen  ", Some("  Blue  "))).unwrap();
    assert_eq!(dto.name, "Pen");
    assert_eq!(dto.description.as_deref(), Some("Blue"));
}

#[test]
fn create_item_blank_description_is_none() {
    let pool = init_test_db();
    let dto = item_create(&pool, make_create_req("Pen", Some("   "))).unwrap();
    assert_eq!(dto.description, None);
    assert_eq!(item_get(&pool, dto.id).unwrap().description, None);
}

#[test]
fn create_item_empty_name_fails() {
    let pool = init_test_db();
    let err = item_create(&pool, make_create_req("   ", Some("x"))).unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
    assert!(item_list(&pool).unwrap().is_empty());
}

#[test]
fn create_allows_duplicate_names() {
    let pool = init_test_db();
    let a = item_create(&pool, make_create_req("Pen", None)).unwrap();
    let b = item_create(&pool, make_create_req("Pen", None)).unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(item_list(&pool).unwrap().len(), 2);
}

// ══════════════════════════════════════════════════════════
//  item_list
// ══════════════════════════════════════════════════════════

#[test]
fn list_empty_db_returns_empty() {
    let pool = init_test_db();
    assert!(item_list(&pool).unwrap().is_empty());
}

#[test]
fn list_returns_items_in_insertion_order() {
    let pool = init_test_db();
    seed(&pool, &["charlie", "alice", "bob"]);
    let names: Vec<String> = item_list(&pool).unwrap().into_iter().map(|i| i.name).collect();
    assert_eq!(names, vec!["charlie", "alice", "bob"]);
}

// ══════════════════════════════════════════════════════════
//  item_update / item_get
// ══════════════════════════════════════════════════════════

#[test]
fn update_replaces_both_fields() {
    let pool = init_test_db();
    let dto = item_create(&pool, make_create_req("Pen", Some("Blue pen"))).unwrap();
    let updated = item_update(
        &pool,
        dto.id,
        ItemUpdateReq {
            name: "Pencil".to_string(),
            description: Some("HB".to_string()),
        },
    )
    .unwrap();
    assert_eq!(updated.id, dto.id);
    assert_eq!(updated.name, "Pencil");
    assert_eq!(updated.description.as_deref(), Some("HB"));

    let read = item_get(&pool, dto.id).unwrap();
    assert_eq!(read, updated);
}

#[test]
fn update_without_description_clears_it() {
    let pool = init_test_db();
    let dto = item_create(&pool, make_create_req("Pen", Some("Blue pen"))).unwrap();
    let updated = item_update(
        &pool,
        dto.id,
        ItemUpdateReq {
            name: "Pen".to_string(),
            description: None,
        },
    )
    .unwrap();
    assert_eq!(updated.description, None);
}

#[test]
fn update_nonexistent_fails_not_found() {
    let pool = init_test_db();
    let err = item_update(
        &pool,
        42,
        ItemUpdateReq {
            name: "Ghost".to_string(),
            description: None,
        },
    )
    .unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

#[test]
fn update_empty_name_fails_and_keeps_row() {
    let pool = init_test_db();
    let dto = item_create(&pool, make_create_req("Pen", None)).unwrap();
    let err = item_update(
        &pool,
        dto.id,
        ItemUpdateReq {
            name: "".to_string(),
            description: None,
        },
    )
    .unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
    assert_eq!(item_get(&pool, dto.id).unwrap().name, "Pen");
}

#[test]
fn update_with_oversized_name_fails_and_keeps_row() {
    let pool = init_test_db();
    let dto = item_create(&pool, make_create_req("Pen", Some("Blue pen"))).unwrap();
    let err = item_update(
        &pool,
        dto.id,
        ItemUpdateReq {
            name: "n".repeat(32_768),
            description: None,
        },
    )
    .unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
    assert_eq!(item_get(&pool, dto.id).unwrap(), dto);
}

#[test]
fn get_nonexistent_fails_not_found() {
    let pool = init_test_db();
    assert_eq!(item_get(&pool, 7).unwrap_err().code(), "NOT_FOUND");
}

// ══════════════════════════════════════════════════════════
//  item_delete
// ══════════════════════════════════════════════════════════

#[test]
fn delete_removes_exactly_one_row() {
    let pool = init_test_db();
    let ids = seed(&pool, &["a", "b", "c"]);
    item_delete(&pool, ids[1]).unwrap();
    let remaining: Vec<i64> = item_list(&pool).unwrap().into_iter().map(|i| i.id).collect();
    assert_eq!(remaining, vec![ids[0], ids[2]]);
}

#[test]
fn delete_twice_fails_not_found_second_time() {
    let pool = init_test_db();
    let ids = seed(&pool, &["a"]);
    item_delete(&pool, ids[0]).unwrap();
    assert_eq!(item_delete(&pool, ids[0]).unwrap_err().code(), "NOT_FOUND");
}

#[test]
fn ids_are_not_reused_after_deleting_latest() {
    let pool = init_test_db();
    let ids = seed(&pool, &["a", "b"]);
    item_delete(&pool, ids[1]).unwrap();
    let next = item_create(&pool, make_create_req("c", None)).unwrap();
    assert!(next.id > ids[1]);
}

// ══════════════════════════════════════════════════════════
//  item_delete_many
// ══════════════════════════════════════════════════════════

#[test]
fn delete_many_ignores_missing_ids() {
    let pool = init_test_db();
    let ids = seed(&pool, &["a", "b", "c"]);
    item_delete(&pool, ids[1]).unwrap();

    let res = item_delete_many(
        &pool,
        ItemDeleteManyReq {
            item_ids: ids.clone(),
        },
    )
    .unwrap();
    assert_eq!(res.deleted_count, 2);
    assert!(item_list(&pool).unwrap().is_empty());
}

#[test]
fn delete_many_leaves_unlisted_rows() {
    let pool = init_test_db();
    let ids = seed(&pool, &["a", "b", "c"]);
    let res = item_delete_many(
        &pool,
        ItemDeleteManyReq {
            item_ids: vec![ids[0], 999],
        },
    )
    .unwrap();
    assert_eq!(res.deleted_count, 1);
    assert_eq!(item_list(&pool).unwrap().len(), 2);
}

#[test]
fn delete_many_counts_duplicate_ids_once() {
    let pool = init_test_db();
    let ids = seed(&pool, &["a"]);
    let res = item_delete_many(
        &pool,
        ItemDeleteManyReq {
            item_ids: vec![ids[0], ids[0]],
        },
    )
    .unwrap();
    assert_eq!(res.deleted_count, 1);
}

#[test]
fn delete_many_empty_list_fails_validation() {
    let pool = init_test_db();
    seed(&pool, &["a"]);
    let err = item_delete_many(&pool, ItemDeleteManyReq { item_ids: vec![] }).unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
    assert_eq!(item_list(&pool).unwrap().len(), 1);
}

#[test]
fn delete_many_non_positive_id_fails_and_deletes_nothing() {
    let pool = init_test_db();
    let ids = seed(&pool, &["a", "b"]);
    let err = item_delete_many(
        &pool,
        ItemDeleteManyReq {
            item_ids: vec![ids[0], 0, -3],
        },
    )
    .unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
    assert_eq!(item_list(&pool).unwrap().len(), 2);
}
