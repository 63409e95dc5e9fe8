//! Item use cases.

use crate::error::AppError;
use crate::infra::get_connection;
use crate::infra::xlsx::MAX_CELL_CHARS;
use crate::infra::DbPool;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Deserialize)]
pub struct ItemCreateReq {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ItemUpdateReq {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ItemDeleteManyReq {
    pub item_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct ItemDeleteManyResult {
    pub deleted_count: usize,
}

/// Every stored value must fit in one spreadsheet cell so exports never fail.
fn check_length(field: &str, value: &str) -> Result<(), AppError> {
    if value.chars().count() > MAX_CELL_CHARS {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, MAX_CELL_CHARS
        )));
    }
    Ok(())
}

fn normalize_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }
    check_length("name", name)?;
    Ok(name.to_string())
}

fn normalize_description(description: Option<String>) -> Result<Option<String>, AppError> {
    let description = description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());
    if let Some(d) = &description {
        check_length("description", d)?;
    }
    Ok(description)
}

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<ItemDto> {
    Ok(ItemDto {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
    })
}

pub fn item_create(pool: &DbPool, req: ItemCreateReq) -> Result<ItemDto, AppError> {
    let name = normalize_name(&req.name)?;
    let description = normalize_description(req.description)?;

    let conn = get_connection(pool);
    conn.execute(
        "INSERT INTO items (name, description) VALUES (?1, ?2)",
        params![&name, &description],
    )
    .map_err(|e| AppError::Db(e.to_string()))?;

    Ok(ItemDto {
        id: conn.last_insert_rowid(),
        name,
        description,
    })
}

pub fn item_list(pool: &DbPool) -> Result<Vec<ItemDto>, AppError> {
    let conn = get_connection(pool);
    let mut stmt = conn
        .prepare("SELECT id, name, description FROM items ORDER BY id")
        .map_err(|e| AppError::Db(e.to_string()))?;
    let rows = stmt.query_map([], item_from_row)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| AppError::Db(e.to_string()))?);
    }
    Ok(out)
}

pub fn item_get(pool: &DbPool, id: i64) -> Result<ItemDto, AppError> {
    let conn = get_connection(pool);
    conn.query_row(
        "SELECT id, name, description FROM items WHERE id = ?1",
        [id],
        item_from_row,
    )
    .optional()?
    .ok_or_else(|| AppError::NotFound(format!("item {}", id)))
}

pub fn item_update(pool: &DbPool, id: i64, req: ItemUpdateReq) -> Result<ItemDto, AppError> {
    let name = normalize_name(&req.name)?;
    let description = normalize_description(req.description)?;

    {
        let conn = get_connection(pool);
        let changed = conn
            .execute(
                "UPDATE items SET name = ?1, description = ?2 WHERE id = ?3",
                params![&name, &description, id],
            )
            .map_err(|e| AppError::Db(e.to_string()))?;
        if changed == 0 {
            return Err(AppError::NotFound(format!("item {}", id)));
        }
    } // release conn before calling item_get to avoid deadlock

    item_get(pool, id)
}

pub fn item_delete(pool: &DbPool, id: i64) -> Result<(), AppError> {
    let conn = get_connection(pool);
    let changed = conn
        .execute("DELETE FROM items WHERE id = ?1", [id])
        .map_err(|e| AppError::Db(e.to_string()))?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("item {}", id)));
    }
    Ok(())
}

/// Delete every listed id that exists. Unknown ids are ignored; the result
/// counts rows actually removed.
pub fn item_delete_many(
    pool: &DbPool,
    req: ItemDeleteManyReq,
) -> Result<ItemDeleteManyResult, AppError> {
    log::info!("Group delete request received for IDs: {:?}", req.item_ids);

    if req.item_ids.is_empty() {
        return Err(AppError::Validation("item_ids cannot be empty".into()));
    }
    let invalid: Vec<i64> = req.item_ids.iter().copied().filter(|id| *id <= 0).collect();
    if !invalid.is_empty() {
        log::warn!("Invalid IDs found: {:?}", invalid);
        return Err(AppError::Validation(
            "All item IDs must be positive integers".into(),
        ));
    }

    let ids: BTreeSet<i64> = req.item_ids.into_iter().collect();
    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!("DELETE FROM items WHERE id IN ({})", placeholders);

    let conn = get_connection(pool);
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| AppError::Db(e.to_string()))?;
    let deleted_count = tx
        .execute(&sql, params_from_iter(ids.iter()))
        .map_err(|e| AppError::Db(e.to_string()))?;
    tx.commit().map_err(|e| AppError::Db(e.to_string()))?;

    if deleted_count < ids.len() {
        log::warn!(
            "{} of {} requested items did not exist",
            ids.len() - deleted_count,
            ids.len()
        );
    }
    log::info!("Successfully deleted {} items", deleted_count);
    Ok(ItemDeleteManyResult { deleted_count })
}
