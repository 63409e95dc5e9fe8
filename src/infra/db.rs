//! SQLite connection and migrations.

use crate::error::AppError;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

pub struct DbPool(pub Mutex<Connection>);

const MIGRATIONS: &[(i32, &str)] = &[(1, include_str!("../../migrations/0001_init.sql"))];

/// Initialize DB at path, run migrations, return managed pool.
pub fn init_db(db_path: &Path) -> Result<DbPool, AppError> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AppError::Db(e.to_string()))?;
    }
    let mut conn = Connection::open(db_path).map_err(|e| AppError::Db(e.to_string()))?;
    run_migrations(&mut conn)?;
    Ok(DbPool(Mutex::new(conn)))
}

/// Fresh in-memory database with all migrations applied.
pub fn init_test_db() -> DbPool {
    let mut conn = Connection::open_in_memory().expect("open in-memory db");
    run_migrations(&mut conn).expect("run migrations");
    DbPool(Mutex::new(conn))
}

fn run_migrations(conn: &mut Connection) -> Result<(), AppError> {
    let tx = conn
        .transaction()
        .map_err(|e| AppError::Db(e.to_string()))?;

    // Ensure schema_migrations exists (first run)
    tx.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (version INTEGER PRIMARY KEY, applied_at TEXT NOT NULL DEFAULT (datetime('now')))",
        [],
    )
    .map_err(|e| AppError::Db(e.to_string()))?;

    let applied: Vec<i32> = tx
        .prepare("SELECT version FROM schema_migrations ORDER BY version")
        .map_err(|e| AppError::Db(e.to_string()))?
        .query_map([], |r| r.get(0))
        .map_err(|e| AppError::Db(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::Db(e.to_string()))?;

    for (version, sql) in MIGRATIONS {
        if applied.contains(version) {
            continue;
        }
        // The script's own bookkeeping INSERT is skipped; it is recorded below.
        let statements = sql
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.contains("INSERT INTO schema_migrations"));
        for stmt in statements {
            tx.execute(stmt, []).map_err(|e| AppError::Db(e.to_string()))?;
        }
        tx.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, datetime('now'))",
            [version],
        )
        .map_err(|e| AppError::Db(e.to_string()))?;
        log::info!("Applied migration {}", version);
    }

    tx.commit().map_err(|e| AppError::Db(e.to_string()))?;
    Ok(())
}

/// Get connection from pool. A poisoned lock is recovered; the connection
/// itself stays valid after a panicking holder.
pub fn get_connection(pool: &DbPool) -> MutexGuard<'_, Connection> {
    pool.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
