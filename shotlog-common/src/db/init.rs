//! Database initialization
//!
//! Opens (or creates) the SQLite database and brings the schema up to date.
//! Safe to call on every startup: all DDL is `IF NOT EXISTS`.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection pool and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Use sqlite options to create database if it doesn't exist
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(20)
        .min_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL mode allows concurrent readers while a batch write is in flight,
    // which keeps live subscriptions responsive during uploads
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_shots_table(&pool).await?;

    Ok(pool)
}

/// Create the shots table and its query indexes
///
/// Metric columns are nullable: NULL means the vendor file had no column for
/// that metric, while 0.0 is a real measured value.
async fn create_shots_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shots (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id TEXT NOT NULL,
            batch_id TEXT NOT NULL,
            vendor TEXT NOT NULL,
            row_index INTEGER NOT NULL,
            club TEXT NOT NULL,
            ball_speed REAL,
            club_speed REAL,
            vla REAL,
            peak_height REAL,
            descent_angle REAL,
            spin_rate REAL,
            carry_distance REAL,
            side_total REAL,
            total_distance REAL,
            session_name TEXT NOT NULL DEFAULT '',
            notes TEXT NOT NULL DEFAULT '',
            elevation REAL NOT NULL DEFAULT 0,
            uploaded_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Every query is scoped by owner, session queries by (owner, batch)
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shots_owner ON shots(owner_id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shots_owner_batch ON shots(owner_id, batch_id)")
        .execute(pool)
        .await?;

    info!("Database tables initialized (shots)");

    Ok(())
}
