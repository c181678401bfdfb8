use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn open_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("failed to open db: {}", db_path.display()))?;
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign key enforcement")?;
    Ok(conn)
}

pub fn init_db(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
    }

    let conn = open_connection(db_path)?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS grid_row (
            page_key    TEXT NOT NULL,
            row_idx     INTEGER NOT NULL,
            payload     TEXT NOT NULL,
            PRIMARY KEY (page_key, row_idx)
        );

        CREATE TABLE IF NOT EXISTS field_visibility (
            page_key    TEXT NOT NULL,
            field_id    TEXT NOT NULL,
            PRIMARY KEY (page_key, field_id)
        );

        CREATE TABLE IF NOT EXISTS job_launch (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            job_name    TEXT NOT NULL,
            launched_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_grid_row_page
            ON grid_row(page_key, row_idx);
        ",
    )
    .context("failed to initialize schema")?;

    Ok(())
}
