use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::params;
use serde_json::Value;

use crate::domain::date_format::parse_iso;
use crate::domain::entities::page::{PageKey, PageQuery, PageResult};
use crate::domain::entities::row::{cell, Row};
use crate::domain::entities::search::{Criteria, Criterion};
use crate::domain::values::{cell_bool, cell_number, text_contains};
use crate::infra::sqlite::schema::open_connection;
use crate::usecase::filter::predicate::date_within;

pub fn load_disabled_fields(db_path: &Path, page_key: &PageKey) -> Result<Vec<String>> {
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare(
            "SELECT field_id
             FROM field_visibility
             WHERE page_key = ?1
             ORDER BY field_id ASC",
        )
        .context("failed to prepare field visibility query")?;

    let fields = stmt
        .query_map([page_key.as_str()], |row| row.get::<_, String>(0))
        .context("failed to query field visibility")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to read field visibility rows")?;

    Ok(fields)
}

pub fn replace_disabled_fields(
    db_path: &Path,
    page_key: &PageKey,
    fields: &[String],
) -> Result<()> {
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start field visibility transaction")?;

    tx.execute(
        "DELETE FROM field_visibility WHERE page_key = ?1",
        [page_key.as_str()],
    )
    .context("failed to clear existing field visibility")?;

    let mut insert_stmt = tx
        .prepare(
            "INSERT OR IGNORE INTO field_visibility(page_key, field_id)
             VALUES (?1, ?2)",
        )
        .context("failed to prepare field visibility insert")?;

    for field in fields {
        insert_stmt
            .execute(params![page_key.as_str(), field])
            .context("failed to insert field visibility")?;
    }

    drop(insert_stmt);
    tx.commit()
        .context("failed to commit field visibility updates")?;
    Ok(())
}

/// Writes `rows` for `page_key` unless the page already has rows.
pub fn insert_rows_if_empty(db_path: &Path, page_key: &PageKey, rows: &[Row]) -> Result<usize> {
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start row insert transaction")?;

    let existing: i64 = tx
        .query_row(
            "SELECT COUNT(*) FROM grid_row WHERE page_key = ?1",
            [page_key.as_str()],
            |row| row.get(0),
        )
        .context("failed to count existing rows")?;
    if existing > 0 {
        return Ok(0);
    }

    let mut insert_stmt = tx
        .prepare("INSERT INTO grid_row(page_key, row_idx, payload) VALUES (?1, ?2, ?3)")
        .context("failed to prepare row insert")?;

    for (row_idx, row) in rows.iter().enumerate() {
        let payload = serde_json::to_string(row).context("failed to encode row")?;
        insert_stmt
            .execute(params![page_key.as_str(), row_idx as i64, payload])
            .context("failed to insert row")?;
    }

    drop(insert_stmt);
    tx.commit().context("failed to commit rows")?;
    Ok(rows.len())
}

pub fn load_rows(db_path: &Path, page_key: &PageKey) -> Result<Vec<(i64, Row)>> {
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare(
            "SELECT row_idx, payload
             FROM grid_row
             WHERE page_key = ?1
             ORDER BY row_idx ASC",
        )
        .context("failed to prepare rows query")?;

    let raw_rows = stmt
        .query_map([page_key.as_str()], |row| {
            let row_idx: i64 = row.get(0)?;
            let payload: String = row.get(1)?;
            Ok((row_idx, payload))
        })
        .context("failed to query rows")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to read rows")?;

    raw_rows
        .into_iter()
        .map(|(row_idx, payload)| -> Result<(i64, Row)> {
            let row: Row = serde_json::from_str(&payload)
                .with_context(|| format!("failed to decode row {row_idx} of {page_key}"))?;
            Ok((row_idx, row))
        })
        .collect()
}

/// Stored rows matching the criteria, sliced to the requested page.
pub fn query_page(db_path: &Path, query: &PageQuery) -> Result<PageResult> {
    if query.page_size == 0 {
        anyhow::bail!("page_size must be greater than zero")
    }
    if query.page == 0 {
        anyhow::bail!("page numbers start at 1")
    }

    let matching: Vec<Row> = load_rows(db_path, &query.page_key)?
        .into_iter()
        .map(|(_, row)| row)
        .filter(|row| row_satisfies(row, &query.criteria))
        .collect();

    let total = matching.len() as u64;
    let offset = (query.page as usize - 1) * query.page_size as usize;
    let rows = matching
        .into_iter()
        .skip(offset)
        .take(query.page_size as usize)
        .collect();

    Ok(PageResult { rows, total })
}

/// Marks the job as running. Returns false when no stored row has that name.
pub fn record_job_launch(
    db_path: &Path,
    page_key: &PageKey,
    job_name: &str,
    launched_at: &str,
) -> Result<bool> {
    let target = load_rows(db_path, page_key)?
        .into_iter()
        .find(|(_, row)| row.get("jobName").and_then(Value::as_str) == Some(job_name));
    let Some((row_idx, mut row)) = target else {
        return Ok(false);
    };

    row.insert("lastExecutionStatus".to_string(), Value::from("RUNNING"));
    row.insert("lastExecutionTime".to_string(), Value::from(launched_at));
    row.insert("resultMessage".to_string(), Value::from(""));
    let payload = serde_json::to_string(&row).context("failed to encode row")?;

    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start job launch transaction")?;
    tx.execute(
        "INSERT INTO job_launch(job_name, launched_at) VALUES (?1, ?2)",
        params![job_name, launched_at],
    )
    .context("failed to record job launch")?;
    tx.execute(
        "UPDATE grid_row SET payload = ?1 WHERE page_key = ?2 AND row_idx = ?3",
        params![payload, page_key.as_str(), row_idx],
    )
    .context("failed to update job row")?;
    tx.commit().context("failed to commit job launch")?;
    Ok(true)
}

#[cfg(test)]
pub fn count_job_launches(db_path: &Path, job_name: &str) -> Result<i64> {
    let conn = open_connection(db_path)?;
    conn.query_row(
        "SELECT COUNT(*) FROM job_launch WHERE job_name = ?1",
        [job_name],
        |row| row.get(0),
    )
    .context("failed to count job launches")
}

fn row_satisfies(row: &Row, criteria: &Criteria) -> bool {
    criteria.iter().all(|(column_id, criterion)| {
        let value = cell(row, column_id);
        match criterion {
            Criterion::Text(needle) => value.is_some_and(|v| text_contains(v, needle)),
            Criterion::Number(expected) => {
                let actual = value.and_then(cell_number);
                actual.is_some() && actual == expected.as_f64()
            }
            Criterion::DateRange { from, to } => value
                .and_then(Value::as_str)
                .and_then(parse_iso)
                .is_some_and(|actual| date_within(&actual, from.as_deref(), to.as_deref())),
            Criterion::Boolean(expected) => {
                value.map_or(Some(false), cell_bool) == Some(*expected)
            }
        }
    })
}
