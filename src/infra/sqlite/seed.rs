//! Demo rows written into an empty database on first launch.

use serde_json::{json, Value};

use crate::domain::entities::job::JOB_PAGE_KEY;
use crate::domain::entities::page::PageKey;
use crate::domain::entities::row::Row;
use crate::domain::entities::stock::WATCHLIST_PAGE_KEY;
use crate::usecase::ports::repo::{GridRepository, RepoError};

fn to_row(value: Value) -> Row {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        _ => Row::new(),
    }
}

pub fn job_rows() -> Vec<Row> {
    let jobs = [
        ("stockPriceSync", "STOCK", "ENABLED", "2024-05-02T08:30:00", "COMPLETED", ""),
        ("stockDividendSync", "STOCK", "ENABLED", "2024-05-02T09:00:00", "COMPLETED", ""),
        ("stockSplitCheck", "STOCK", "DISABLED", "2024-04-28T07:45:00", "FAILED", "upstream returned 503"),
        ("dailyQuoteSchedule", "STOCK_SCHEDULE", "ENABLED", "2024-05-02T14:05:00", "RUNNING", ""),
        ("weeklyQuoteSchedule", "STOCK_SCHEDULE", "ENABLED", "2024-04-27T18:00:00", "COMPLETED", ""),
        ("monthlyReport", "STOCK_REPORT", "ENABLED", "2024-05-01T06:00:00", "COMPLETED", ""),
        ("peRatioReport", "STOCK_REPORT", "DISABLED", "2024-03-31T06:00:00", "FAILED", "missing earnings data"),
        ("reportArchive", "REPORT_SCHEDULE", "ENABLED", "2024-05-02T01:00:00", "COMPLETED", ""),
        ("reportMailer", "REPORT_SCHEDULE", "ENABLED", "2024-05-02T07:00:00", "FAILED", "smtp timeout"),
        ("logRotation", "MAINTENANCE_SCHEDULE", "ENABLED", "2024-05-02T00:00:00", "COMPLETED", ""),
        ("cacheWarmup", "MAINTENANCE_SCHEDULE", "DISABLED", "2024-04-15T03:30:00", "COMPLETED", ""),
        ("dbVacuum", "MAINTENANCE_SCHEDULE", "ENABLED", "2024-04-30T02:00:00", "PARTIAL", "2 tables skipped"),
        ("healthCheck", "DEFAULT", "ENABLED", "2024-05-02T14:00:00", "COMPLETED", ""),
        ("sessionCleanup", "DEFAULT", "ENABLED", "2024-05-02T12:00:00", "COMPLETED", ""),
        ("legacyImport", "DEFAULT", "DISABLED", "", "", ""),
    ];

    jobs.into_iter()
        .map(|(name, group, active, executed_at, status, message)| {
            let executed_at = if executed_at.is_empty() {
                Value::Null
            } else {
                Value::from(executed_at)
            };
            let status = if status.is_empty() {
                Value::Null
            } else {
                Value::from(status)
            };
            to_row(json!({
                "jobName": name,
                "taskGroup": group,
                "activeStatus": active,
                "lastExecutionTime": executed_at,
                "lastExecutionStatus": status,
                "resultMessage": message,
            }))
        })
        .collect()
}

pub fn watchlist_rows() -> Vec<Row> {
    let quotes: [(&str, &str, f64, Option<f64>); 34] = [
        ("2330", "2024-05-02", 796.0, Some(23.6)),
        ("2317", "2024-05-02", 152.5, Some(14.2)),
        ("2454", "2024-05-02", 1175.0, Some(19.8)),
        ("2412", "2024-05-02", 118.5, Some(25.1)),
        ("2308", "2024-05-02", 334.0, Some(28.4)),
        ("2881", "2024-05-02", 71.3, Some(12.9)),
        ("2882", "2024-05-02", 53.6, Some(13.5)),
        ("2303", "2024-05-02", 51.2, Some(10.7)),
        ("1301", "2024-05-01", 74.9, None),
        ("1303", "2024-05-01", 69.4, Some(48.0)),
        ("2002", "2024-05-01", 28.15, Some(31.2)),
        ("2603", "2024-05-01", 189.0, Some(7.4)),
        ("2609", "2024-05-01", 61.8, Some(9.1)),
        ("2615", "2024-05-01", 79.6, Some(8.8)),
        ("3008", "2024-04-30", 2480.0, Some(17.3)),
        ("3034", "2024-04-30", 532.0, Some(16.9)),
        ("3711", "2024-04-30", 152.0, Some(18.4)),
        ("2382", "2024-04-30", 297.5, Some(20.5)),
        ("2357", "2024-04-30", 515.0, Some(15.6)),
        ("2395", "2024-04-30", 362.0, Some(24.0)),
        ("4938", "2024-04-29", 99.8, Some(11.2)),
        ("6505", "2024-04-29", 82.4, None),
        ("1216", "2024-04-29", 78.5, Some(21.7)),
        ("2912", "2024-04-29", 262.0, Some(27.9)),
        ("5880", "2024-04-26", 26.9, Some(16.0)),
        ("2891", "2024-04-26", 29.5, Some(12.1)),
        ("2886", "2024-04-26", 38.7, Some(14.8)),
        ("2884", "2024-04-26", 27.35, Some(15.3)),
        ("TSLA", "2024-04-26", 168.29, Some(41.5)),
        ("AAPL", "2024-04-26", 169.3, Some(26.3)),
        ("MSFT", "2024-04-25", 399.04, Some(36.2)),
        ("NVDA", "2024-04-25", 826.32, Some(69.4)),
        ("AMZN", "2024-04-25", 173.67, Some(52.8)),
        ("GOOG", "2024-04-25", 157.95, Some(24.7)),
    ];

    quotes
        .into_iter()
        .map(|(symbol, quote_date, close_price, stock_pe)| {
            to_row(json!({
                "symbol": symbol,
                "quoteDate": quote_date,
                "closePrice": close_price,
                "stockPe": stock_pe,
            }))
        })
        .collect()
}

/// Creates the schema and fills empty pages with the demo rows.
pub fn seed_demo_data(repo: &dyn GridRepository) -> Result<(), RepoError> {
    repo.init()?;
    let jobs = repo.seed_rows(&PageKey::from(JOB_PAGE_KEY), &job_rows())?;
    let quotes = repo.seed_rows(&PageKey::from(WATCHLIST_PAGE_KEY), &watchlist_rows())?;
    if jobs + quotes > 0 {
        tracing::info!(jobs, quotes, "seeded demo rows");
    }
    Ok(())
}
