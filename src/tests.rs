use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use proptest::prelude::*;
use rusqlite::Connection;
use serde_json::{json, Value};

use crate::config::{
    ensure_webview_data_dir, load_config_file, merge_config, ConfigError, DEFAULT_PAGE_SIZE,
};
use crate::domain::entities::column::{Column, ColumnSchema};
use crate::domain::entities::job::{ActiveStatus, JOB_PAGE_KEY};
use crate::domain::entities::page::{PageKey, PageQuery};
use crate::domain::entities::row::Row;
use crate::domain::entities::search::{Criteria, Criterion, SearchValue, SearchValuesState};
use crate::domain::entities::sort::SortDirection;
use crate::domain::entities::stock::WATCHLIST_PAGE_KEY;
use crate::domain::entities::visibility::{DisabledFields, VisibilityUpdate};
use crate::infra::sqlite::queries::{count_job_launches, insert_rows_if_empty, query_page};
use crate::infra::sqlite::repo::SqliteRepo;
use crate::infra::sqlite::schema::init_db;
use crate::infra::sqlite::seed::{job_rows, seed_demo_data, watchlist_rows};
use crate::ui::pages::job_drafts::{job_draft_schema, JOB_DRAFTS_PAGE_KEY};
use crate::ui::pages::jobs::job_schema;
use crate::ui::pages::watchlist::watchlist_schema;
use crate::usecase::filter::criteria_store::FilterCriteriaStore;
use crate::usecase::filter::predicate::filter_rows;
use crate::usecase::format::format_cell;
use crate::usecase::grid::{GridModel, RowOwnership};
use crate::usecase::ports::repo::{GridRepository, RepoError};
use crate::usecase::services::query_service::QueryService;
use crate::usecase::services::visibility_service::VisibilityService;
use crate::usecase::sort_engine::SortEngine;

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("grid-console-{prefix}-{nanos}"))
}

fn seeded_repo(prefix: &str) -> (PathBuf, Arc<dyn GridRepository>) {
    let temp_dir = unique_test_dir(prefix);
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let repo: Arc<dyn GridRepository> = Arc::new(SqliteRepo::new(temp_dir.join("app.sqlite")));
    seed_demo_data(repo.as_ref()).expect("seeding should succeed");
    (temp_dir, repo)
}

fn watchlist_query(page: u32, criteria: Criteria) -> PageQuery {
    PageQuery {
        page_key: PageKey::from(WATCHLIST_PAGE_KEY),
        page,
        page_size: 10,
        criteria,
    }
}

#[test]
fn init_db_creates_required_tables() {
    let temp_dir = unique_test_dir("init-db");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let db_path = temp_dir.join("app.sqlite");

    let result = init_db(&db_path);

    assert!(result.is_ok(), "init_db should succeed: {result:?}");

    let conn = Connection::open(&db_path).expect("should open sqlite db");
    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('grid_row','field_visibility','job_launch')",
            [],
            |row| row.get(0),
        )
        .expect("table count query should succeed");

    assert_eq!(table_count, 3, "required tables should exist");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn field_visibility_persists_per_page_key() {
    let (temp_dir, repo) = seeded_repo("field-visibility");
    let service = VisibilityService::new(repo.clone());

    service
        .persist(&VisibilityUpdate {
            page_key: PageKey::from(WATCHLIST_PAGE_KEY),
            disabled_fields: vec!["stockPe".to_string(), "quoteDate".to_string()],
        })
        .expect("should store watchlist visibility");
    service
        .persist(&VisibilityUpdate {
            page_key: PageKey::from(JOB_PAGE_KEY),
            disabled_fields: vec!["taskGroup".to_string()],
        })
        .expect("should store job visibility");

    let watchlist = service
        .load(&PageKey::from(WATCHLIST_PAGE_KEY))
        .expect("should load watchlist visibility");
    let jobs = service
        .load(&PageKey::from(JOB_PAGE_KEY))
        .expect("should load job visibility");
    let drafts = service
        .load(&PageKey::from(JOB_DRAFTS_PAGE_KEY))
        .expect("should load draft visibility");

    assert_eq!(watchlist, vec!["quoteDate".to_string(), "stockPe".to_string()]);
    assert_eq!(jobs, vec!["taskGroup".to_string()]);
    assert!(drafts.is_empty(), "untouched page keys have no hidden fields");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn saving_field_visibility_replaces_previous_fields() {
    let (temp_dir, repo) = seeded_repo("field-visibility-replace");
    let page_key = PageKey::from(WATCHLIST_PAGE_KEY);

    for fields in [vec!["symbol", "stockPe"], vec!["closePrice"], vec![]] {
        repo.set_field_visibility(&VisibilityUpdate {
            page_key: page_key.clone(),
            disabled_fields: fields.iter().map(|f| f.to_string()).collect(),
        })
        .expect("should store visibility");

        let loaded = repo
            .get_field_visibility(&page_key)
            .expect("should load visibility");
        let expected: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
        assert_eq!(loaded, expected);
    }

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn seeding_only_fills_empty_pages() {
    let (temp_dir, repo) = seeded_repo("seed-once");
    let db_path = temp_dir.join("app.sqlite");

    seed_demo_data(repo.as_ref()).expect("second seed should succeed");
    let written = insert_rows_if_empty(&db_path, &PageKey::from(JOB_PAGE_KEY), &job_rows())
        .expect("insert should succeed");

    assert_eq!(written, 0, "pages with rows are left alone");
    let page = query_page(
        &db_path,
        &PageQuery {
            page_key: PageKey::from(JOB_PAGE_KEY),
            page: 1,
            page_size: 100,
            criteria: Criteria::new(),
        },
    )
    .expect("query should succeed");
    assert_eq!(page.total, job_rows().len() as u64);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn query_page_slices_rows_and_reports_total() {
    let (temp_dir, _repo) = seeded_repo("query-page");
    let db_path = temp_dir.join("app.sqlite");
    let total = watchlist_rows().len() as u64;

    let first = query_page(&db_path, &watchlist_query(1, Criteria::new())).expect("page 1");
    let last = query_page(&db_path, &watchlist_query(4, Criteria::new())).expect("page 4");
    let beyond = query_page(&db_path, &watchlist_query(9, Criteria::new())).expect("page 9");

    assert_eq!(first.total, total);
    assert_eq!(first.rows.len(), 10);
    assert_eq!(first.rows[0].get("symbol"), Some(&json!("2330")));
    assert_eq!(last.rows.len(), (total - 30) as usize);
    assert!(beyond.rows.is_empty());
    assert_eq!(beyond.total, total);

    assert!(query_page(&db_path, &watchlist_query(0, Criteria::new())).is_err());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn query_page_applies_sparse_criteria() {
    let (temp_dir, _repo) = seeded_repo("query-criteria");
    let db_path = temp_dir.join("app.sqlite");

    let mut by_symbol = Criteria::new();
    by_symbol.insert("symbol".to_string(), Criterion::Text("ts".to_string()));
    let found = query_page(&db_path, &watchlist_query(1, by_symbol)).expect("text query");
    assert_eq!(found.total, 1);
    assert_eq!(found.rows[0].get("symbol"), Some(&json!("TSLA")));

    let mut by_day = Criteria::new();
    by_day.insert(
        "quoteDate".to_string(),
        Criterion::DateRange {
            from: Some("2024-04-26".to_string()),
            to: Some("2024-04-26".to_string()),
        },
    );
    let found = query_page(&db_path, &watchlist_query(1, by_day.clone())).expect("date query");
    assert_eq!(found.total, 6);

    by_day.insert("symbol".to_string(), Criterion::Text("a".to_string()));
    let found = query_page(&db_path, &watchlist_query(1, by_day)).expect("combined query");
    let symbols: BTreeSet<&str> = found
        .rows
        .iter()
        .filter_map(|row| row.get("symbol").and_then(Value::as_str))
        .collect();
    assert_eq!(symbols, BTreeSet::from(["AAPL", "TSLA"]));

    let mut by_price = Criteria::new();
    by_price.insert(
        "closePrice".to_string(),
        Criterion::Number(serde_json::Number::from(796)),
    );
    let found = query_page(&db_path, &watchlist_query(1, by_price)).expect("number query");
    assert_eq!(found.total, 1);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn launching_a_job_marks_it_running() {
    let (temp_dir, repo) = seeded_repo("launch-job");
    let db_path = temp_dir.join("app.sqlite");
    let service = QueryService::new(repo.clone(), 10);

    service
        .launch_job("healthCheck")
        .expect("known job should launch");

    let mut criteria = Criteria::new();
    criteria.insert(
        "jobName".to_string(),
        Criterion::Text("healthCheck".to_string()),
    );
    let page = service
        .query_page(&PageKey::from(JOB_PAGE_KEY), 1, &criteria)
        .expect("query should succeed");
    assert_eq!(page.rows.len(), 1);
    assert_eq!(page.rows[0].get("lastExecutionStatus"), Some(&json!("RUNNING")));
    assert_eq!(page.rows[0].get("resultMessage"), Some(&json!("")));
    assert_eq!(count_job_launches(&db_path, "healthCheck").expect("count"), 1);

    let err = service
        .launch_job("noSuchJob")
        .expect_err("unknown job should fail");
    assert_eq!(err, RepoError::UnknownJob("noSuchJob".to_string()));
    assert_eq!(count_job_launches(&db_path, "noSuchJob").expect("count"), 0);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn grid_pages_through_sqlite_rows_until_exhausted() {
    let (temp_dir, repo) = seeded_repo("grid-paging");
    let service = QueryService::new(repo, 10);
    let page_key = PageKey::from(WATCHLIST_PAGE_KEY);
    let mut grid = GridModel::new(
        watchlist_schema(),
        page_key.clone(),
        RowOwnership::External,
        true,
    );

    let request = grid.begin_search();
    let first = service
        .query_page(&page_key, 1, &grid.build_criteria())
        .expect("first page");
    assert!(grid.apply_page(request, 1, first));
    assert_eq!(grid.rows().len(), 10);
    assert!(grid.pagination.state().has_more);

    let mut fetches = 0;
    while grid.pagination.can_load_more() {
        let (request, page) = grid.begin_load_more();
        let result = service
            .query_page(&page_key, page, &Criteria::new())
            .expect("next page");
        assert!(grid.apply_page(request, page, result));
        fetches += 1;
    }

    assert_eq!(fetches, 3);
    assert_eq!(grid.rows().len(), watchlist_rows().len());
    assert!(!grid.pagination.state().has_more);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn superseded_search_response_is_ignored() {
    let (temp_dir, repo) = seeded_repo("stale-search");
    let service = QueryService::new(repo, 10);
    let page_key = PageKey::from(WATCHLIST_PAGE_KEY);
    let mut grid = GridModel::new(
        watchlist_schema(),
        page_key.clone(),
        RowOwnership::External,
        true,
    );

    let slow = grid.begin_search();
    grid.criteria.set_text("symbol", "tsla");
    let fast = grid.begin_search();

    let narrowed = service
        .query_page(&page_key, 1, &grid.build_criteria())
        .expect("narrow page");
    let everything = service
        .query_page(&page_key, 1, &Criteria::new())
        .expect("full page");

    assert!(grid.apply_page(fast, 1, narrowed));
    assert!(!grid.apply_page(slow, 1, everything));
    assert_eq!(grid.rows().len(), 1);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn job_schema_formats_status_and_time() {
    let schema = job_schema();
    let row = job_rows()
        .into_iter()
        .find(|row| row.get("jobName") == Some(&json!("stockSplitCheck")))
        .expect("seed job should exist");

    let status = schema.get("lastExecutionStatus").expect("status column");
    let time = schema.get("lastExecutionTime").expect("time column");
    let active = schema.get("activeStatus").expect("active column");
    let action = schema.get("actions").expect("action column");

    assert_eq!(format_cell(status, row.get("lastExecutionStatus")), "Failed");
    assert_eq!(format_cell(time, row.get("lastExecutionTime")), "2024-04-28 07:45:00");
    assert_eq!(format_cell(active, row.get("activeStatus")), "Inactive");
    assert_eq!(status.hint_field.as_deref(), Some("resultMessage"));
    assert!(!action.is_sortable());
    assert!(!action.is_searchable());

    let partial = json!("PARTIAL");
    assert_eq!(format_cell(status, Some(&partial)), "Partial");
    assert_eq!(format_cell(time, Some(&Value::Null)), "-");
}

#[test]
fn draft_grid_keeps_edits_the_hook_rejects() {
    let mut grid = GridModel::new(
        job_draft_schema(),
        PageKey::from(JOB_DRAFTS_PAGE_KEY),
        RowOwnership::Owned,
        false,
    );
    assert!(grid.add_row());

    grid.set_cell_text(0, "jobName", "nightlyExport")
        .expect("edit should apply");
    grid.set_cell_text(0, "taskGroup", "NOT_A_GROUP")
        .expect("edit should apply even though the hook fails");

    let row = grid.row(0).expect("row should exist");
    assert_eq!(row.get("jobName"), Some(&json!("nightlyExport")));
    assert_eq!(row.get("taskGroup"), Some(&json!("NOT_A_GROUP")));
    assert!(grid.set_cell_text(3, "jobName", "x").is_err());
}

#[test]
fn active_status_filter_keeps_only_matching_jobs() {
    let rows = job_rows();
    let schema = job_schema();
    let inactive = rows
        .iter()
        .filter(|row| row.get("activeStatus") == Some(&json!(ActiveStatus::Inactive.code())))
        .count();
    assert!(inactive > 0);

    let mut values = SearchValuesState::new();
    values.insert(
        "activeStatus".to_string(),
        SearchValue::Text(ActiveStatus::Active.code().to_string()),
    );
    let kept = filter_rows(&rows, &schema, &values, &DisabledFields::new());

    assert_eq!(kept.len(), rows.len() - inactive);
    assert!(kept
        .iter()
        .all(|row| row.get("activeStatus") == Some(&json!(ActiveStatus::Active.code()))));

    let (temp_dir, _repo) = seeded_repo("active-status");
    let mut criteria = Criteria::new();
    criteria.insert(
        "activeStatus".to_string(),
        Criterion::Text(ActiveStatus::Active.code().to_string()),
    );
    let page = query_page(
        &temp_dir.join("app.sqlite"),
        &PageQuery {
            page_key: PageKey::from(JOB_PAGE_KEY),
            page: 1,
            page_size: 100,
            criteria,
        },
    )
    .expect("query should succeed");
    assert_eq!(page.total as usize, rows.len() - inactive);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn load_config_file_returns_none_when_missing() {
    let temp_dir = unique_test_dir("config-missing");

    let loaded = load_config_file(&temp_dir.join("config.toml")).expect("missing file is ok");

    assert_eq!(loaded, None);
    assert_eq!(merge_config(loaded).page_size, DEFAULT_PAGE_SIZE);
}

#[test]
fn config_file_overrides_defaults() {
    let temp_dir = unique_test_dir("config-override");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let path = temp_dir.join("config.toml");
    fs::write(
        &path,
        "page_size = 25\npanel_max_height = 400.0\ndb_path = \"/tmp/grid.sqlite\"\n",
    )
    .expect("should write config");

    let config = merge_config(load_config_file(&path).expect("config should parse"));

    assert_eq!(config.page_size, 25);
    assert_eq!(config.panel_max_height, 400.0);
    assert_eq!(config.panel_min_height, 80.0);
    assert_eq!(config.panel_initial_height, 160.0);
    assert_eq!(config.db_path, PathBuf::from("/tmp/grid.sqlite"));

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn config_file_rejects_unknown_keys() {
    let temp_dir = unique_test_dir("config-unknown");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let path = temp_dir.join("config.toml");
    fs::write(&path, "theme = \"dark\"\n").expect("should write config");

    let result = load_config_file(&path);

    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "unknown keys should be rejected: {result:?}"
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn logging_init_creates_log_directory() {
    let temp_dir = unique_test_dir("logging");
    let log_file = temp_dir.join("logs").join("grid-console.log");

    let _ = crate::logging::init(&log_file);

    assert!(
        log_file.parent().is_some_and(|dir| dir.is_dir()),
        "log directory should exist"
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn ensure_webview_data_dir_creates_webview2_subdir() {
    let temp_dir = unique_test_dir("webview-data-dir");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");

    let webview_dir =
        ensure_webview_data_dir(&temp_dir).expect("webview data dir should be created");

    assert_eq!(webview_dir, temp_dir.join("webview2"));
    assert!(webview_dir.is_dir(), "webview2 directory should exist");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

fn price_schema() -> ColumnSchema {
    ColumnSchema::new(vec![
        Column::text("symbol", "Symbol"),
        Column::number("closePrice", "Close Price"),
    ])
}

fn price_rows(prices: &[Option<i64>]) -> Vec<Row> {
    prices
        .iter()
        .enumerate()
        .map(|(idx, price)| {
            let mut row = Row::new();
            row.insert("symbol".to_string(), json!(format!("S{idx}")));
            row.insert(
                "closePrice".to_string(),
                price.map(Value::from).unwrap_or(Value::Null),
            );
            row
        })
        .collect()
}

/// Cells as they show up in practice: JSON numbers from the host, numeric
/// strings from edits, free text and nulls.
fn mixed_cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        (-1000i64..1000).prop_map(Value::from),
        (-1000.0f64..1000.0).prop_map(Value::from),
        "-?[0-9]{1,3}(\\.[0-9]{1,2})?".prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,6}".prop_map(Value::from),
    ]
}

fn cell_rows(cells: &[Value]) -> Vec<Row> {
    cells
        .iter()
        .map(|value| {
            let mut row = Row::new();
            row.insert("closePrice".to_string(), value.clone());
            row
        })
        .collect()
}

proptest! {
    #[test]
    fn empty_or_hidden_criteria_keep_every_row(
        prices in prop::collection::vec(prop::option::of(-1000i64..1000), 0..20),
        needle in "[a-z0-9]{1,4}",
    ) {
        let schema = price_schema();
        let rows = price_rows(&prices);

        let empty = filter_rows(&rows, &schema, &SearchValuesState::new(), &DisabledFields::new());
        prop_assert_eq!(empty.len(), rows.len());

        let mut values = SearchValuesState::new();
        values.insert("symbol".to_string(), SearchValue::Text(needle));
        let hidden: DisabledFields = ["symbol".to_string()].into_iter().collect();
        let kept = filter_rows(&rows, &schema, &values, &hidden);
        prop_assert_eq!(kept.len(), rows.len());
    }

    #[test]
    fn hidden_fields_never_reach_criteria(
        text in "[A-Za-z]{0,6}",
        number in "-?[0-9]{0,4}",
        hide_symbol in any::<bool>(),
        hide_price in any::<bool>(),
    ) {
        let mut store = FilterCriteriaStore::new(Arc::new(price_schema()));
        store.set_text("symbol", &text);
        store.set_number("closePrice", &number);

        let mut hidden = DisabledFields::new();
        if hide_symbol {
            hidden.insert("symbol".to_string());
        }
        if hide_price {
            hidden.insert("closePrice".to_string());
        }

        let criteria = store.build_criteria(&hidden);
        for field in &hidden {
            prop_assert!(!criteria.contains_key(field));
        }
    }

    #[test]
    fn nulls_sort_last_in_both_directions(
        cells in prop::collection::vec(mixed_cell(), 0..40),
        descending in any::<bool>(),
    ) {
        let schema = price_schema();
        let column = schema.get("closePrice").expect("column exists");
        let rows = cell_rows(&cells);
        let mut engine = SortEngine::new();
        engine.toggle(column);
        if descending {
            engine.toggle(column);
        }

        let sorted = engine.sort(&rows);
        let first_null = sorted
            .iter()
            .position(|row| row.get("closePrice") == Some(&Value::Null))
            .unwrap_or(sorted.len());
        prop_assert!(sorted[first_null..]
            .iter()
            .all(|row| row.get("closePrice") == Some(&Value::Null)));
        prop_assert_eq!(sorted.len(), rows.len());
    }

    #[test]
    fn sort_toggle_is_a_two_cycle(clicks in 1usize..12) {
        let schema = price_schema();
        let column = schema.get("symbol").expect("column exists");
        let mut engine = SortEngine::new();

        for _ in 0..clicks {
            engine.toggle(column);
        }

        let expected = if clicks % 2 == 1 { SortDirection::Asc } else { SortDirection::Desc };
        prop_assert_eq!(engine.state().direction, expected);
        prop_assert_eq!(engine.state().field.as_deref(), Some("symbol"));
    }
}
