use std::path::PathBuf;

use chrono::Local;

use crate::domain::entities::job::JOB_PAGE_KEY;
use crate::domain::entities::page::{PageKey, PageQuery, PageResult};
use crate::domain::entities::row::Row;
use crate::domain::entities::visibility::VisibilityUpdate;
use crate::infra::sqlite::queries::{
    insert_rows_if_empty, load_disabled_fields, query_page, record_job_launch,
    replace_disabled_fields,
};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::repo::{GridRepository, RepoError};

pub struct SqliteRepo {
    pub db_path: PathBuf,
}

impl SqliteRepo {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}

fn to_repo_error(err: anyhow::Error) -> RepoError {
    RepoError::Message(format!("{err:#}"))
}

impl GridRepository for SqliteRepo {
    fn init(&self) -> Result<(), RepoError> {
        init_db(&self.db_path).map_err(to_repo_error)
    }

    fn fetch_page(&self, query: &PageQuery) -> Result<PageResult, RepoError> {
        query_page(&self.db_path, query).map_err(to_repo_error)
    }

    fn get_field_visibility(&self, page_key: &PageKey) -> Result<Vec<String>, RepoError> {
        load_disabled_fields(&self.db_path, page_key).map_err(to_repo_error)
    }

    fn set_field_visibility(&self, update: &VisibilityUpdate) -> Result<(), RepoError> {
        replace_disabled_fields(&self.db_path, &update.page_key, &update.disabled_fields)
            .map_err(to_repo_error)
    }

    fn launch_job(&self, job_name: &str) -> Result<(), RepoError> {
        let launched_at = Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
        let found = record_job_launch(
            &self.db_path,
            &PageKey::from(JOB_PAGE_KEY),
            job_name,
            &launched_at,
        )
        .map_err(to_repo_error)?;
        if found {
            Ok(())
        } else {
            Err(RepoError::UnknownJob(job_name.to_string()))
        }
    }

    fn seed_rows(&self, page_key: &PageKey, rows: &[Row]) -> Result<usize, RepoError> {
        insert_rows_if_empty(&self.db_path, page_key, rows).map_err(to_repo_error)
    }
}
