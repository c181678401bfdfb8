use thiserror::Error;

use crate::domain::entities::page::{PageKey, PageQuery, PageResult};
use crate::domain::entities::row::Row;
use crate::domain::entities::visibility::VisibilityUpdate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoError {
    #[error("{0}")]
    Message(String),
    #[error("unknown job: {0}")]
    UnknownJob(String),
}

/// Backend the grid pages talk to: row pages, hidden search fields per page
/// and job launches.
pub trait GridRepository: Send + Sync {
    fn init(&self) -> Result<(), RepoError>;

    fn fetch_page(&self, query: &PageQuery) -> Result<PageResult, RepoError>;

    fn get_field_visibility(&self, page_key: &PageKey) -> Result<Vec<String>, RepoError>;
    fn set_field_visibility(&self, update: &VisibilityUpdate) -> Result<(), RepoError>;

    fn launch_job(&self, job_name: &str) -> Result<(), RepoError>;

    /// Stores rows for a page key when it has none yet. Returns how many rows
    /// were written.
    fn seed_rows(&self, page_key: &PageKey, rows: &[Row]) -> Result<usize, RepoError>;
}
