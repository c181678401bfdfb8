use std::sync::Arc;

use crate::domain::entities::page::{PageKey, PageQuery, PageResult};
use crate::domain::entities::search::Criteria;
use crate::usecase::ports::repo::{GridRepository, RepoError};

pub struct QueryService {
    repo: Arc<dyn GridRepository>,
    page_size: u32,
}

impl QueryService {
    pub fn new(repo: Arc<dyn GridRepository>, page_size: u32) -> Self {
        Self {
            repo,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn query_page(
        &self,
        page_key: &PageKey,
        page: u32,
        criteria: &Criteria,
    ) -> Result<PageResult, RepoError> {
        let query = PageQuery {
            page_key: page_key.clone(),
            page,
            page_size: self.page_size,
            criteria: criteria.clone(),
        };
        tracing::info!(
            page_key = %page_key,
            page,
            criteria = %serde_json::to_string(criteria).unwrap_or_default(),
            "fetching page"
        );
        let result = self.repo.fetch_page(&query);
        match &result {
            Ok(page_result) => tracing::debug!(
                page_key = %page_key,
                page,
                rows = page_result.rows.len(),
                total = page_result.total,
                "page loaded"
            ),
            Err(err) => tracing::warn!(page_key = %page_key, page, "page fetch failed: {err}"),
        }
        result
    }

    pub fn launch_job(&self, job_name: &str) -> Result<(), RepoError> {
        tracing::info!(job = job_name, "launching job");
        self.repo.launch_job(job_name)
    }
}
