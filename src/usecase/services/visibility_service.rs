use std::sync::Arc;

use crate::domain::entities::page::PageKey;
use crate::domain::entities::visibility::VisibilityUpdate;
use crate::usecase::ports::repo::{GridRepository, RepoError};

pub struct VisibilityService {
    repo: Arc<dyn GridRepository>,
}

impl VisibilityService {
    pub fn new(repo: Arc<dyn GridRepository>) -> Self {
        Self { repo }
    }

    pub fn load(&self, page_key: &PageKey) -> Result<Vec<String>, RepoError> {
        self.repo.get_field_visibility(page_key)
    }

    pub fn persist(&self, update: &VisibilityUpdate) -> Result<(), RepoError> {
        let result = self.repo.set_field_visibility(update);
        if let Err(err) = &result {
            tracing::warn!(
                page_key = %update.page_key,
                fields = ?update.disabled_fields,
                "persisting field visibility failed: {err}"
            );
        }
        result
    }
}
