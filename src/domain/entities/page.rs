use serde::Serialize;

use crate::domain::entities::row::Row;
use crate::domain::entities::search::Criteria;

/// Identifies one logical table; scopes field-visibility persistence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PageKey(pub String);

impl PageKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PageKey {
    fn from(value: &str) -> Self {
        PageKey(value.to_string())
    }
}

impl std::fmt::Display for PageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageQuery {
    pub page_key: PageKey,
    /// 1-based.
    pub page: u32,
    pub page_size: u32,
    pub criteria: Criteria,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub rows: Vec<Row>,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    /// Last page loaded, 0 before the first response.
    pub page: u32,
    pub has_more: bool,
    pub is_loading: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page: 0,
            has_more: true,
            is_loading: false,
        }
    }
}
