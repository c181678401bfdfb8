use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::entities::page::PageKey;

/// Column ids hidden from the search panel.
pub type DisabledFields = BTreeSet<String>;

/// Payload of a field-visibility persist call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityUpdate {
    pub page_key: PageKey,
    pub disabled_fields: Vec<String>,
}
