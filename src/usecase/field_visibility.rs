use crate::domain::entities::page::PageKey;
use crate::domain::entities::visibility::{DisabledFields, VisibilityUpdate};

/// Hidden search fields for one page, with the settings dialog's draft.
///
/// Saving commits locally first and hands back the persist payload; the
/// caller sends it and reports the outcome. A failed persist is kept for
/// retry as long as it still describes the committed state.
#[derive(Debug, Clone)]
pub struct FieldVisibilityConfig {
    page_key: PageKey,
    committed: DisabledFields,
    draft: Option<DisabledFields>,
    pending_retry: Option<VisibilityUpdate>,
    last_error: Option<String>,
}

impl FieldVisibilityConfig {
    pub fn new(page_key: PageKey) -> Self {
        Self {
            page_key,
            committed: DisabledFields::new(),
            draft: None,
            pending_retry: None,
            last_error: None,
        }
    }

    pub fn page_key(&self) -> &PageKey {
        &self.page_key
    }

    pub fn committed(&self) -> &DisabledFields {
        &self.committed
    }

    pub fn is_disabled(&self, column_id: &str) -> bool {
        self.committed.contains(column_id)
    }

    /// Replaces committed state with what the backend returned on mount.
    pub fn load(&mut self, disabled_fields: Vec<String>) {
        self.committed = disabled_fields.into_iter().collect();
    }

    pub fn open_dialog(&mut self) {
        self.draft = Some(self.committed.clone());
    }

    pub fn is_dialog_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&DisabledFields> {
        self.draft.as_ref()
    }

    pub fn toggle_draft(&mut self, column_id: &str) {
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        if !draft.remove(column_id) {
            draft.insert(column_id.to_string());
        }
    }

    /// Commits the draft, closes the dialog and returns the persist payload.
    /// `None` when the dialog was not open.
    pub fn save(&mut self) -> Option<VisibilityUpdate> {
        let draft = self.draft.take()?;
        self.committed = draft;
        Some(self.current_update())
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }

    pub fn persist_succeeded(&mut self, update: &VisibilityUpdate) {
        if self.pending_retry.as_ref() == Some(update) {
            self.pending_retry = None;
        }
        if *update == self.current_update() {
            self.last_error = None;
        }
    }

    pub fn persist_failed(&mut self, update: VisibilityUpdate, error: impl Into<String>) {
        if update != self.current_update() {
            return;
        }
        self.pending_retry = Some(update);
        self.last_error = Some(error.into());
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Payload to resend after a failed persist.
    pub fn retry(&self) -> Option<VisibilityUpdate> {
        self.pending_retry.clone()
    }

    fn current_update(&self) -> VisibilityUpdate {
        VisibilityUpdate {
            page_key: self.page_key.clone(),
            disabled_fields: self.committed.iter().cloned().collect(),
        }
    }
}
