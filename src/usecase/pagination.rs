use crate::domain::entities::page::PaginationState;

/// Drives infinite scroll from the visibility of the last rendered row.
///
/// A load is requested once per transition of the observed row into view.
/// The trigger re-arms when the row leaves view or when a different row
/// becomes the last one.
#[derive(Debug, Clone)]
pub struct PaginationCoordinator {
    state: PaginationState,
    enabled: bool,
    observed_row: Option<usize>,
    in_view: bool,
}

impl PaginationCoordinator {
    pub fn new(enabled: bool) -> Self {
        Self {
            state: PaginationState::default(),
            enabled,
            observed_row: None,
            in_view: false,
        }
    }

    pub fn state(&self) -> PaginationState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Report the visibility of the last rendered row, identified by
    /// `row_marker` (for example the row count). Returns whether
    /// `on_load_more` was invoked.
    pub fn observe_last_row<F>(&mut self, row_marker: usize, visible: bool, on_load_more: F) -> bool
    where
        F: FnOnce(),
    {
        if self.observed_row != Some(row_marker) {
            self.observed_row = Some(row_marker);
            self.in_view = false;
        }

        if !visible {
            self.in_view = false;
            return false;
        }
        if self.in_view {
            return false;
        }
        self.in_view = true;

        if !self.can_load_more() {
            return false;
        }
        on_load_more();
        true
    }

    /// Whether `observe_last_row` with these arguments would change any
    /// state. Lets callers skip a write when scrolling within the same view.
    pub fn observation_changes(&self, row_marker: usize, visible: bool) -> bool {
        self.observed_row != Some(row_marker) || self.in_view != visible
    }

    pub fn can_load_more(&self) -> bool {
        self.enabled && self.state.has_more && !self.state.is_loading
    }

    /// Marks a fetch as in flight and returns the page number to request.
    pub fn begin_load(&mut self) -> u32 {
        self.state.is_loading = true;
        self.state.page + 1
    }

    /// Records a delivered page. `loaded` is the number of rows held after
    /// appending it, `total` the host-reported row count.
    pub fn complete_page(&mut self, page: u32, loaded: u64, total: u64) {
        self.state.page = page;
        self.state.is_loading = false;
        self.state.has_more = loaded < total;
    }

    pub fn fail_load(&mut self) {
        self.state.is_loading = false;
    }

    /// Back to "nothing loaded" for a fresh search.
    pub fn reset(&mut self) {
        self.state = PaginationState::default();
        self.observed_row = None;
        self.in_view = false;
    }
}
