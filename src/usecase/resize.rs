//! Drag-to-resize state for the search panel.
//!
//! Pointer tracking outside the handle needs a capture resource (global
//! move/up listeners). The controller holds the capture guard only while in
//! the dragging state, so every way out of that state, including dropping the
//! controller, releases it.

pub const DEFAULT_MIN_HEIGHT: f64 = 80.0;
pub const DEFAULT_MAX_HEIGHT: f64 = 320.0;

pub trait InputCapture {
    type Guard;

    fn acquire(&mut self) -> Self::Guard;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelBounds {
    pub min: f64,
    pub max: f64,
}

impl PanelBounds {
    /// Swaps the limits if given in the wrong order.
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn clamp(&self, height: f64) -> f64 {
        height.clamp(self.min, self.max)
    }
}

impl Default for PanelBounds {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_HEIGHT, DEFAULT_MAX_HEIGHT)
    }
}

enum DragState<G> {
    Idle,
    Dragging {
        baseline: f64,
        last_pointer_y: f64,
        _capture: G,
    },
}

pub struct ResizablePanelController<C: InputCapture> {
    height: f64,
    bounds: PanelBounds,
    capture: C,
    state: DragState<C::Guard>,
}

impl<C: InputCapture> ResizablePanelController<C> {
    pub fn new(initial_height: f64, bounds: PanelBounds, capture: C) -> Self {
        Self {
            height: bounds.clamp(initial_height),
            bounds,
            capture,
            state: DragState::Idle,
        }
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn bounds(&self) -> PanelBounds {
        self.bounds
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Height when the current drag started.
    pub fn baseline(&self) -> Option<f64> {
        match &self.state {
            DragState::Dragging { baseline, .. } => Some(*baseline),
            DragState::Idle => None,
        }
    }

    pub fn pointer_down(&mut self, pointer_y: f64) {
        if self.is_dragging() {
            return;
        }
        let capture = self.capture.acquire();
        self.state = DragState::Dragging {
            baseline: self.height,
            last_pointer_y: pointer_y,
            _capture: capture,
        };
    }

    /// Applies the movement since the previous event. Ignored when idle.
    pub fn pointer_move(&mut self, pointer_y: f64) -> f64 {
        if let DragState::Dragging { last_pointer_y, .. } = &mut self.state {
            let delta = pointer_y - *last_pointer_y;
            *last_pointer_y = pointer_y;
            self.height = self.bounds.clamp(self.height + delta);
        }
        self.height
    }

    pub fn pointer_up(&mut self) {
        self.state = DragState::Idle;
    }
}

impl<C: InputCapture> Drop for ResizablePanelController<C> {
    fn drop(&mut self) {
        self.state = DragState::Idle;
    }
}
