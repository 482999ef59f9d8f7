use crate::grid::Column;

// Queued by widgets during a frame and applied afterwards, so drawing code only needs
// shared references to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    // Grid
    ToggleSort(Column),
    ClearSort,
    SetSearch(String),

    // Dashboard
    OpenDashboard(String),
    CloseDashboard,
    Reload,

    // Capture
    Login(String),
    Logout,
    Capture(String),
}

pub struct ActionQueue {
    actions: Vec<UiAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self { actions: Vec::new() }
    }

    pub fn push(&mut self, action: UiAction) {
        self.actions.push(action);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, UiAction> {
        self.actions.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new()
    }
}
