use std::fmt;

use tracing::warn;
use uuid::Uuid;

use crate::{
    activity::{
        aggregate,
        ActivityCharts,
    },
    core::{
        ActivityEvent,
        TermRecord,
    },
    grid::GridState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One round of dashboard fetches. A reload starts a new round, so completions from an
/// earlier round stop matching the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub session: SessionId,
    pub generation: u64,
}

impl fmt::Display for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.session, self.generation)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
    Failed(String),
}

impl LoadState {
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }
}

/// Everything one mounted dashboard owns. Created when a chat's dashboard is opened and
/// dropped when it is closed or replaced; completions addressed to a dropped session are
/// discarded by the owner.
#[derive(Debug)]
pub struct DashboardSession {
    id: SessionId,
    generation: u64,
    chat_id: String,
    pub grid: GridState,
    charts: Option<ActivityCharts>,
    tasks_state: LoadState,
    activity_state: LoadState,
}

impl DashboardSession {
    pub fn mount(chat_id: impl Into<String>) -> Self {
        Self {
            id: SessionId::new(),
            generation: 0,
            chat_id: chat_id.into(),
            grid: GridState::new(),
            charts: None,
            tasks_state: LoadState::Pending,
            activity_state: LoadState::Pending,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Ticket for the round of fetches currently in flight.
    pub fn ticket(&self) -> LoadTicket {
        LoadTicket { session: self.id, generation: self.generation }
    }

    pub fn accepts(&self, ticket: LoadTicket) -> bool {
        ticket == self.ticket()
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    pub fn charts(&self) -> Option<&ActivityCharts> {
        self.charts.as_ref()
    }

    pub fn tasks_state(&self) -> &LoadState {
        &self.tasks_state
    }

    pub fn activity_state(&self) -> &LoadState {
        &self.activity_state
    }

    pub fn is_loading(&self) -> bool {
        self.tasks_state.is_pending() || self.activity_state.is_pending()
    }

    /// Touches only the grid's backing store; the view state survives a reload.
    pub fn apply_tasks(&mut self, result: Result<Vec<TermRecord>, String>) {
        match result {
            Ok(records) => {
                self.grid.set_records(records);
                self.tasks_state = LoadState::Loaded;
            }
            Err(e) => {
                warn!(chat_id = %self.chat_id, "Task records unavailable: {e}");
                self.tasks_state = LoadState::Failed(e);
            }
        }
    }

    pub fn apply_activity(&mut self, result: Result<Vec<ActivityEvent>, String>) {
        match result {
            Ok(events) => {
                self.charts = Some(aggregate(&events));
                self.activity_state = LoadState::Loaded;
            }
            Err(e) => {
                warn!(chat_id = %self.chat_id, "Activity unavailable: {e}");
                self.activity_state = LoadState::Failed(e);
            }
        }
    }

    /// Back to pending before a reload is issued. Existing data stays visible; the
    /// returned ticket supersedes every earlier one.
    pub fn mark_reloading(&mut self) -> LoadTicket {
        self.generation += 1;
        self.tasks_state = LoadState::Pending;
        self.activity_state = LoadState::Pending;
        self.ticket()
    }
}
