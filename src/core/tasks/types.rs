use crate::{
    capture::{
        CaptureError,
        LoginError,
    },
    core::{
        ActivityEvent,
        Credentials,
        TermRecord,
    },
    session::LoadTicket,
};

#[derive(Debug, Clone)]
pub enum TaskResult {
    TasksLoaded { ticket: LoadTicket, result: Result<Vec<TermRecord>, String> },
    ActivityLoaded { ticket: LoadTicket, result: Result<Vec<ActivityEvent>, String> },

    Authorized(Result<Credentials, LoginError>),
    TermCaptured { term: String, result: Result<(), CaptureError> },
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::TasksLoaded { .. } => "tasks_loaded",
            TaskResult::ActivityLoaded { .. } => "activity_loaded",
            TaskResult::Authorized(_) => "authorized",
            TaskResult::TermCaptured { .. } => "term_captured",
        }
    }
}
