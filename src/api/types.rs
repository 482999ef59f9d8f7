use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    ActivityEvent,
    Credentials,
    TermRecord,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TasksResponse {
    #[serde(default)]
    pub tasks: Vec<TermRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityResponse {
    #[serde(default)]
    pub activity: Vec<ActivityEvent>,
}

/// `{ status }` reply of the add_term endpoint. A missing status counts as a rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorizeResponse {
    #[serde(default)]
    pub status: bool,
    pub chat_id: Option<i64>,
    pub api_key: Option<String>,
}

impl AuthorizeResponse {
    pub fn into_credentials(self) -> Option<Credentials> {
        if !self.status {
            return None;
        }
        match (self.chat_id, self.api_key) {
            (Some(chat_id), Some(api_key)) if !api_key.is_empty() => {
                Some(Credentials { chat_id, api_key })
            }
            _ => None,
        }
    }
}
