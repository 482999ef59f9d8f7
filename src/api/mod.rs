pub mod types;

use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;
pub use types::{
    ActivityResponse,
    AuthorizeResponse,
    StatusResponse,
    TasksResponse,
};

use crate::{
    core::{
        http::{
            fetch_typed,
            http_client,
            join_url,
        },
        ActivityEvent,
        StatsError,
        TermRecord,
    },
    settings::SettingsData,
};

/// The two calls the capture flow makes. Kept behind a trait so the flow can run
/// against a fake backend.
#[async_trait]
pub trait TermBackend: Send + Sync {
    async fn authorize(&self, api_key: &str) -> Result<AuthorizeResponse, StatsError>;

    async fn add_term(&self, api_key: &str, term: &str) -> Result<StatusResponse, StatsError>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    stats_url: String,
    api_url: String,
}

impl ApiClient {
    pub fn new(
        stats_url: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Result<Self, StatsError> {
        Ok(Self { client: http_client()?, stats_url: stats_url.into(), api_url: api_url.into() })
    }

    pub fn from_settings(settings: &SettingsData) -> Result<Self, StatsError> {
        Self::new(settings.stats_url.clone(), settings.api_url.clone())
    }

    pub async fn get_tasks(&self, chat_id: &str) -> Result<Vec<TermRecord>, StatsError> {
        let url = join_url(&self.stats_url, &format!("api/get_tasks/{chat_id}"));
        let response: TasksResponse = fetch_typed(&self.client, &url, &[]).await?;
        Ok(response.tasks)
    }

    pub async fn get_activity(&self, chat_id: &str) -> Result<Vec<ActivityEvent>, StatsError> {
        let url = join_url(&self.stats_url, &format!("api/get_activity/{chat_id}"));
        let response: ActivityResponse = fetch_typed(&self.client, &url, &[]).await?;
        Ok(response.activity)
    }
}

#[async_trait]
impl TermBackend for ApiClient {
    async fn authorize(&self, api_key: &str) -> Result<AuthorizeResponse, StatsError> {
        let url = join_url(&self.api_url, "api/authorize/");
        fetch_typed(&self.client, &url, &[("apiKey", api_key)]).await
    }

    async fn add_term(&self, api_key: &str, term: &str) -> Result<StatusResponse, StatsError> {
        let url = join_url(&self.api_url, "api/add_term/");
        let response: StatusResponse =
            fetch_typed(&self.client, &url, &[("apiKey", api_key), ("term", term)]).await?;
        if !response.status {
            warn!("add_term rejected by backend");
        }
        Ok(response)
    }
}
