use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::StatsError,
    persistence::{
        load_json_or_default,
        save_json,
    },
};

pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_STATS_URL: &str = "http://localhost:7890";
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsData {
    pub stats_url: String,       // Serves get_tasks / get_activity
    pub api_url: String,         // Serves authorize / add_term
    pub chat_id: Option<String>, // Dashboard to open on start
    pub dark_mode: bool,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            stats_url: DEFAULT_STATS_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            chat_id: None,
            dark_mode: true,
        }
    }
}

impl SettingsData {
    pub fn load() -> Self {
        load_json_or_default::<SettingsData>(SETTINGS_FILE)
    }

    pub fn save(&self) -> Result<(), StatsError> {
        save_json(self, SETTINGS_FILE)
    }

    /// Applies per-run overrides (CLI flags or environment) on top of the stored values.
    pub fn with_overrides(
        mut self,
        stats_url: Option<String>,
        api_url: Option<String>,
        chat_id: Option<String>,
    ) -> Self {
        if let Some(url) = stats_url {
            self.stats_url = url;
        }
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if chat_id.is_some() {
            self.chat_id = chat_id;
        }
        self
    }
}
