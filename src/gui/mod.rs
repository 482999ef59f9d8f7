mod actions;
mod app;
mod capture_panel;
mod charts;
mod error_modal;
mod table;
pub mod theme;
mod top_bar;

pub use actions::{
    ActionQueue,
    UiAction,
};
pub use app::DashboardApp;
use eframe::egui;
use tracing::info;

use crate::{
    core::StatsError,
    settings::SettingsData,
};

/// Opens the dashboard window and blocks until it is closed.
pub fn run_dashboard(settings: SettingsData) -> Result<(), StatsError> {
    info!(stats_url = %settings.stats_url, api_url = %settings.api_url, "Starting dashboard");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("spacestats")
            .with_inner_size([1180.0, 780.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "spacestats",
        native_options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, settings)?))),
    )
    .map_err(|e| StatsError::Custom(format!("Dashboard window failed: {e}")))
}
