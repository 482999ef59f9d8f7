use std::time::Duration;

use eframe::egui::{
    self,
    RichText,
};
use tracing::{
    info,
    warn,
};

use super::{
    capture_panel::CapturePanel,
    charts::activity_charts,
    error_modal::ErrorModal,
    table::term_table,
    theme::{
        set_theme,
        Theme,
    },
    top_bar::TopBar,
    ActionQueue,
    UiAction,
};
use crate::{
    api::ApiClient,
    capture::{
        self,
        CaptureError,
        CredentialStore,
        LoginError,
        MAX_SELECTION_LENGTH,
    },
    core::{
        tasks::{
            TaskManager,
            TaskResult,
        },
        StatsError,
    },
    session::{
        DashboardSession,
        LoadTicket,
    },
    settings::SettingsData,
};

pub struct DashboardApp {
    // Configuration
    settings_data: SettingsData,

    // Dashboard
    session: Option<DashboardSession>,
    chat_input: String,

    // Capture
    credentials: CredentialStore,
    capture_panel: CapturePanel,

    // UI State
    theme: Theme,
    error_modal: ErrorModal,

    // External Services
    api: ApiClient,
    task_manager: TaskManager,
}

impl DashboardApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings_data: SettingsData,
    ) -> Result<Self, StatsError> {
        let api = ApiClient::from_settings(&settings_data)?;
        let task_manager = TaskManager::new()?;

        let (credentials, load_error) = match CredentialStore::open_default() {
            Ok(store) => (store, None),
            Err(e) => {
                warn!("Stored credentials unreadable: {e}");
                (CredentialStore::logged_out_at(CredentialStore::default_path()), Some(e))
            }
        };

        let mut app = Self::with_parts(settings_data, api, credentials, task_manager);
        if let Some(e) = load_error {
            app.error_modal.show_error(
                "Credentials",
                "Stored credentials could not be read. Please login again.",
                Some(e.to_string()),
            );
        }

        app.setup_theme(cc);

        let initial_chat = app
            .settings_data
            .chat_id
            .clone()
            .or_else(|| app.credentials.credentials().map(|c| c.chat_id.to_string()));
        if let Some(chat_id) = initial_chat {
            app.open_dashboard(chat_id);
        }

        Ok(app)
    }

    fn with_parts(
        settings_data: SettingsData,
        api: ApiClient,
        credentials: CredentialStore,
        task_manager: TaskManager,
    ) -> Self {
        Self {
            chat_input: settings_data.chat_id.clone().unwrap_or_default(),
            settings_data,
            session: None,
            credentials,
            capture_panel: CapturePanel::new(),
            theme: Theme::dracula(),
            error_modal: ErrorModal::new(),
            api,
            task_manager,
        }
    }

    fn setup_theme(&self, cc: &eframe::CreationContext<'_>) {
        set_theme(&cc.egui_ctx, &self.theme);

        let (theme, preference) = match self.settings_data.dark_mode {
            true => (egui::Theme::Dark, egui::ThemePreference::Dark),
            false => (egui::Theme::Light, egui::ThemePreference::Light),
        };
        cc.egui_ctx.set_theme(theme);
        cc.egui_ctx.options_mut(|o| o.theme_preference = preference);
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for result in self.task_manager.poll_results() {
            self.handle_task_result(result);
        }

        let mut actions = ActionQueue::new();

        TopBar::show(ctx, &self.theme, &mut self.chat_input, self.session.as_ref(), &mut actions);
        self.capture_panel.show(ctx, &self.theme, &self.credentials, &mut actions);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.dashboard(ui, &mut actions);
        });
        self.error_modal.show(ctx, &self.theme);

        let had_actions = !actions.is_empty();
        self.execute_actions(&mut actions);
        if had_actions {
            ctx.request_repaint();
        }

        // Completions arrive off-frame, keep polling while anything is in flight
        if self.is_waiting() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        self.sync_dark_mode(ctx);
    }
}

impl DashboardApp {
    fn dashboard(&self, ui: &mut egui::Ui, actions: &mut ActionQueue) {
        let Some(session) = &self.session else {
            ui.vertical_centered(|ui| {
                ui.add_space(100.0);
                ui.label(
                    RichText::new("No Dashboard Open").size(32.0).color(self.theme.cyan(ui.ctx())),
                );
                ui.add_space(4.0);
                ui.label(
                    RichText::new("ℹ Enter a chat id in the top bar to load its terms.")
                        .size(11.0)
                        .color(self.theme.comment(ui.ctx())),
                );
            });
            return;
        };

        ui.heading(
            RichText::new(format!("Chat {}", session.chat_id()))
                .color(self.theme.cyan(ui.ctx()))
                .strong(),
        );
        ui.add_space(6.0);
        activity_charts(ui, session, &self.theme);
        ui.separator();
        term_table(ui, session, &self.theme, actions);
    }

    fn is_waiting(&self) -> bool {
        self.session.as_ref().is_some_and(DashboardSession::is_loading)
            || self.capture_panel.is_capture_pending()
    }

    fn execute_actions(&mut self, actions: &mut ActionQueue) {
        for action in actions.drain() {
            match action {
                UiAction::ToggleSort(column) => {
                    if let Some(session) = &mut self.session {
                        session.grid.toggle_sort(column);
                    }
                }
                UiAction::ClearSort => {
                    if let Some(session) = &mut self.session {
                        session.grid.clear_sort();
                    }
                }
                UiAction::SetSearch(query) => {
                    if let Some(session) = &mut self.session {
                        session.grid.set_filter(query);
                    }
                }
                UiAction::OpenDashboard(chat_id) => self.open_dashboard(chat_id),
                UiAction::CloseDashboard => {
                    if let Some(session) = self.session.take() {
                        info!(
                            session = %session.id(),
                            chat_id = session.chat_id(),
                            "Dashboard closed"
                        );
                    }
                }
                UiAction::Reload => self.reload(),
                UiAction::Login(api_key) => {
                    self.capture_panel.login_started();
                    self.task_manager.authorize(&self.api, api_key);
                }
                UiAction::Logout => {
                    if let Err(e) = capture::logout(&mut self.credentials) {
                        self.error_modal.show_error(
                            "Logout",
                            "Failed to remove stored credentials",
                            Some(e.to_string()),
                        );
                    }
                }
                UiAction::Capture(selection) => self.start_capture(selection),
            }
        }
    }

    /// Mounts a fresh session. Whatever was open before is dropped along with any fetches
    /// still addressed to it.
    fn open_dashboard(&mut self, chat_id: String) {
        let session = DashboardSession::mount(chat_id);
        info!(session = %session.id(), chat_id = session.chat_id(), "Dashboard mounted");

        self.task_manager.load_dashboard(session.ticket(), session.chat_id(), &self.api);
        self.chat_input = session.chat_id().to_string();
        self.session = Some(session);
    }

    fn reload(&mut self) {
        if let Some(session) = &mut self.session {
            let ticket = session.mark_reloading();
            self.task_manager.load_dashboard(ticket, session.chat_id(), &self.api);
        }
    }

    fn start_capture(&mut self, selection: String) {
        match capture::validate_capture(&self.credentials, &selection) {
            Ok(credentials) => {
                let api_key = credentials.api_key.clone();
                self.capture_panel.capture_started();
                self.task_manager.submit_term(&self.api, api_key, selection);
            }
            Err(e) => {
                let details = match &e {
                    CaptureError::TooLong { length } => {
                        Some(format!("{length} characters, at most {MAX_SELECTION_LENGTH} allowed"))
                    }
                    _ => None,
                };
                self.error_modal.show_error("Add term", e.to_string(), details);
            }
        }
    }

    fn session_for(&mut self, ticket: LoadTicket) -> Option<&mut DashboardSession> {
        self.session.as_mut().filter(|session| session.accepts(ticket))
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::TasksLoaded { ticket, result } => match self.session_for(ticket) {
                Some(target) => target.apply_tasks(result),
                None => warn!(%ticket, "Dropping outdated task records"),
            },

            TaskResult::ActivityLoaded { ticket, result } => match self.session_for(ticket) {
                Some(target) => target.apply_activity(result),
                None => warn!(%ticket, "Dropping outdated activity"),
            },

            TaskResult::Authorized(result) => {
                let stored = result.and_then(|credentials| {
                    let chat_id = credentials.chat_id;
                    self.credentials
                        .store(credentials)
                        .map(|()| chat_id)
                        .map_err(|e| LoginError::Storage(e.to_string()))
                });

                match stored {
                    Ok(chat_id) => {
                        info!(chat_id, "Logged in");
                        self.capture_panel.login_finished(Ok(()));
                    }
                    Err(e) => self.capture_panel.login_finished(Err(&e)),
                }
            }

            TaskResult::TermCaptured { term, result } => {
                self.capture_panel.capture_finished(result.as_ref().map(|_| ()));

                match result {
                    Ok(()) => {
                        info!(%term, "Term added");
                        if self.viewing_own_dashboard() {
                            self.reload();
                        }
                    }
                    Err(e) => self.error_modal.show_error("Add term", e.to_string(), Some(term)),
                }
            }
        }
    }

    fn viewing_own_dashboard(&self) -> bool {
        match (&self.session, self.credentials.credentials()) {
            (Some(session), Some(credentials)) => {
                session.chat_id() == credentials.chat_id.to_string()
            }
            _ => false,
        }
    }

    /// Persists the theme switch. Only `dark_mode` is written back so per-run overrides
    /// never end up in the settings file.
    fn sync_dark_mode(&mut self, ctx: &egui::Context) {
        let dark_mode = ctx.style().visuals.dark_mode;
        if dark_mode == self.settings_data.dark_mode {
            return;
        }

        self.settings_data.dark_mode = dark_mode;
        let mut stored = SettingsData::load();
        stored.dark_mode = dark_mode;
        if let Err(e) = stored.save() {
            warn!("Failed to save settings: {e}");
        }
    }
}
