use eframe::egui::{
    self,
    RichText,
    TextEdit,
};

use super::{
    theme::Theme,
    ActionQueue,
    UiAction,
};
use crate::capture::{
    CaptureError,
    CredentialStore,
    LoginError,
    MAX_SELECTION_LENGTH,
};

/// Login form and term entry. Requests go out through the action queue; results come
/// back through `login_finished` / `capture_finished`.
#[derive(Debug, Default)]
pub struct CapturePanel {
    api_key_input: String,
    term_input: String,
    login_error: Option<String>,
    login_pending: bool,
    capture_pending: bool,
}

impl CapturePanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        theme: &Theme,
        store: &CredentialStore,
        actions: &mut ActionQueue,
    ) {
        egui::SidePanel::left("capture_panel").resizable(false).default_width(230.0).show(
            ctx,
            |ui| {
                ui.add_space(6.0);
                match store.credentials() {
                    Some(credentials) => {
                        ui.label(theme.heading(ui.ctx(), "Account"));
                        ui.label(format!("Logged in as chat {}", credentials.chat_id));
                        ui.horizontal(|ui| {
                            if ui.button("My dashboard").clicked() {
                                actions.push(UiAction::OpenDashboard(
                                    credentials.chat_id.to_string(),
                                ));
                            }
                            if ui.button("Logout").clicked() {
                                actions.push(UiAction::Logout);
                            }
                        });
                    }
                    None => self.login_form(ui, theme, actions),
                }

                ui.separator();
                self.capture_form(ui, theme, actions);
            },
        );
    }

    fn login_form(&mut self, ui: &mut egui::Ui, theme: &Theme, actions: &mut ActionQueue) {
        ui.label(theme.heading(ui.ctx(), "Login"));

        let response = ui.add(
            TextEdit::singleline(&mut self.api_key_input)
                .password(true)
                .hint_text("API key")
                .desired_width(f32::INFINITY),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.horizontal(|ui| {
            let can_submit = !self.login_pending && !self.api_key_input.trim().is_empty();
            if ui.add_enabled(can_submit, egui::Button::new("Login")).clicked()
                || (submitted && can_submit)
            {
                actions.push(UiAction::Login(self.api_key_input.clone()));
            }
            if self.login_pending {
                ui.add(egui::Spinner::new());
            }
        });

        if let Some(error) = self.login_error() {
            ui.label(RichText::new(error).color(theme.red(ui.ctx())));
        }
    }

    fn capture_form(&mut self, ui: &mut egui::Ui, theme: &Theme, actions: &mut ActionQueue) {
        ui.label(theme.heading(ui.ctx(), "Add term"));

        ui.add(
            TextEdit::singleline(&mut self.term_input)
                .hint_text("Selected text")
                .desired_width(f32::INFINITY),
        );

        let length = self.term_input.chars().count();
        let counter_color = if length > MAX_SELECTION_LENGTH {
            theme.red(ui.ctx())
        } else {
            theme.comment(ui.ctx())
        };

        ui.horizontal(|ui| {
            let can_submit = !self.capture_pending && !self.term_input.trim().is_empty();
            if ui.add_enabled(can_submit, egui::Button::new("Add")).clicked() {
                actions.push(UiAction::Capture(self.term_input.clone()));
            }
            if self.capture_pending {
                ui.add(egui::Spinner::new());
            }
            ui.label(
                RichText::new(format!("{length}/{MAX_SELECTION_LENGTH}"))
                    .small()
                    .color(counter_color),
            );
        });
    }

    pub fn login_started(&mut self) {
        self.login_pending = true;
        self.login_error = None;
    }

    pub fn login_finished(&mut self, result: Result<(), &LoginError>) {
        self.login_pending = false;
        match result {
            Ok(()) => {
                self.api_key_input.clear();
                self.login_error = None;
            }
            Err(e) => self.login_error = Some(e.to_string()),
        }
    }

    pub fn capture_started(&mut self) {
        self.capture_pending = true;
    }

    pub fn capture_finished(&mut self, result: Result<(), &CaptureError>) {
        self.capture_pending = false;
        if result.is_ok() {
            self.term_input.clear();
        }
    }

    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    pub fn is_capture_pending(&self) -> bool {
        self.capture_pending
    }
}
