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
use crate::session::{
    DashboardSession,
    LoadState,
};

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        theme: &Theme,
        chat_input: &mut String,
        session: Option<&DashboardSession>,
        actions: &mut ActionQueue,
    ) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);
                ui.menu_button("File", |ui| {
                    let has_session = session.is_some();
                    if ui.add_enabled(has_session, egui::Button::new("Reload")).clicked() {
                        actions.push(UiAction::Reload);
                    }
                    if ui.add_enabled(has_session, egui::Button::new("Close Dashboard")).clicked() {
                        actions.push(UiAction::CloseDashboard);
                    }
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.separator();

                ui.label("Chat");
                let response = ui.add(
                    TextEdit::singleline(chat_input).desired_width(120.0).hint_text("chat id"),
                );
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                let chat_id = chat_input.trim();
                if (ui.button("Open").clicked() || submitted) && !chat_id.is_empty() {
                    actions.push(UiAction::OpenDashboard(chat_id.to_string()));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(session) = session {
                        Self::show_status_indicators(ui, theme, session);
                    }
                });
            });
        });
    }

    fn show_status_indicators(ui: &mut egui::Ui, theme: &Theme, session: &DashboardSession) {
        // Right-to-left layout, so the last indicator drawn is leftmost
        for (name, state) in
            [("Activity", session.activity_state()), ("Terms", session.tasks_state())]
        {
            let (color, tooltip) = match state {
                LoadState::Pending => (theme.comment(ui.ctx()), format!("{name}: loading")),
                LoadState::Loaded => (theme.green(ui.ctx()), format!("{name}: loaded")),
                LoadState::Failed(e) => (theme.red(ui.ctx()), format!("{name}: {e}")),
            };

            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 2.0;
                ui.small(RichText::new("●").color(color)).on_hover_text(&tooltip);
                ui.small(name).on_hover_text(&tooltip);
            });
            ui.add_space(3.0);
        }

        ui.small(RichText::new(format!("chat {}", session.chat_id())).color(theme.cyan(ui.ctx())));
    }
}
