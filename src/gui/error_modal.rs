use eframe::egui::{
    self,
    RichText,
};

use super::theme::Theme;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

/// Blocking alert. Only one is visible at a time; a newer alert replaces the current one.
pub struct ErrorModal {
    alert: Option<Alert>,
}

impl ErrorModal {
    pub fn new() -> Self {
        Self { alert: None }
    }

    pub fn show_error(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        details: Option<impl Into<String>>,
    ) {
        self.alert = Some(Alert {
            title: title.into(),
            message: message.into(),
            details: details.map(Into::into),
        });
    }

    pub fn current(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.alert.is_some()
    }

    /// Returns true on the frame the alert is dismissed.
    pub fn show(&mut self, ctx: &egui::Context, theme: &Theme) -> bool {
        let Some(alert) = self.current() else {
            return false;
        };

        let modal = egui::Modal::new(egui::Id::new("error_modal")).show(ctx, |ui| {
            ui.set_width(380.0);

            ui.horizontal(|ui| {
                ui.label(RichText::new("⚠").size(22.0).color(theme.red(ui.ctx())));
                ui.label(RichText::new(&alert.title).size(17.0).strong());
            });

            ui.add_space(8.0);
            ui.label(&alert.message);

            if let Some(details) = &alert.details {
                ui.add_space(8.0);
                ui.collapsing("Details", |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut details.as_str())
                            .desired_width(f32::INFINITY)
                            .desired_rows(3)
                            .code_editor(),
                    );
                });
            }

            ui.add_space(12.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("OK").clicked() {
                    ui.close();
                }
            });
        });

        if modal.should_close() {
            self.alert = None;
            return true;
        }

        false
    }
}

impl Default for ErrorModal {
    fn default() -> Self {
        Self::new()
    }
}
