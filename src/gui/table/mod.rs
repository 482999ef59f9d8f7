use chrono::{
    DateTime,
    Local,
};
use eframe::egui::{
    self,
    RichText,
    Ui,
};
use egui_extras::TableBuilder;

use super::{
    theme::Theme,
    ActionQueue,
};
use crate::{
    grid::Column,
    session::{
        DashboardSession,
        LoadState,
    },
    summary::cell_text,
};

mod header;

use header::{
    controls_row,
    header_cols,
};

pub fn term_table(
    ui: &mut Ui,
    session: &DashboardSession,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    let grid = &session.grid;

    match session.tasks_state() {
        LoadState::Pending if grid.records().is_empty() => {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.label("Loading terms...");
            });
            return;
        }
        LoadState::Failed(e) if grid.records().is_empty() => {
            ui.label(RichText::new("No data").size(18.0).color(theme.red(ui.ctx())));
            ui.label(RichText::new(e).small().color(theme.comment(ui.ctx())));
            return;
        }
        _ => {}
    }

    let view = grid.derive();
    controls_row(ui, grid, view.len(), theme, actions);
    ui.add_space(8.0);

    let now = Local::now();
    let text_height =
        egui::TextStyle::Body.resolve(ui.style()).size.max(ui.spacing().interact_size.y);

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(egui_extras::Column::remainder().at_least(160.0).clip(true))
        .columns(egui_extras::Column::auto().at_least(100.0), Column::ALL.len() - 1)
        .header(25.0, |header| {
            header_cols(header, grid, theme, actions);
        })
        .body(|body| {
            body.rows(text_height, view.len(), |mut row| {
                let record = view[row.index()];
                for column in Column::ALL {
                    row.col(|ui| {
                        let text = cell_text(record, column, &now);
                        match column {
                            Column::Content => {
                                ui.label(RichText::new(text).strong());
                            }
                            Column::StartDate | Column::NextDate => {
                                let raw = match column {
                                    Column::StartDate => record.sdate,
                                    _ => record.ndate,
                                };
                                ui.label(text).on_hover_text(full_date(raw));
                            }
                            _ => {
                                ui.label(text);
                            }
                        }
                    });
                }
            });
        });
}

fn full_date(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|utc| utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
