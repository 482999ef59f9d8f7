use eframe::egui::{
    self,
    Frame,
    Margin,
    RichText,
    Sense,
    TextEdit,
    Ui,
};
use egui_extras::TableRow;

use super::super::{
    theme::Theme,
    ActionQueue,
    UiAction,
};
use crate::grid::{
    Column,
    GridState,
    SortDirection,
};

pub fn header_cols(
    mut header: TableRow<'_, '_>,
    grid: &GridState,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    for column in Column::ALL {
        header.col(|ui| column_header(ui, grid, theme, column, actions));
    }
}

pub fn controls_row(
    ui: &mut Ui,
    grid: &GridState,
    visible: usize,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    let mut search = grid.search().to_string();
    let search_width = 280.0;

    Frame::group(ui.style()).inner_margin(Margin::symmetric(8, 3)).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 12.0;

            let response = ui.add_sized(
                [search_width, ui.spacing().interact_size.y],
                TextEdit::singleline(&mut search).hint_text("Search any field..."),
            );
            if response.changed() {
                actions.push(UiAction::SetSearch(search));
            }

            ui.separator();

            let total = grid.records().len();
            let counter = if visible == total {
                format!("{total} terms")
            } else {
                format!("{visible} of {total} terms")
            };
            ui.label(RichText::new(counter).color(theme.comment(ui.ctx())));

            if grid.sort_key().is_some() && ui.small_button("Clear sort").clicked() {
                actions.push(UiAction::ClearSort);
            }
        });
    });
}

fn column_header(
    ui: &mut Ui,
    grid: &GridState,
    theme: &Theme,
    column: Column,
    actions: &mut ActionQueue,
) {
    let is_active = grid.sort_key() == Some(column);
    let direction = grid.sort_direction(column);

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;

        let label = theme.heading(ui.ctx(), column.title());
        let response = ui
            .add(egui::Label::new(label).sense(Sense::click()))
            .on_hover_cursor(egui::CursorIcon::PointingHand)
            .on_hover_ui(|ui| match direction.filter(|_| is_active) {
                Some(direction) => {
                    ui.horizontal(|ui| {
                        ui.label("Sorted by");
                        ui.label(
                            RichText::new(column.title())
                                .color(ui.visuals().hyperlink_color)
                                .strong(),
                        );
                        ui.label(
                            RichText::new(direction_text(direction))
                                .color(ui.visuals().warn_fg_color),
                        );
                    });
                }
                None => {
                    ui.label(format!("Sort by {}", column.title()));
                }
            });

        if response.clicked() {
            actions.push(UiAction::ToggleSort(column));
        }

        if let Some(direction) = direction.filter(|_| is_active) {
            ui.label(RichText::new(direction.arrow()).color(theme.cyan(ui.ctx())));
        }
    });
}

fn direction_text(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => "ascending",
        SortDirection::Descending => "descending",
    }
}
