use std::f32::consts::{
    FRAC_PI_2,
    TAU,
};

use chrono::{
    DateTime,
    Local,
};
use eframe::egui::{
    self,
    Align2,
    Color32,
    FontId,
    Pos2,
    Rect,
    RichText,
    Sense,
    Shape,
    Stroke,
    Ui,
};

use super::theme::Theme;
use crate::{
    activity::{
        ActivityCharts,
        SeriesPoint,
    },
    session::{
        DashboardSession,
        LoadState,
    },
};

const CHART_HEIGHT: f32 = 180.0;
const AXIS_MARGIN: f32 = 28.0;
const GRID_LINES: usize = 4;

struct Series<'a> {
    label: &'static str,
    points: &'a [SeriesPoint],
    color: Color32,
}

pub fn activity_charts(ui: &mut Ui, session: &DashboardSession, theme: &Theme) {
    let Some(charts) = session.charts() else {
        match session.activity_state() {
            LoadState::Failed(e) => {
                ui.label(RichText::new("No data").size(18.0).color(theme.red(ui.ctx())));
                ui.label(RichText::new(e).small().color(theme.comment(ui.ctx())));
            }
            _ => {
                ui.horizontal(|ui| {
                    ui.add(egui::Spinner::new());
                    ui.label("Loading activity...");
                });
            }
        }
        return;
    };

    ui.columns(3, |columns| {
        line_chart(
            &mut columns[0],
            theme,
            "Added terms",
            &[Series { label: "Added", points: &charts.add, color: theme.added_series() }],
        );
        line_chart(
            &mut columns[1],
            theme,
            "Reviews",
            &[
                Series {
                    label: "Remembered",
                    points: &charts.remember,
                    color: theme.remember_series(),
                },
                Series { label: "Forgot", points: &charts.forgot, color: theme.forgot_series() },
            ],
        );
        origins_pie(&mut columns[2], theme, charts);
    });
}

fn line_chart(ui: &mut Ui, theme: &Theme, title: &str, series: &[Series<'_>]) {
    ui.label(theme.heading(ui.ctx(), title));

    let (response, painter) =
        ui.allocate_painter(egui::vec2(ui.available_width(), CHART_HEIGHT), Sense::hover());
    let plot = Rect::from_min_max(
        response.rect.min + egui::vec2(AXIS_MARGIN, 4.0),
        response.rect.max - egui::vec2(4.0, 16.0),
    );
    let small = FontId::proportional(10.0);
    let faint = theme.comment(ui.ctx());

    let all_points = series.iter().flat_map(|s| s.points.iter());
    let Some(bounds) = ChartBounds::from_points(all_points) else {
        painter.text(plot.center(), Align2::CENTER_CENTER, "No activity yet", small, faint);
        return;
    };

    for step in 0..=GRID_LINES {
        let value = bounds.y_max * step as f64 / GRID_LINES as f64;
        let y = bounds.project_y(value, plot);
        painter.line_segment(
            [Pos2::new(plot.left(), y), Pos2::new(plot.right(), y)],
            Stroke::new(1.0, theme.grid_line(ui.ctx())),
        );
        painter.text(
            Pos2::new(plot.left() - 4.0, y),
            Align2::RIGHT_CENTER,
            format!("{}", value.round()),
            small.clone(),
            faint,
        );
    }

    painter.text(
        plot.left_bottom() + egui::vec2(0.0, 2.0),
        Align2::LEFT_TOP,
        axis_date(bounds.x_min),
        small.clone(),
        faint,
    );
    if bounds.x_max != bounds.x_min {
        painter.text(
            plot.right_bottom() + egui::vec2(0.0, 2.0),
            Align2::RIGHT_TOP,
            axis_date(bounds.x_max),
            small,
            faint,
        );
    }

    for s in series {
        let points: Vec<Pos2> = s.points.iter().map(|p| bounds.project(p, plot)).collect();
        for &point in &points {
            painter.circle_filled(point, 2.5, s.color);
        }
        if points.len() > 1 {
            painter.add(Shape::line(points, Stroke::new(2.0, s.color)));
        }
    }

    if let Some(pointer) = response.hover_pos() {
        let anchor = series.first().map(|s| s.points).unwrap_or_default();
        if let Some(idx) = bounds.nearest(anchor, pointer, plot) {
            let mut lines = Vec::with_capacity(series.len() + 1);
            if let Some(point) = anchor.get(idx) {
                lines.push(axis_date(point.timestamp()));
            }
            for s in series {
                if let Some(point) = s.points.get(idx) {
                    lines.push(format!("{}: {}", s.label, point.y));
                }
            }
            response.on_hover_text_at_pointer(lines.join("\n"));
        }
    }

    legend(ui, series.iter().map(|s| (s.label.to_string(), s.color)));
}

fn origins_pie(ui: &mut Ui, theme: &Theme, charts: &ActivityCharts) {
    ui.label(theme.heading(ui.ctx(), "Origins"));

    let (response, painter) =
        ui.allocate_painter(egui::vec2(ui.available_width(), CHART_HEIGHT), Sense::hover());
    let center = response.rect.center();
    let radius = (response.rect.width().min(response.rect.height()) / 2.0 - 8.0).max(4.0);

    let slices = charts.origin_slices();
    let colors = theme.origin_colors();
    let totals: Vec<u64> = slices.iter().map(|(_, total)| *total).collect();

    match slice_angles(&totals) {
        None => {
            painter.circle_stroke(center, radius, Stroke::new(1.0, theme.grid_line(ui.ctx())));
            painter.text(
                center,
                Align2::CENTER_CENTER,
                "No additions",
                FontId::proportional(10.0),
                theme.comment(ui.ctx()),
            );
        }
        Some(angles) => {
            for ((start, end), color) in angles.into_iter().zip(colors) {
                for wedge in wedge_shapes(center, radius, start, end, color) {
                    painter.add(wedge);
                }
            }
        }
    }

    let sum: u64 = totals.iter().sum();
    legend(
        ui,
        slices.iter().zip(colors).map(|((label, total), color)| {
            let share = if sum == 0 { 0.0 } else { *total as f64 * 100.0 / sum as f64 };
            (format!("{label} {total} ({share:.0}%)"), color)
        }),
    );
}

fn legend(ui: &mut Ui, entries: impl Iterator<Item = (String, Color32)>) {
    ui.horizontal_wrapped(|ui| {
        for (label, color) in entries {
            ui.label(RichText::new("●").color(color));
            ui.small(label);
            ui.add_space(6.0);
        }
    });
}

fn axis_date(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|utc| utc.with_timezone(&Local).format("%d.%m.%Y").to_string())
        .unwrap_or_default()
}

/// Data extent of a line chart. The y axis always starts at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ChartBounds {
    x_min: i64,
    x_max: i64,
    y_max: f64,
}

impl ChartBounds {
    fn from_points<'a>(points: impl Iterator<Item = &'a SeriesPoint>) -> Option<Self> {
        points.fold(None, |bounds: Option<Self>, point| {
            let x = point.timestamp();
            let y = point.y as f64;
            Some(match bounds {
                None => Self { x_min: x, x_max: x, y_max: y.max(1.0) },
                Some(b) => Self {
                    x_min: b.x_min.min(x),
                    x_max: b.x_max.max(x),
                    y_max: b.y_max.max(y),
                },
            })
        })
    }

    fn project_x(&self, timestamp: i64, plot: Rect) -> f32 {
        let span = (self.x_max - self.x_min).max(1) as f64;
        if self.x_max == self.x_min {
            return plot.center().x;
        }
        plot.left() + ((timestamp - self.x_min) as f64 / span) as f32 * plot.width()
    }

    fn project_y(&self, value: f64, plot: Rect) -> f32 {
        plot.bottom() - (value / self.y_max) as f32 * plot.height()
    }

    fn project(&self, point: &SeriesPoint, plot: Rect) -> Pos2 {
        Pos2::new(self.project_x(point.timestamp(), plot), self.project_y(point.y as f64, plot))
    }

    /// Index of the point closest to the pointer along the x axis.
    fn nearest(&self, points: &[SeriesPoint], pointer: Pos2, plot: Rect) -> Option<usize> {
        points
            .iter()
            .enumerate()
            .map(|(idx, p)| (idx, (self.project_x(p.timestamp(), plot) - pointer.x).abs()))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(idx, _)| idx)
    }
}

/// Start/end angle of each slice, clockwise from twelve o'clock. `None` when every total
/// is zero.
fn slice_angles(totals: &[u64]) -> Option<Vec<(f32, f32)>> {
    let sum: u64 = totals.iter().sum();
    if sum == 0 {
        return None;
    }

    let mut start = -FRAC_PI_2;
    Some(
        totals
            .iter()
            .map(|&total| {
                let end = start + (total as f64 / sum as f64) as f32 * TAU;
                let slice = (start, end);
                start = end;
                slice
            })
            .collect(),
    )
}

// convex_polygon needs convex input, so slices are cut into wedges of at most a quarter turn
fn wedge_shapes(center: Pos2, radius: f32, start: f32, end: f32, color: Color32) -> Vec<Shape> {
    let sweep = end - start;
    if sweep <= 0.0 {
        return Vec::new();
    }

    let pieces = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    (0..pieces)
        .map(|piece| {
            let from = start + sweep * piece as f32 / pieces as f32;
            let to = start + sweep * (piece + 1) as f32 / pieces as f32;
            let steps = ((to - from) / TAU * 96.0).ceil().max(1.0) as usize;

            let mut points = Vec::with_capacity(steps + 2);
            points.push(center);
            for step in 0..=steps {
                let angle = from + (to - from) * step as f32 / steps as f32;
                points.push(center + radius * egui::vec2(angle.cos(), angle.sin()));
            }

            Shape::convex_polygon(points, color, Stroke::NONE)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: i64, y: u64) -> SeriesPoint {
        SeriesPoint { x: DateTime::from_timestamp(x, 0).unwrap(), y }
    }

    fn plot() -> Rect {
        Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(100.0, 50.0))
    }

    #[test]
    fn test_bounds_cover_all_series() {
        let add = [point(100, 3), point(300, 1)];
        let forgot = [point(200, 7)];

        let bounds = ChartBounds::from_points(add.iter().chain(forgot.iter())).unwrap();
        assert_eq!(bounds, ChartBounds { x_min: 100, x_max: 300, y_max: 7.0 });
        assert!(ChartBounds::from_points([].iter()).is_none());
    }

    #[test]
    fn test_projection_maps_extremes_to_plot_edges() {
        let points = [point(100, 0), point(300, 10)];
        let bounds = ChartBounds::from_points(points.iter()).unwrap();

        assert_eq!(bounds.project(&points[0], plot()), Pos2::new(0.0, 50.0));
        assert_eq!(bounds.project(&points[1], plot()), Pos2::new(100.0, 0.0));
    }

    #[test]
    fn test_single_day_is_centered() {
        let points = [point(86_400, 0)];
        let bounds = ChartBounds::from_points(points.iter()).unwrap();

        // All-zero series still get a non-degenerate y axis
        assert_eq!(bounds.y_max, 1.0);
        assert_eq!(bounds.project(&points[0], plot()).x, 50.0);
    }

    #[test]
    fn test_nearest_point_by_x() {
        let points = [point(0, 1), point(100, 1), point(200, 1)];
        let bounds = ChartBounds::from_points(points.iter()).unwrap();

        assert_eq!(bounds.nearest(&points, Pos2::new(60.0, 10.0), plot()), Some(1));
        assert_eq!(bounds.nearest(&[], Pos2::new(60.0, 10.0), plot()), None);
    }

    #[test]
    fn test_slice_angles_cover_full_turn() {
        let angles = slice_angles(&[3, 1]).unwrap();
        assert_eq!(angles[0].0, -FRAC_PI_2);
        assert!((angles[0].1 - angles[0].0 - 0.75 * TAU).abs() < 1e-5);
        assert!((angles[1].1 - (-FRAC_PI_2 + TAU)).abs() < 1e-5);

        assert!(slice_angles(&[0, 0]).is_none());
    }

    #[test]
    fn test_large_slice_is_split_into_convex_wedges() {
        let wedges = wedge_shapes(Pos2::ZERO, 10.0, 0.0, 0.6 * TAU, Color32::RED);
        assert_eq!(wedges.len(), 3);
        assert!(wedge_shapes(Pos2::ZERO, 10.0, 1.0, 1.0, Color32::RED).is_empty());
    }
}
