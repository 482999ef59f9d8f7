use std::fmt::Write;

use chrono::{
    DateTime,
    TimeZone,
};

use crate::{
    activity::ActivityCharts,
    core::{
        utils::{
            format_calendar,
            format_from_now,
        },
        TermRecord,
    },
    grid::Column,
    session::LoadState,
};

const CONTENT_WIDTH: usize = 28;

/// Renders one grid cell the way the dashboard shows it.
pub fn cell_text<Tz: TimeZone>(record: &TermRecord, column: Column, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match column {
        Column::Content => record.content.clone(),
        Column::ForgotCounter => record.forgot_counter.to_string(),
        Column::StartDate => format_calendar(record.sdate, now),
        Column::NextDate => format_from_now(record.ndate, now),
        Column::Status => record.status.clone(),
    }
}

/// Plain-text table of the derived view, header row first.
pub fn render_grid<Tz: TimeZone>(view: &[&TermRecord], now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    let header: Vec<String> = Column::ALL.iter().map(|c| c.title().to_string()).collect();
    write_row(&mut out, &header);

    for record in view {
        let cells: Vec<String> =
            Column::ALL.iter().map(|&column| cell_text(record, column, now)).collect();
        write_row(&mut out, &cells);
    }

    let _ = writeln!(out, "{} term(s)", view.len());
    out
}

fn write_row(out: &mut String, cells: &[String]) {
    let mut line = String::new();
    for (idx, cell) in cells.iter().enumerate() {
        let width = if idx == 0 { CONTENT_WIDTH } else { 20 };
        let clipped: String = cell.chars().take(width).collect();
        let _ = write!(line, "{clipped:<width$}  ");
    }
    let _ = writeln!(out, "{}", line.trim_end());
}

pub fn render_totals(charts: &ActivityCharts) -> String {
    let mut out = String::new();
    let added: u64 = charts.add.iter().map(|p| p.y).sum();
    let remembered: u64 = charts.remember.iter().map(|p| p.y).sum();
    let forgot: u64 = charts.forgot.iter().map(|p| p.y).sum();

    let _ = writeln!(out, "days with activity: {}", charts.add.len());
    let _ = writeln!(out, "added: {added}  remembered: {remembered}  forgot: {forgot}");
    for (label, total) in charts.origin_slices() {
        let _ = writeln!(out, "added via {label}: {total}");
    }
    out
}

pub fn describe_failure(what: &str, state: &LoadState) -> Option<String> {
    match state {
        LoadState::Failed(e) => Some(format!("{what} unavailable: {e}")),
        _ => None,
    }
}
