use chrono::{
    DateTime,
    Utc,
};
use serde::Serialize;

use crate::core::ActivityEvent;

pub const BOT_ORIGIN_LABEL: &str = "Telegram";
pub const EXT_ORIGIN_LABEL: &str = "Browser";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub x: DateTime<Utc>,
    pub y: u64,
}

impl SeriesPoint {
    pub fn timestamp(&self) -> i64 {
        self.x.timestamp()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityCharts {
    pub add: Vec<SeriesPoint>,
    pub remember: Vec<SeriesPoint>,
    pub forgot: Vec<SeriesPoint>,
    pub add_bot_total: u64,
    pub add_ext_total: u64,
}

impl ActivityCharts {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty()
    }

    /// Pie chart input: additions per origin.
    pub fn origin_slices(&self) -> [(&'static str, u64); 2] {
        [(BOT_ORIGIN_LABEL, self.add_bot_total), (EXT_ORIGIN_LABEL, self.add_ext_total)]
    }
}

/// Folds per-day counters into chart series, one point per event per series, in input
/// order. Dates are not sorted or deduplicated.
pub fn aggregate(events: &[ActivityEvent]) -> ActivityCharts {
    let mut charts = ActivityCharts {
        add: Vec::with_capacity(events.len()),
        remember: Vec::with_capacity(events.len()),
        forgot: Vec::with_capacity(events.len()),
        ..ActivityCharts::default()
    };

    for event in events {
        // Out-of-range dates collapse to the epoch rather than dropping the point
        let x = DateTime::from_timestamp(event.date, 0).unwrap_or_default();

        charts.add.push(SeriesPoint { x, y: event.add.total() });
        charts.remember.push(SeriesPoint { x, y: u64::from(event.remember) });
        charts.forgot.push(SeriesPoint { x, y: u64::from(event.forgot) });
        charts.add_bot_total += u64::from(event.add.bot);
        charts.add_ext_total += u64::from(event.add.ext);
    }

    charts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AddCounts;

    fn event(date: i64, bot: u32, ext: u32, remember: u32, forgot: u32) -> ActivityEvent {
        ActivityEvent { date, add: AddCounts { bot, ext }, remember, forgot }
    }

    #[test]
    fn test_single_event_example() {
        let charts = aggregate(&[event(1, 2, 1, 3, 1)]);

        assert_eq!(charts.add.len(), 1);
        assert_eq!(charts.add[0].timestamp(), 1);
        assert_eq!(charts.add[0].y, 3);
        assert_eq!(charts.remember[0].y, 3);
        assert_eq!(charts.forgot[0].y, 1);
        assert_eq!(charts.add_bot_total, 2);
        assert_eq!(charts.add_ext_total, 1);
    }

    #[test]
    fn test_empty_input() {
        let charts = aggregate(&[]);
        assert!(charts.is_empty());
        assert!(charts.remember.is_empty() && charts.forgot.is_empty());
        assert_eq!(charts.add_bot_total, 0);
        assert_eq!(charts.add_ext_total, 0);
    }

    #[test]
    fn test_totals_and_input_order_preserved() {
        let events = vec![
            event(300, 1, 0, 0, 2),
            event(100, 4, 5, 1, 0),
            event(200, 0, 3, 7, 1),
            event(200, 2, 2, 0, 0),
        ];
        let charts = aggregate(&events);

        let dates: Vec<i64> = charts.add.iter().map(SeriesPoint::timestamp).collect();
        assert_eq!(dates, vec![300, 100, 200, 200]);

        let added: Vec<u64> = charts.add.iter().map(|p| p.y).collect();
        assert_eq!(added, vec![1, 9, 3, 4]);

        assert_eq!(charts.add_bot_total, events.iter().map(|e| u64::from(e.add.bot)).sum::<u64>());
        assert_eq!(charts.add_ext_total, 10);
        assert_eq!(charts.origin_slices(), [("Telegram", 7), ("Browser", 10)]);
    }

    #[test]
    fn test_aggregate_does_not_overflow_u32_sums() {
        let events = vec![event(1, u32::MAX, u32::MAX, 0, 0), event(2, u32::MAX, 0, 0, 0)];
        let charts = aggregate(&events);

        assert_eq!(charts.add[0].y, 2 * u64::from(u32::MAX));
        assert_eq!(charts.add_bot_total, 2 * u64::from(u32::MAX));
    }
}
