use chrono::{
    DateTime,
    Datelike,
    TimeZone,
};

/// Case-insensitive substring match. `query` must already be lower-cased.
pub fn text_matches_search(text: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    text.to_lowercase().contains(query)
}

/// Calendar style label relative to `now`: "Today at 14:05", "Last Monday at 09:00",
/// or a plain date once the timestamp is more than a week away.
pub fn format_calendar<Tz: TimeZone>(timestamp: i64, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let Some(utc) = DateTime::from_timestamp(timestamp, 0) else {
        return timestamp.to_string();
    };
    let moment = utc.with_timezone(&now.timezone());
    let day_delta = moment.date_naive().signed_duration_since(now.date_naive()).num_days();
    let clock = moment.format("%H:%M");
    let weekday = moment.weekday();

    match day_delta {
        0 => format!("Today at {clock}"),
        -1 => format!("Yesterday at {clock}"),
        1 => format!("Tomorrow at {clock}"),
        -6..=-2 => format!("Last {} at {clock}", weekday_name(weekday)),
        2..=6 => format!("{} at {clock}", weekday_name(weekday)),
        _ => moment.format("%d.%m.%Y").to_string(),
    }
}

/// Humanized distance between `timestamp` and `now`, e.g. "in 3 days" or "2 hours ago".
pub fn format_from_now<Tz: TimeZone>(timestamp: i64, now: &DateTime<Tz>) -> String {
    let delta = timestamp.saturating_sub(now.timestamp());
    let phrase = humanize_seconds(delta.unsigned_abs());

    if delta >= 0 {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

fn humanize_seconds(seconds: u64) -> String {
    const MINUTE: f64 = 60.0;
    const HOUR: f64 = 60.0 * MINUTE;
    const DAY: f64 = 24.0 * HOUR;

    let secs = seconds as f64;
    let count = |unit: f64| (secs / unit).round() as u64;

    if secs < 45.0 {
        "a few seconds".to_string()
    } else if secs < 90.0 {
        "a minute".to_string()
    } else if secs < 45.0 * MINUTE {
        format!("{} minutes", count(MINUTE))
    } else if secs < 90.0 * MINUTE {
        "an hour".to_string()
    } else if secs < 22.0 * HOUR {
        format!("{} hours", count(HOUR))
    } else if secs < 36.0 * HOUR {
        "a day".to_string()
    } else if secs < 26.0 * DAY {
        format!("{} days", count(DAY))
    } else if secs < 45.0 * DAY {
        "a month".to_string()
    } else if secs < 320.0 * DAY {
        format!("{} months", count(30.0 * DAY))
    } else if secs < 548.0 * DAY {
        "a year".to_string()
    } else {
        format!("{} years", count(365.0 * DAY))
    }
}

fn weekday_name(weekday: chrono::Weekday) -> &'static str {
    use chrono::Weekday::*;
    match weekday {
        Mon => "Monday",
        Tue => "Tuesday",
        Wed => "Wednesday",
        Thu => "Thursday",
        Fri => "Friday",
        Sat => "Saturday",
        Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    // 2024-03-13 12:00:00 UTC, a Wednesday
    const NOW: i64 = 1_710_331_200;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(NOW, 0).unwrap()
    }

    #[test]
    fn test_text_matches_search() {
        assert!(text_matches_search("Serendipity", "dip"));
        assert!(text_matches_search("anything", ""));
        assert!(!text_matches_search("Serendipity", "DIP"));
    }

    #[test]
    fn test_calendar_labels() {
        assert_eq!(format_calendar(NOW + 3_600, &now()), "Today at 13:00");
        assert_eq!(format_calendar(NOW - 86_400, &now()), "Yesterday at 12:00");
        assert_eq!(format_calendar(NOW + 86_400, &now()), "Tomorrow at 12:00");
        assert_eq!(format_calendar(NOW - 2 * 86_400, &now()), "Last Monday at 12:00");
        assert_eq!(format_calendar(NOW + 3 * 86_400, &now()), "Saturday at 12:00");
        assert_eq!(format_calendar(NOW + 30 * 86_400, &now()), "12.04.2024");
    }

    #[test]
    fn test_from_now_labels() {
        assert_eq!(format_from_now(NOW + 10, &now()), "in a few seconds");
        assert_eq!(format_from_now(NOW - 2 * 3_600, &now()), "2 hours ago");
        assert_eq!(format_from_now(NOW + 3 * 86_400, &now()), "in 3 days");
        assert_eq!(format_from_now(NOW - 400 * 86_400, &now()), "a year ago");
    }

    #[test]
    fn test_from_now_survives_extreme_timestamps() {
        assert!(format_from_now(i64::MIN, &now()).ends_with("years ago"));
        assert!(format_from_now(i64::MAX, &now()).starts_with("in "));
    }
}
