use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Textual date form used by the quote source, e.g. `"June 20, 2025"`.
pub const DATE_FORMAT: &str = "%B %d, %Y";

pub fn parse_label(label: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(label, DATE_FORMAT)
        .with_context(|| format!("unparseable expiration date: {label:?}"))
}

pub fn format_label(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Whole days from `now` until the expiration's midnight, truncated toward
/// zero. `now` is a single UTC instant captured once per batch so every date
/// in one run is measured against the same clock. Zero and negative values
/// are returned as-is; the ranking engine applies the exclusion policy.
pub fn days_until(now: NaiveDateTime, expiration: NaiveDate) -> i64 {
    (expiration.and_time(NaiveTime::MIN) - now).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_source_label() {
        assert_eq!(parse_label("June 20, 2025").unwrap(), date(2025, 6, 20));
        assert_eq!(parse_label("January 3, 2025").unwrap(), date(2025, 1, 3));
    }

    #[test]
    fn label_round_trips() {
        let d = date(2025, 6, 20);
        assert_eq!(parse_label(&format_label(d)).unwrap(), d);
    }

    #[test]
    fn rejects_garbage_label() {
        assert!(parse_label("2025-06-20").is_err());
        assert!(parse_label("").is_err());
    }

    #[test]
    fn whole_days_from_midnight() {
        let now = date(2025, 5, 21).and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(days_until(now, date(2025, 6, 20)), 30);
    }

    #[test]
    fn partial_day_truncates() {
        // 29.5 days out counts as 29, matching whole-day truncation.
        let now = date(2025, 5, 21).and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(days_until(now, date(2025, 6, 20)), 29);
    }

    #[test]
    fn same_day_and_past_pass_through() {
        let now = date(2025, 6, 20).and_hms_opt(9, 30, 0).unwrap();
        assert_eq!(days_until(now, date(2025, 6, 20)), 0);
        assert_eq!(days_until(now, date(2025, 6, 13)), -7);
    }
}
