//! Text and JSON rendering of a [`RankingReport`]. Presentation only:
//! prices show 2 decimals, the per-day column 3, while the report itself
//! keeps full precision.

use anyhow::Result;

use crate::engine::types::{PricePoint, RankedEntry, RankingReport};

/// Per-day figures are quoted per 100-share contract, like the quotes.
const CONTRACT_MULTIPLIER: f64 = 100.0;

const NUMERIC_WIDTH: usize = 8;
const RATIO_WIDTH: usize = 9;

pub fn render_text(report: &RankingReport) -> String {
    let mut out = String::new();

    let sections = [
        (PricePoint::Bid, &report.by_bid),
        (PricePoint::Ask, &report.by_ask),
        (PricePoint::Mark, &report.by_mark),
    ];
    for (point, entries) in sections {
        out.push_str(&format!("Sorted by {} price point\n", point.label()));
        out.push_str(&table(entries));
        out.push('\n');
    }

    if !report.degenerate.is_empty() {
        out.push_str("Excluded (expires today or in the past):\n");
        for d in &report.degenerate {
            out.push_str(&format!("  {} ({} days)\n", d.label, d.days));
        }
    }

    out
}

pub fn render_json(report: &RankingReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn table(entries: &[RankedEntry]) -> String {
    let date_width = entries
        .iter()
        .map(|e| e.label.len())
        .max()
        .unwrap_or(0)
        .max("Date".len());

    let mut out = String::new();
    let rule = format!(
        "+-{}-+-{}-+-{}-+-{}-+-{}-+\n",
        "-".repeat(date_width),
        "-".repeat(NUMERIC_WIDTH),
        "-".repeat(NUMERIC_WIDTH),
        "-".repeat(NUMERIC_WIDTH),
        "-".repeat(RATIO_WIDTH),
    );

    out.push_str(&rule);
    out.push_str(&format!(
        "| {:<date_width$} | {:>NUMERIC_WIDTH$} | {:>NUMERIC_WIDTH$} | {:>NUMERIC_WIDTH$} | {:>RATIO_WIDTH$} |\n",
        "Date", "Bid", "Ask", "Mark", "$ per day",
    ));
    out.push_str(&rule);
    for e in entries {
        out.push_str(&format!(
            "| {:<date_width$} | {:>NUMERIC_WIDTH$.2} | {:>NUMERIC_WIDTH$.2} | {:>NUMERIC_WIDTH$.2} | {:>RATIO_WIDTH$.3} |\n",
            e.label,
            e.bid,
            e.ask,
            e.mark,
            e.ratio * CONTRACT_MULTIPLIER,
        ));
    }
    out.push_str(&rule);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::DegenerateDate;
    use chrono::NaiveDate;

    fn entry(label: &str, bid: f64, ask: f64, ratio: f64) -> RankedEntry {
        RankedEntry {
            date: crate::engine::dte::parse_label(label).unwrap(),
            label: label.to_string(),
            bid,
            ask,
            mark: (bid + ask) / 2.0,
            ratio,
        }
    }

    fn report() -> RankingReport {
        let e = entry("June 20, 2025", 10.0, 12.0, 1.0 / 3.0);
        RankingReport {
            by_bid: vec![e.clone()],
            by_ask: vec![e.clone()],
            by_mark: vec![e],
            degenerate: vec![],
        }
    }

    #[test]
    fn renders_rounded_row() {
        let text = render_text(&report());
        assert!(text.contains("Sorted by bid price point"));
        assert!(text.contains("June 20, 2025"));
        // 10.00 / 12.00 / 11.00, ratio 0.3333... * 100 = 33.333
        assert!(text.contains("10.00"));
        assert!(text.contains("11.00"));
        assert!(text.contains("33.333"));
    }

    #[test]
    fn lists_degenerate_dates() {
        let mut r = report();
        r.degenerate.push(DegenerateDate {
            date: NaiveDate::from_ymd_opt(2025, 5, 16).unwrap(),
            label: "May 16, 2025".to_string(),
            days: 0,
        });
        let text = render_text(&r);
        assert!(text.contains("Excluded"));
        assert!(text.contains("May 16, 2025 (0 days)"));
    }

    #[test]
    fn json_round_trips_structurally() {
        let json = render_json(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["by_mark"][0]["mark"], 11.0);
        assert_eq!(value["by_bid"][0]["date"], "2025-06-20");
    }
}
