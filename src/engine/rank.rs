use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use super::types::{DateRecord, DegenerateDate, PricePoint, RankedEntry, RankingReport};

/// Build the three rankings from one batch of records.
///
/// Records with `days <= 0` are split off first: premium/day is undefined on
/// expiration day and sign-flipped after it, so those dates are reported
/// separately instead of being sorted. The surviving set is identical across
/// all three rankings.
pub fn build_report(records: Vec<DateRecord>) -> RankingReport {
    let (live, dropped): (Vec<_>, Vec<_>) = records.into_iter().partition(|r| r.days > 0);

    for r in &dropped {
        tracing::warn!(
            "{} expires in {} day(s); excluded from ranking",
            r.label,
            r.days
        );
    }

    RankingReport {
        by_bid: ranked_by(&live, PricePoint::Bid),
        by_ask: ranked_by(&live, PricePoint::Ask),
        by_mark: ranked_by(&live, PricePoint::Mark),
        degenerate: dropped
            .into_iter()
            .map(|r| DegenerateDate {
                date: r.date,
                label: r.label,
                days: r.days,
            })
            .collect(),
    }
}

/// One descending sort by premium/day for a single price convention.
/// Ties sort by ascending expiration date so output is reproducible.
fn ranked_by(records: &[DateRecord], point: PricePoint) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = records
        .iter()
        .map(|r| RankedEntry {
            date: r.date,
            label: r.label.clone(),
            bid: r.bid,
            ask: r.ask,
            mark: r.mark,
            ratio: point.price(r) / r.days as f64,
        })
        .collect();
    entries.sort_by_key(|e| (Reverse(OrderedFloat(e.ratio)), e.date));
    entries
}
