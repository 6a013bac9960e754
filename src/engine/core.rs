//! Batch orchestration: list expirations, fetch chains, select contracts,
//! hand the surviving records to the ranking engine.

use chrono::{NaiveDateTime, Utc};
use futures::{stream, StreamExt};

use crate::data::QuoteSource;

use super::types::{DateRecord, RankError, RankingReport, Selection};
use super::{dte, rank, select};

/// Chain fetches are independent per date; a handful in flight keeps the run
/// fast without hammering the source.
const MAX_CONCURRENT_FETCHES: usize = 4;

/// Rank every listed expiration of `ticker` for the given selection.
pub async fn rank(
    source: &dyn QuoteSource,
    ticker: &str,
    selection: &Selection,
) -> Result<RankingReport, RankError> {
    rank_at(source, ticker, selection, Utc::now().naive_utc()).await
}

/// Same as [`rank`], with the evaluation instant supplied by the caller.
/// The instant is captured once for the whole batch: every date's day count
/// is measured against the same clock, regardless of fetch timing.
pub async fn rank_at(
    source: &dyn QuoteSource,
    ticker: &str,
    selection: &Selection,
    now: NaiveDateTime,
) -> Result<RankingReport, RankError> {
    let labels = source.expiration_dates(ticker).await?;
    if labels.is_empty() {
        return Err(RankError::NoExpirations(ticker.to_string()));
    }
    tracing::info!("{} expirations listed for {ticker}", labels.len());

    // Fetches run concurrently; `buffered` yields them back in listing
    // order, so ranking input never depends on completion order.
    let fetches = labels.iter().map(|label| {
        let label = label.as_str();
        async move { (label, source.chain(ticker, label).await) }
    });
    let chains: Vec<_> = stream::iter(fetches)
        .buffered(MAX_CONCURRENT_FETCHES)
        .collect()
        .await;

    let mut records = Vec::new();
    for (label, fetched) in chains {
        // One bad date never aborts the batch; it is logged and dropped.
        let chain = match fetched {
            Ok(chain) => chain,
            Err(err) => {
                tracing::warn!("skipping {label}: {err:#}");
                continue;
            }
        };
        let date = match dte::parse_label(label) {
            Ok(date) => date,
            Err(err) => {
                tracing::warn!("skipping {label}: {err:#}");
                continue;
            }
        };
        let Some(premium) = select::premium_for(&chain, selection) else {
            tracing::debug!("{label}: {} not listed", selection.describe());
            continue;
        };
        records.push(DateRecord {
            date,
            label: label.to_string(),
            bid: premium.bid,
            ask: premium.ask,
            mark: premium.mark(),
            days: dte::days_until(now, date),
        });
    }

    if records.is_empty() {
        return Err(RankError::NoMatchingContracts(ticker.to_string()));
    }
    Ok(rank::build_report(records))
}
