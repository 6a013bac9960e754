//! Live quote source backed by Yahoo Finance's delayed options endpoint.
//!
//! One GET per expiration: `{BASE_URL}/{SYMBOL}?date={epoch}` returns the
//! full chain for that date; the same endpoint without `date` lists every
//! available expiration epoch. Transient failures (429 and 5xx) are retried
//! with exponential backoff; anything else surfaces to the caller, which
//! drops the affected date and keeps the batch going.

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveTime};
use reqwest::Client;
use serde::Deserialize;
use tokio::time::sleep;

use crate::engine::dte;
use crate::engine::types::OptionQuote;

use super::{OptionChain, QuoteSource};

const BASE_URL: &str = "https://query1.finance.yahoo.com/v7/finance/options";
const TIMEOUT_SECS: u64 = 20;
const MAX_RETRIES: u32 = 3;
const RETRY_BASE_DELAY_MS: u64 = 500;
// Yahoo rejects clients without a browser user agent.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

// ---------------------------------------------------------------------------
// API response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(rename = "optionChain")]
    option_chain: ApiEnvelope,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    result: Option<Vec<ApiResult>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResult {
    #[serde(rename = "expirationDates", default)]
    expiration_dates: Vec<i64>,
    #[serde(default)]
    options: Vec<ApiChainBlock>,
}

#[derive(Debug, Deserialize)]
struct ApiChainBlock {
    #[serde(default)]
    calls: Vec<ApiContract>,
    #[serde(default)]
    puts: Vec<ApiContract>,
}

#[derive(Debug, Deserialize)]
struct ApiContract {
    strike: f64,
    // Yahoo omits bid/ask on untraded contracts; treated as zero.
    bid: Option<f64>,
    ask: Option<f64>,
}

// ---------------------------------------------------------------------------

pub struct YahooSource {
    http: Client,
}

impl YahooSource {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .gzip(true)
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .context("building http client")?;
        Ok(Self { http })
    }

    async fn fetch(&self, url: &str) -> Result<ApiResult> {
        let mut delay = Duration::from_millis(RETRY_BASE_DELAY_MS);
        let mut last_err = anyhow!("request never attempted");

        for attempt in 1..=MAX_RETRIES {
            match self.http.get(url).send().await {
                Ok(resp) => {
                    let status = resp.status();
                    if status.as_u16() == 429 || status.is_server_error() {
                        last_err = anyhow!("HTTP {status}");
                    } else {
                        let parsed: ApiResponse = resp
                            .error_for_status()
                            .with_context(|| format!("GET {url}"))?
                            .json()
                            .await
                            .context("decoding options response")?;
                        return unwrap_result(parsed);
                    }
                }
                Err(err) => last_err = err.into(),
            }

            if attempt < MAX_RETRIES {
                tracing::warn!("retrying {url} after {last_err} (attempt {attempt}/{MAX_RETRIES})");
                sleep(delay).await;
                delay *= 2;
            }
        }

        Err(last_err).with_context(|| format!("giving up on {url} after {MAX_RETRIES} attempts"))
    }
}

fn unwrap_result(parsed: ApiResponse) -> Result<ApiResult> {
    if let Some(err) = parsed.option_chain.error {
        bail!(
            "quote source error: {} ({})",
            err.description.unwrap_or_default(),
            err.code.unwrap_or_default()
        );
    }
    parsed
        .option_chain
        .result
        .and_then(|mut results| (!results.is_empty()).then(|| results.remove(0)))
        .ok_or_else(|| anyhow!("empty result set from quote source"))
}

/// Expiration epochs are midnight UTC, so label and epoch round-trip
/// through the calendar date.
fn label_for_epoch(epoch: i64) -> Option<String> {
    DateTime::from_timestamp(epoch, 0).map(|dt| dte::format_label(dt.date_naive()))
}

fn epoch_for_label(label: &str) -> Result<i64> {
    Ok(dte::parse_label(label)?
        .and_time(NaiveTime::MIN)
        .and_utc()
        .timestamp())
}

fn convert(rows: Vec<ApiContract>) -> Vec<OptionQuote> {
    rows.into_iter()
        .map(|c| OptionQuote {
            strike: c.strike,
            bid: c.bid.unwrap_or_default(),
            ask: c.ask.unwrap_or_default(),
        })
        .collect()
}

#[async_trait]
impl QuoteSource for YahooSource {
    async fn expiration_dates(&self, ticker: &str) -> Result<Vec<String>> {
        let url = format!("{BASE_URL}/{}", ticker.to_uppercase());
        let result = self.fetch(&url).await?;
        Ok(result
            .expiration_dates
            .iter()
            .filter_map(|&epoch| label_for_epoch(epoch))
            .collect())
    }

    async fn chain(&self, ticker: &str, date: &str) -> Result<OptionChain> {
        let epoch = epoch_for_label(date)?;
        let url = format!("{BASE_URL}/{}?date={epoch}", ticker.to_uppercase());
        let result = self.fetch(&url).await?;
        let block = result
            .options
            .into_iter()
            .next()
            .with_context(|| format!("no chain returned for {date}"))?;
        Ok(OptionChain {
            calls: convert(block.calls),
            puts: convert(block.puts),
        })
    }
}
