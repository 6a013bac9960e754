#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use anyhow::{bail, Result};
use async_trait::async_trait;
use expirank::data::{OptionChain, QuoteSource};
use expirank::engine::types::OptionQuote;

/// In-memory quote source with frozen chains. Dates listed in `fail_dates`
/// error on fetch, to exercise partial-batch recovery.
#[derive(Default)]
pub struct FakeSource {
    pub dates: Vec<String>,
    pub chains: HashMap<String, OptionChain>,
    pub fail_dates: HashSet<String>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chain(mut self, date: &str, chain: OptionChain) -> Self {
        self.dates.push(date.to_string());
        self.chains.insert(date.to_string(), chain);
        self
    }

    pub fn with_failing_date(mut self, date: &str) -> Self {
        self.dates.push(date.to_string());
        self.fail_dates.insert(date.to_string());
        self
    }
}

#[async_trait]
impl QuoteSource for FakeSource {
    async fn expiration_dates(&self, _ticker: &str) -> Result<Vec<String>> {
        Ok(self.dates.clone())
    }

    async fn chain(&self, _ticker: &str, date: &str) -> Result<OptionChain> {
        if self.fail_dates.contains(date) {
            bail!("simulated upstream failure for {date}");
        }
        match self.chains.get(date) {
            Some(chain) => Ok(chain.clone()),
            None => bail!("no chain staged for {date}"),
        }
    }
}

pub fn quote(strike: f64, bid: f64, ask: f64) -> OptionQuote {
    OptionQuote { strike, bid, ask }
}

pub fn chain(calls: Vec<OptionQuote>, puts: Vec<OptionQuote>) -> OptionChain {
    OptionChain { calls, puts }
}

/// Chain carrying one put and one call row, the usual fixture shape.
pub fn two_sided(
    put_strike: f64,
    put_bid: f64,
    put_ask: f64,
    call_strike: f64,
    call_bid: f64,
    call_ask: f64,
) -> OptionChain {
    chain(
        vec![quote(call_strike, call_bid, call_ask)],
        vec![quote(put_strike, put_bid, put_ask)],
    )
}
