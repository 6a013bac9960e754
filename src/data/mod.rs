pub mod yahoo;

use anyhow::Result;
use async_trait::async_trait;

use crate::engine::types::{OptionQuote, OptionType};

/// A full quoted chain for one expiration date, split by option type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionChain {
    pub calls: Vec<OptionQuote>,
    pub puts: Vec<OptionQuote>,
}

impl OptionChain {
    pub fn side(&self, option_type: OptionType) -> &[OptionQuote] {
        match option_type {
            OptionType::Call => &self.calls,
            OptionType::Put => &self.puts,
        }
    }
}

/// Market-data seam. The ranking engine talks only to this trait; tests
/// substitute an in-memory fake, production plugs in [`yahoo::YahooSource`].
///
/// Dates are exchanged as the source's own textual labels (`"June 20, 2025"`
/// form) so `chain` can be asked back for exactly what `expiration_dates`
/// listed.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn expiration_dates(&self, ticker: &str) -> Result<Vec<String>>;

    async fn chain(&self, ticker: &str, date: &str) -> Result<OptionChain>;
}
