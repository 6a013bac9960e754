use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// One-letter tag used in position descriptions ("500P", "1200C").
    pub fn tag(self) -> char {
        match self {
            OptionType::Call => 'C',
            OptionType::Put => 'P',
        }
    }
}

/// One quoted row of an option chain: a strike and its bid/ask.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    pub strike: f64,
    pub bid: f64,
    pub ask: f64,
}

/// Bid/ask premium for a selected contract (or leg sum). Mark is always
/// derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Premium {
    pub bid: f64,
    pub ask: f64,
}

impl Premium {
    pub fn mark(self) -> f64 {
        (self.bid + self.ask) / 2.0
    }
}

/// What to price on each expiration: one leg, or a put/call strangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    SingleLeg {
        strike: f64,
        option_type: OptionType,
    },
    Strangle {
        put_strike: f64,
        call_strike: f64,
    },
}

impl Selection {
    pub fn single(strike: f64, option_type: OptionType) -> Self {
        Selection::SingleLeg {
            strike,
            option_type,
        }
    }

    /// Build a strangle. The put strike must not sit above the call strike.
    pub fn strangle(put_strike: f64, call_strike: f64) -> Result<Self, RankError> {
        if put_strike > call_strike {
            return Err(RankError::InvalidStrangle {
                put_strike,
                call_strike,
            });
        }
        Ok(Selection::Strangle {
            put_strike,
            call_strike,
        })
    }

    /// Human-readable position tag, e.g. `500P` or `800P 1200C`.
    pub fn describe(&self) -> String {
        match self {
            Selection::SingleLeg {
                strike,
                option_type,
            } => format!("{strike}{}", option_type.tag()),
            Selection::Strangle {
                put_strike,
                call_strike,
            } => format!("{put_strike}P {call_strike}C"),
        }
    }
}

/// One expiration date for which the requested contract(s) were found.
#[derive(Debug, Clone, PartialEq)]
pub struct DateRecord {
    pub date: NaiveDate,
    /// Textual date as the quote source listed it, kept for display.
    pub label: String,
    pub bid: f64,
    pub ask: f64,
    pub mark: f64,
    /// Whole days until expiration; zero or negative for same-day/past dates.
    pub days: i64,
}

/// Which of the three price conventions a ranking is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricePoint {
    Bid,
    Ask,
    Mark,
}

impl PricePoint {
    pub fn price(self, record: &DateRecord) -> f64 {
        match self {
            PricePoint::Bid => record.bid,
            PricePoint::Ask => record.ask,
            PricePoint::Mark => record.mark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PricePoint::Bid => "bid",
            PricePoint::Ask => "ask",
            PricePoint::Mark => "mark",
        }
    }
}

/// One row of a ranking: the full quote plus the premium/day ratio for the
/// convention this ranking is sorted by.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub date: NaiveDate,
    pub label: String,
    pub bid: f64,
    pub ask: f64,
    pub mark: f64,
    pub ratio: f64,
}

/// A date dropped from ranking because it expires today or in the past;
/// premium/day is undefined there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegenerateDate {
    pub date: NaiveDate,
    pub label: String,
    pub days: i64,
}

/// The three independently sorted rankings over one batch of expirations.
/// All three carry the same date set; only the order differs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingReport {
    pub by_bid: Vec<RankedEntry>,
    pub by_ask: Vec<RankedEntry>,
    pub by_mark: Vec<RankedEntry>,
    pub degenerate: Vec<DegenerateDate>,
}

#[derive(Debug, Error)]
pub enum RankError {
    #[error("put strike {put_strike} is above call strike {call_strike}")]
    InvalidStrangle { put_strike: f64, call_strike: f64 },
    #[error("no expiration dates listed for {0}")]
    NoExpirations(String),
    #[error("no expiration carries the requested contract for {0}")]
    NoMatchingContracts(String),
    #[error(transparent)]
    Source(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_is_midpoint() {
        let p = Premium { bid: 10.0, ask: 12.0 };
        assert_eq!(p.mark(), 11.0);
    }

    #[test]
    fn strangle_rejects_inverted_strikes() {
        let err = Selection::strangle(1200.0, 800.0).unwrap_err();
        assert!(matches!(err, RankError::InvalidStrangle { .. }));
    }

    #[test]
    fn strangle_allows_equal_strikes() {
        // A straddle is the degenerate strangle; still a valid selection.
        assert!(Selection::strangle(500.0, 500.0).is_ok());
    }

    #[test]
    fn describe_single_and_strangle() {
        let single = Selection::single(500.0, OptionType::Put);
        assert_eq!(single.describe(), "500P");
        let strangle = Selection::strangle(800.0, 1200.0).unwrap();
        assert_eq!(strangle.describe(), "800P 1200C");
    }
}
