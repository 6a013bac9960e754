use crate::data::OptionChain;

use super::types::{OptionQuote, OptionType, Premium, Selection};

/// Find the chain row for a strike. Strikes are compared exactly as the
/// quote source provided them; no tolerance band. If the source lists the
/// same strike twice, the first row wins.
#[allow(clippy::float_cmp)]
pub fn find_contract(rows: &[OptionQuote], strike: f64) -> Option<&OptionQuote> {
    rows.iter().find(|q| q.strike == strike)
}

/// Premium for the selection on one expiration's chain. `None` means the
/// requested contract (or either strangle leg) is not listed on this date;
/// the caller skips the date rather than treating it as an error.
pub fn premium_for(chain: &OptionChain, selection: &Selection) -> Option<Premium> {
    match *selection {
        Selection::SingleLeg {
            strike,
            option_type,
        } => {
            let row = find_contract(chain.side(option_type), strike)?;
            Some(Premium {
                bid: row.bid,
                ask: row.ask,
            })
        }
        Selection::Strangle {
            put_strike,
            call_strike,
        } => {
            let put = find_contract(chain.side(OptionType::Put), put_strike)?;
            let call = find_contract(chain.side(OptionType::Call), call_strike)?;
            Some(Premium {
                bid: put.bid + call.bid,
                ask: put.ask + call.ask,
            })
        }
    }
}
